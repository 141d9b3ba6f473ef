use crate::config::Settings;
use crate::diagnostics::{Diagnostics, Warning};
use crate::emitter::{Artifact, Emitter};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// What one build produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Written files, layers first in configured order, aggregate last.
    pub artifacts: Vec<Artifact>,
    /// Layers whose entry file was missing.
    pub skipped: Vec<String>,
    pub warnings: Vec<Warning>,
}

impl BuildReport {
    pub fn artifact(&self, name: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|artifact| artifact.name == name)
    }
}

/// Creates the output directory if needed. Safe to call when it exists.
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Flattens every configured layer, then the aggregate entry. Layers are
/// independent: a missing or broken one never blocks the others.
pub fn run(settings: &Settings) -> Result<BuildReport> {
    log::info!("Building CSS files...");
    ensure_output_dir(&settings.output_root)?;

    let emitter = Emitter::new(settings);
    let mut diagnostics = Diagnostics::new();
    let mut report = BuildReport::default();

    for layer in &settings.layers {
        match emitter.emit_layer(layer, &mut diagnostics)? {
            Some(artifact) => report.artifacts.push(artifact),
            None => report.skipped.push(layer.clone()),
        }
    }
    report
        .artifacts
        .push(emitter.emit_aggregate(&mut diagnostics)?);

    report.warnings = diagnostics.into_warnings();
    log::info!(
        "CSS build complete! ({} files, {} warnings)",
        report.artifacts.len(),
        report.warnings.len()
    );
    Ok(report)
}
