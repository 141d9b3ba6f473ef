use crate::config::Settings;
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::locator::Locator;
use crate::resolver::Resolver;
use std::fs;
use std::path::{Path, PathBuf};

/// A flattened stylesheet written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub name: String,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Writes one output file per layer entry plus the aggregate entry.
#[derive(Debug, Clone)]
pub struct Emitter {
    resolver: Resolver,
    settings: Settings,
}

impl Emitter {
    pub fn new(settings: &Settings) -> Self {
        Self {
            resolver: Resolver::new(
                Locator::new(&settings.dependency_root),
                settings.max_depth,
            ),
            settings: settings.clone(),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Flattens `<source>/<layer>/_index.css` into `<output>/<layer>.css`.
    /// Returns `None` without writing anything when the entry is missing.
    pub fn emit_layer(
        &self,
        layer: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<Option<Artifact>> {
        let entry = self.settings.layer_entry_path(layer);
        if !entry.is_file() {
            diagnostics.warn(Warning::MissingEntry {
                layer: layer.to_string(),
                entry: self.settings.layer_entry.clone(),
                path: entry,
            });
            return Ok(None);
        }

        let css = self.resolver.flatten(&entry, diagnostics);
        self.write(&format!("{}.css", layer), &css).map(Some)
    }

    /// Flattens the top-level entry into `<output>/index.css`. A missing
    /// entry still produces an (empty) artifact.
    pub fn emit_aggregate(&self, diagnostics: &mut Diagnostics) -> Result<Artifact> {
        let entry = self.settings.aggregate_entry_path();
        let css = self.resolver.flatten(&entry, diagnostics);
        let name = Path::new(&self.settings.aggregate_entry)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "index.css".to_string());
        self.write(&name, &css)
    }

    fn write(&self, name: &str, css: &str) -> Result<Artifact> {
        let path = self.settings.output_root.join(name);
        fs::write(&path, css).map_err(|source| Error::WriteArtifact {
            path: path.clone(),
            source,
        })?;
        log::info!("Built: {}", name);
        Ok(Artifact {
            name: name.to_string(),
            path,
            bytes: css.len(),
        })
    }
}
