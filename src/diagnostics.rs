use std::path::PathBuf;
use thiserror::Error;

/// A non-fatal problem found while flattening. Each one degrades to empty
/// content (or a skipped layer) and never stops the build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("File not found: {}", path.display())]
    MissingFile { path: PathBuf },
    #[error("{layer}/{entry} not found")]
    MissingEntry {
        layer: String,
        entry: String,
        path: PathBuf,
    },
    #[error("Could not resolve import: {specifier}")]
    UnresolvableImport { specifier: String, from: PathBuf },
    #[error("Could not read {}: {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },
    #[error("Import depth limit {depth} reached at {}", path.display())]
    DepthLimit { path: PathBuf, depth: usize },
}

/// Collects warnings in the order they were raised and forwards each one to
/// the log as it arrives.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::{Diagnostics, Warning};
    use std::path::PathBuf;

    #[test]
    fn formats_missing_entry_with_layer_relative_name() {
        let warning = Warning::MissingEntry {
            layer: "base".to_string(),
            entry: "_index.css".to_string(),
            path: PathBuf::from("/project/src/css/base/_index.css"),
        };
        assert_eq!(warning.to_string(), "base/_index.css not found");
    }

    #[test]
    fn formats_unresolvable_import_with_specifier() {
        let warning = Warning::UnresolvableImport {
            specifier: "reset-css".to_string(),
            from: PathBuf::from("/project/src/css/base"),
        };
        assert_eq!(warning.to_string(), "Could not resolve import: reset-css");
    }

    #[test]
    fn keeps_warnings_in_raise_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.is_empty());
        diagnostics.warn(Warning::MissingFile {
            path: PathBuf::from("a.css"),
        });
        diagnostics.warn(Warning::MissingFile {
            path: PathBuf::from("b.css"),
        });

        assert_eq!(diagnostics.len(), 2);
        let paths: Vec<_> = diagnostics
            .into_warnings()
            .into_iter()
            .map(|warning| match warning {
                Warning::MissingFile { path } => path,
                other => panic!("unexpected warning {:?}", other),
            })
            .collect();
        assert_eq!(paths, vec![PathBuf::from("a.css"), PathBuf::from("b.css")]);
    }
}
