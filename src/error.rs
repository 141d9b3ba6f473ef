use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop the tool. Resolution problems are never reported
/// here; they surface as [`crate::diagnostics::Warning`] instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutputDir { path: PathBuf, source: io::Error },
    #[error("failed to write {}: {source}", path.display())]
    WriteArtifact { path: PathBuf, source: io::Error },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
