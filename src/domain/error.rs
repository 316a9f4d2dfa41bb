use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors for the helper backend.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration: {0}")]
    ConfigSave(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("{0}")]
    Parser(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

/// Why no log file could be chosen for the current request.
///
/// The two cases are shown to the user with different guidance, so the
/// messages must stay distinct.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// An override is configured but its target does not exist.
    #[error("Configured log file not found: {filename}")]
    ConfiguredFileMissing { filename: String, path: PathBuf },

    /// No override, and the log directory is missing or holds no log files.
    #[error("No log files found in Twilight Struggle directory")]
    NoLogFiles { directory: PathBuf },
}

impl ResolveError {
    /// Filename to report alongside the error, if any.
    pub fn filename(&self) -> Option<&str> {
        match self {
            ResolveError::ConfiguredFileMissing { filename, .. } => Some(filename),
            ResolveError::NoLogFiles { .. } => None,
        }
    }
}
