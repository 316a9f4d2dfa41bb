use std::path::PathBuf;

use crate::domain::{Configuration, ResolveError};

/// Port for choosing which log file represents the current game.
pub trait LogResolver: Send + Sync {
    /// Resolve the log file for `config`.
    ///
    /// An override that points nowhere is an error in its own right; it never
    /// falls back to scanning the directory.
    fn resolve(&self, config: &Configuration) -> Result<PathBuf, ResolveError>;

    /// List every candidate log file in `config`'s directory, sorted by path.
    ///
    /// A missing directory yields an empty list.
    fn list_logs(&self, config: &Configuration) -> Vec<PathBuf>;
}
