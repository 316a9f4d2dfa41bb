use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, error, info};

use crate::domain::{Configuration, ResolveError};
use crate::ports::LogResolver;

/// Extension of the game's log files.
pub const LOG_EXTENSION: &str = "txt";

/// Resolves the current log from the filesystem.
///
/// Precedence:
/// 1. A configured override, absolute or relative to the log directory. If it
///    does not exist, resolution fails; the directory is not scanned.
/// 2. Otherwise, the most recently modified log in the directory. Ties on
///    modification time go to the greatest path.
pub struct DirectoryLogResolver {
    extension: String,
}

impl DirectoryLogResolver {
    pub fn new() -> Self {
        Self::with_extension(LOG_EXTENSION)
    }

    pub fn with_extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn is_log_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn resolve_override(
        &self,
        name: &str,
        config: &Configuration,
    ) -> Result<PathBuf, ResolveError> {
        let candidate = Path::new(name);
        let path = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            config.log_directory_path().join(candidate)
        };

        debug!(path = ?path, "Resolved configured log file");

        if path.exists() {
            info!(path = ?path, "Using configured log file");
            Ok(path)
        } else {
            error!(path = ?path, "Configured log file not found");
            let filename = candidate
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| name.to_string());
            Err(ResolveError::ConfiguredFileMissing { filename, path })
        }
    }

    /// Candidate logs with their modification times. Unreadable entries are skipped.
    fn scan(&self, directory: &Path) -> Vec<(PathBuf, SystemTime)> {
        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(directory = ?directory, error = %e, "Cannot read log directory");
                return Vec::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if !self.is_log_file(&path) {
                    return None;
                }
                let metadata = fs::metadata(&path).ok()?;
                if !metadata.is_file() {
                    return None;
                }
                let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                Some((path, modified))
            })
            .collect()
    }
}

impl Default for DirectoryLogResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LogResolver for DirectoryLogResolver {
    fn resolve(&self, config: &Configuration) -> Result<PathBuf, ResolveError> {
        if let Some(name) = config.override_name() {
            return self.resolve_override(name, config);
        }

        let directory = config.log_directory_path();
        debug!(directory = ?directory, "No log file configured, using most recent");

        if !directory.is_dir() {
            error!(directory = ?directory, "Log directory not found");
            return Err(ResolveError::NoLogFiles { directory });
        }

        let latest = self
            .scan(&directory)
            .into_iter()
            .max_by(|(a_path, a_time), (b_path, b_time)| {
                a_time.cmp(b_time).then_with(|| a_path.cmp(b_path))
            });

        match latest {
            Some((path, _)) => {
                info!(path = ?path, "Found latest log file");
                Ok(path)
            }
            None => {
                error!(directory = ?directory, "No log files found in log directory");
                Err(ResolveError::NoLogFiles { directory })
            }
        }
    }

    fn list_logs(&self, config: &Configuration) -> Vec<PathBuf> {
        let mut logs: Vec<PathBuf> = self
            .scan(&config.log_directory_path())
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        logs.sort();
        logs
    }
}
