use std::path::PathBuf;

use crate::domain::{ConfigPatch, Configuration, DomainError};

/// Configuration store port for persisting and loading the user configuration.
pub trait ConfigStore: Send + Sync {
    /// Load configuration from persistent storage.
    ///
    /// Never fails: a missing, unreadable or corrupt file yields defaults, and
    /// each missing key falls back to its own default.
    fn load(&self) -> Configuration;

    /// Overwrite the persisted configuration. Returns false on failure, after
    /// logging the cause.
    fn save(&self, config: &Configuration) -> bool;

    /// Persist and return the all-defaults configuration.
    fn reset(&self) -> Result<Configuration, DomainError>;

    /// Overlay the keys present in `patch` on the current configuration,
    /// persist, and return the result.
    fn update(&self, patch: ConfigPatch) -> Result<Configuration, DomainError>;

    /// Get the path to the configuration file.
    fn config_path(&self) -> PathBuf;

    /// Get the platform default log directory.
    fn default_log_directory(&self) -> PathBuf;
}
