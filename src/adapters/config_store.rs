use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::{AppPaths, ConfigPatch, Configuration, DomainError};
use crate::ports::ConfigStore;

/// JSON-file configuration store with OS-specific paths.
///
/// Holds no configuration in memory: every call goes back to the file, so
/// concurrent writers resolve as last-writer-wins.
pub struct JsonConfigStore {
    config_path: PathBuf,
    default_log_directory: PathBuf,
}

impl JsonConfigStore {
    /// Create a store for the given platform paths.
    /// Ensures the configuration directory exists.
    pub fn new(paths: &AppPaths) -> Result<Self, DomainError> {
        Self::with_paths(paths.config_file(), paths.default_log_directory.clone())
    }

    /// Create a store at an explicit location.
    pub fn with_paths(
        config_path: PathBuf,
        default_log_directory: PathBuf,
    ) -> Result<Self, DomainError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::Config(format!(
                    "Could not create configuration directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        info!(config_path = ?config_path, "ConfigStore initialized");

        Ok(Self {
            config_path,
            default_log_directory,
        })
    }

    fn defaults(&self) -> Configuration {
        Configuration::defaults(&self.default_log_directory)
    }

    fn read(&self, path: &Path) -> Result<Configuration, DomainError> {
        let content = fs::read_to_string(path)?;
        let stored: Value = serde_json::from_str(&content)?;
        Ok(Configuration::merged_over(&stored, self.defaults()))
    }

    fn persist(&self, config: &Configuration) -> Result<(), DomainError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;

        debug!(path = ?self.config_path, "Configuration saved");
        Ok(())
    }

    fn persist_or_fail(&self, config: &Configuration) -> Result<(), DomainError> {
        self.persist(config).map_err(|e| {
            error!(path = ?self.config_path, error = %e, "Error saving config");
            DomainError::ConfigSave(e.to_string())
        })
    }
}

impl ConfigStore for JsonConfigStore {
    fn load(&self) -> Configuration {
        let config_path = self.config_path();

        if !config_path.exists() {
            info!(path = ?config_path, "Configuration file not found, creating default");
            let config = self.defaults();
            if let Err(e) = self.persist(&config) {
                warn!(path = ?config_path, error = %e, "Could not write default configuration");
            }
            return config;
        }

        match self.read(&config_path) {
            Ok(config) => {
                debug!(path = ?config_path, config = ?config, "Configuration loaded");
                config
            }
            Err(e) => {
                error!(path = ?config_path, error = %e, "Error loading config, using defaults");
                self.defaults()
            }
        }
    }

    fn save(&self, config: &Configuration) -> bool {
        match self.persist(config) {
            Ok(()) => true,
            Err(e) => {
                error!(path = ?self.config_path, error = %e, "Error saving config");
                false
            }
        }
    }

    fn reset(&self) -> Result<Configuration, DomainError> {
        let config = self.defaults();
        self.persist_or_fail(&config)?;
        info!("Configuration reset to defaults");
        Ok(config)
    }

    fn update(&self, patch: ConfigPatch) -> Result<Configuration, DomainError> {
        let mut config = self.load();
        config.apply(patch, &self.default_log_directory);
        self.persist_or_fail(&config)?;
        info!(config = ?config, "Configuration updated");
        Ok(config)
    }

    fn config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_log_directory(&self) -> PathBuf {
        self.default_log_directory.clone()
    }
}
