use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::app::parse_adapter;
use crate::app::status::{StatusReport, StatusState};
use crate::domain::{ConfigPatch, Configuration, DomainError, Platform};
use crate::ports::{ConfigStore, GameLogParser, LogResolver};

/// Composes configuration, log resolution and parsing into the externally
/// visible operations.
///
/// Stateless: every call reloads the configuration and rescans the log
/// directory.
pub struct StatusService {
    config_store: Arc<dyn ConfigStore>,
    resolver: Arc<dyn LogResolver>,
    parser: Arc<dyn GameLogParser>,
    platform: Platform,
}

/// Snapshot of what the helper sees on disk, for troubleshooting.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub log_dir_exists: bool,
    pub log_dir_path: String,
    pub platform: String,
    pub documents_path: String,
    pub config_file_path: String,
    pub current_config: Configuration,
    pub log_files_found: usize,
    pub log_files: Vec<String>,
}

impl StatusService {
    pub fn new(
        config_store: Arc<dyn ConfigStore>,
        resolver: Arc<dyn LogResolver>,
        parser: Arc<dyn GameLogParser>,
    ) -> Self {
        Self {
            config_store,
            resolver,
            parser,
            platform: Platform::detect(),
        }
    }

    /// Report a different platform in diagnostics.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Current game status. Never fails: every outcome is a well-formed report.
    pub fn current_status(&self) -> StatusReport {
        debug!("Received request for current status");

        match panic::catch_unwind(AssertUnwindSafe(|| self.compose_status())) {
            Ok(report) => report,
            Err(_) => {
                error!("Status request panicked");
                StatusReport::parse_failure("Internal error while reading game status")
            }
        }
    }

    fn compose_status(&self) -> StatusReport {
        let config = self.config_store.load();

        let path = match self.resolver.resolve(&config) {
            Ok(path) => path,
            Err(e) => {
                error!(error = %e, "Could not resolve log file");
                return StatusReport::unresolved(&e);
            }
        };

        let report = parse_adapter::parse_log(self.parser.as_ref(), &path);
        if report.state == StatusState::Ok {
            info!(
                filename = ?report.status.filename,
                turn = ?report.status.turn,
                deck = report.status.deck.len(),
                "Game status read"
            );
        }
        report
    }

    /// Get the current configuration.
    pub fn config(&self) -> Configuration {
        self.config_store.load()
    }

    /// Update the configuration with the keys present in `patch`.
    pub fn update_config(&self, patch: ConfigPatch) -> Result<Configuration, DomainError> {
        self.config_store.update(patch)
    }

    /// Reset the configuration to defaults.
    pub fn reset_config(&self) -> Result<Configuration, DomainError> {
        self.config_store.reset()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        let config = self.config_store.load();
        let log_dir = config.log_directory_path();
        let log_files: Vec<String> = self
            .resolver
            .list_logs(&config)
            .iter()
            .map(|p| p.to_string_lossy().to_string())
            .collect();

        Diagnostics {
            log_dir_exists: log_dir.exists(),
            log_dir_path: log_dir.to_string_lossy().to_string(),
            platform: self.platform.to_string(),
            documents_path: display(self.config_store.default_log_directory()),
            config_file_path: display(self.config_store.config_path()),
            current_config: config,
            log_files_found: log_files.len(),
            log_files,
        }
    }
}

fn display(path: PathBuf) -> String {
    path.to_string_lossy().to_string()
}
