use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the per-user application folder.
pub const APP_DIR_NAME: &str = "Twilight Struggle Helper";

/// Name of the folder the game writes its logs into.
pub const GAME_LOG_DIR_NAME: &str = "Twilight Struggle";

/// Operating system family, as far as path conventions go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
    Unknown,
}

impl Platform {
    /// Detect the current operating system.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "macos" => Platform::MacOS,
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            _ => Platform::Unknown,
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::MacOS => write!(f, "macOS"),
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
            Platform::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Well-known per-user folders as reported by the OS.
///
/// Any of them may be missing; derivation falls back to `home`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirs {
    pub home: PathBuf,
    pub documents: Option<PathBuf>,
    pub desktop: Option<PathBuf>,
    /// Roaming config folder (`%APPDATA%`, `~/.config`).
    pub config: Option<PathBuf>,
    /// Application data folder (`~/Library/Application Support` on macOS).
    pub data: Option<PathBuf>,
}

impl UserDirs {
    /// Query the OS for the current user's folders.
    pub fn from_system() -> Self {
        Self {
            home: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            documents: dirs::document_dir(),
            desktop: dirs::desktop_dir(),
            config: dirs::config_dir(),
            data: dirs::data_dir(),
        }
    }
}

/// Filesystem locations the helper uses, derived from a platform and its user folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub platform: Platform,
    /// Per-user application folder holding the config file and logs.
    pub data_dir: PathBuf,
    /// Where the game writes logs unless the user says otherwise.
    pub default_log_directory: PathBuf,
}

impl AppPaths {
    /// Derive every path for `platform`. Deterministic: same inputs, same paths.
    ///
    /// - Windows: data in `%APPDATA%`, logs under Documents.
    /// - macOS: data in `~/Library/Application Support`, logs under Desktop.
    /// - Linux and others: data in `~/.config`, logs under Desktop.
    pub fn for_platform(platform: Platform, dirs: &UserDirs) -> Self {
        let data_root = match platform {
            Platform::MacOS => dirs
                .data
                .clone()
                .unwrap_or_else(|| dirs.home.join("Library").join("Application Support")),
            Platform::Windows | Platform::Linux | Platform::Unknown => dirs
                .config
                .clone()
                .unwrap_or_else(|| dirs.home.join(".config")),
        };

        let log_root = match platform {
            Platform::Windows => dirs
                .documents
                .clone()
                .unwrap_or_else(|| dirs.home.join("Documents")),
            Platform::MacOS | Platform::Linux | Platform::Unknown => dirs
                .desktop
                .clone()
                .unwrap_or_else(|| dirs.home.join("Desktop")),
        };

        Self {
            platform,
            data_dir: data_root.join(APP_DIR_NAME),
            default_log_directory: log_root.join(GAME_LOG_DIR_NAME),
        }
    }

    /// Paths for the running system.
    pub fn detect() -> Self {
        Self::for_platform(Platform::detect(), &UserDirs::from_system())
    }

    /// Path to the persisted configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    /// Directory for the helper's own log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Replace the data directory, e.g. when the config file location is overridden.
    pub fn with_data_dir(mut self, data_dir: &Path) -> Self {
        self.data_dir = data_dir.to_path_buf();
        self
    }
}
