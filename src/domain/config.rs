use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// User configuration: which log file to read, and where to look for it.
///
/// Serialized with the keys `log_file_path` and `log_directory`, both on disk
/// and over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Absolute path or bare filename of the log to read.
    /// None means "pick the most recent log automatically".
    #[serde(rename = "log_file_path")]
    pub log_file_override: Option<String>,
    /// Directory scanned for logs, and against which a bare override is resolved.
    pub log_directory: String,
}

impl Configuration {
    /// All-defaults configuration for the given default log directory.
    pub fn defaults(default_log_directory: &Path) -> Self {
        Self {
            log_file_override: None,
            log_directory: default_log_directory.to_string_lossy().to_string(),
        }
    }

    /// Merge a persisted JSON document over `defaults`, key by key.
    ///
    /// A key is taken from the document only if it has the expected type;
    /// anything else keeps the default. Unknown keys are ignored.
    pub fn merged_over(stored: &Value, defaults: Configuration) -> Self {
        let Some(map) = stored.as_object() else {
            return defaults;
        };

        let log_file_override = match map.get("log_file_path") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => defaults.log_file_override,
        };

        let log_directory = match map.get("log_directory") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => defaults.log_directory,
        };

        Self {
            log_file_override,
            log_directory,
        }
    }

    /// The override, if one is set. An empty string counts as unset.
    pub fn override_name(&self) -> Option<&str> {
        self.log_file_override.as_deref().filter(|s| !s.is_empty())
    }

    pub fn log_directory_path(&self) -> PathBuf {
        PathBuf::from(&self.log_directory)
    }

    /// Overlay the keys present in `patch`.
    ///
    /// A null `log_directory` restores `default_log_directory` so the
    /// directory is never left unset.
    pub fn apply(&mut self, patch: ConfigPatch, default_log_directory: &Path) {
        if let Some(log_file_override) = patch.log_file_override {
            self.log_file_override = log_file_override;
        }

        if let Some(log_directory) = patch.log_directory {
            self.log_directory = match log_directory {
                Some(dir) if !dir.is_empty() => dir,
                _ => default_log_directory.to_string_lossy().to_string(),
            };
        }
    }
}

/// Partial configuration update.
///
/// The outer `Option` records whether the key was sent at all; the inner one
/// whether it was sent as `null`. Unrecognized keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, rename = "log_file_path", deserialize_with = "present")]
    pub log_file_override: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub log_directory: Option<Option<String>>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.log_file_override.is_none() && self.log_directory.is_none()
    }
}

/// Marks a field as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
