//! Configuration management
//!
//! Read from `settings.json` in the data directory:
//! ```json
//! {
//!   "hasher": "sha256",
//!   "argon2": { "timeCost": 3, "memoryCost": 65536, "parallelism": 4 },
//!   "log": { "level": "info", "format": "pretty" }
//! }
//! ```
//! Every key is optional. Keys this crate does not know are kept on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::services::logging::LogFormat;

/// Default Argon2id parameters
const DEFAULT_TIME_COST: u32 = 3;
const DEFAULT_MEMORY_COST: u32 = 65536; // 64 MiB
const DEFAULT_PARALLELISM: u32 = 4;

/// Which credential hasher new and existing users are checked with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Sha256,
    Argon2,
}

impl HasherKind {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "sha256" => Some(HasherKind::Sha256),
            "argon2" | "argon2id" => Some(HasherKind::Argon2),
            _ => None,
        }
    }
}

/// Argon2id cost parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Argon2Settings {
    pub time_cost: u32,
    pub memory_cost: u32,
    pub parallelism: u32,
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    hasher: HasherKind,
    #[serde(default)]
    argon2: Argon2Settings,
    #[serde(default)]
    log: LogSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Bankbook configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub hasher: HasherKind,
    pub argon2: Argon2Settings,
    pub log: LogSettings,
    // Keep the raw settings for preservation when saving
    _raw_settings: SettingsFile,
}

impl Config {
    /// Load config from the data directory
    ///
    /// A missing or malformed settings file yields the defaults.
    /// `BANKBOOK_HASHER` and `BANKBOOK_LOG_FORMAT` override the file.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let settings_path = data_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %settings_path.display(),
                    error = %e,
                    "settings file is malformed; using defaults"
                );
                SettingsFile::default()
            })
        } else {
            SettingsFile::default()
        };

        let hasher = std::env::var("BANKBOOK_HASHER")
            .ok()
            .and_then(|v| HasherKind::from_env_value(&v))
            .unwrap_or(raw.hasher);

        let mut log = raw.log.clone();
        if let Ok(format) = std::env::var("BANKBOOK_LOG_FORMAT") {
            log.format = LogFormat::from_str_lossy(&format);
        }

        Ok(Self {
            hasher,
            argon2: raw.argon2.clone(),
            log,
            _raw_settings: raw,
        })
    }

    /// Save config to the data directory
    /// Preserves other settings this crate doesn't manage
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let settings_path = data_dir.join("settings.json");

        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        settings.hasher = self.hasher;
        settings.argon2 = self.argon2.clone();
        settings.log = self.log.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.argon2, Argon2Settings::default());
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.argon2, Argon2Settings::default());
    }

    #[test]
    fn test_partial_file_and_unknown_keys_preserved() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "argon2": { "timeCost": 2, "memoryCost": 4096, "parallelism": 1 }, "theme": "dark" }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.argon2.time_cost, 2);
        assert_eq!(config.argon2.memory_cost, 4096);

        config.save(dir.path()).unwrap();
        let saved = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(value["theme"], "dark");
        assert_eq!(value["argon2"]["timeCost"], 2);
    }

    #[test]
    fn test_hasher_env_values() {
        assert_eq!(HasherKind::from_env_value("ARGON2"), Some(HasherKind::Argon2));
        assert_eq!(HasherKind::from_env_value(" sha256 "), Some(HasherKind::Sha256));
        assert_eq!(HasherKind::from_env_value("md5"), None);
    }

    #[test]
    fn test_partial_argon2_block_keeps_hasher() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("settings.json"),
            r#"{ "hasher": "argon2", "argon2": { "timeCost": 2 } }"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.hasher, HasherKind::Argon2);
        assert_eq!(config.argon2.time_cost, 2);
        assert_eq!(config.argon2.memory_cost, Argon2Settings::default().memory_cost);
        assert_eq!(config.argon2.parallelism, Argon2Settings::default().parallelism);
    }
}
