//! Application configuration.
//!
//! The configuration is loaded from `$XDG_CONFIG_HOME/nirimatic/config.json`
//! (or the path passed with `--config <path>`).  It only tunes the dashboard
//! itself; the niri settings nirimatic edits live in niri's own
//! `config.kdl`.
//!
//! # Example
//!
//! ```json
//! {
//!   "niri_config": "/home/me/dotfiles/niri/config.kdl",
//!   "services": ["niri", "noctalia-shell", "stasis"],
//!   "refresh_interval_secs": 5
//! }
//! ```

use crate::niri::default_config_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
///
/// Every field is optional: a minimal `{}` file is valid and all fields
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the niri config file to edit.  Defaults to
    /// `$XDG_CONFIG_HOME/niri/config.kdl`.
    pub niri_config: Option<PathBuf>,
    /// Services shown on the dashboard, in display order.
    pub services: Vec<String>,
    /// How often the dashboard re-checks service status (seconds).
    /// Values below `1` are treated as `1`.
    pub refresh_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            niri_config: None,
            services: vec!["niri".into(), "noctalia-shell".into(), "stasis".into()],
            refresh_interval_secs: 5,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }

    /// The niri config file to edit.
    pub fn niri_config_path(&self) -> PathBuf {
        self.niri_config.clone().unwrap_or_else(default_config_path)
    }

    /// Interval between service status refreshes.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);

/// `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`.
pub fn config_home() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Resolve the nirimatic config directory (`$XDG_CONFIG_HOME/nirimatic`).
pub fn config_dir() -> PathBuf {
    config_home().join("nirimatic")
}

/// Resolve the nirimatic state directory (`$XDG_STATE_HOME/nirimatic`),
/// where the log file is written.
pub fn state_dir() -> PathBuf {
    xdg_dir("XDG_STATE_HOME", ".local/state").join("nirimatic")
}

fn xdg_dir(var: &str, fallback: &str) -> PathBuf {
    match std::env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
            PathBuf::from(home).join(fallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_config() {
        let json = r#"{
            "niri_config": "/etc/niri/config.kdl",
            "services": ["niri", "waybar"],
            "refresh_interval_secs": 10
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.niri_config_path(), PathBuf::from("/etc/niri/config.kdl"));
        assert_eq!(cfg.services, vec!["niri", "waybar"]);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(10));
    }

    #[test]
    fn deserialize_empty_uses_defaults() {
        let cfg: Config = serde_json::from_str("{}").unwrap();
        let d = Config::default();
        assert_eq!(cfg.niri_config, None);
        assert_eq!(cfg.services, d.services);
        assert_eq!(cfg.refresh_interval_secs, d.refresh_interval_secs);
        assert_eq!(cfg.niri_config_path(), default_config_path());
    }

    #[test]
    fn zero_interval_is_clamped() {
        let cfg: Config = serde_json::from_str(r#"{ "refresh_interval_secs": 0 }"#).unwrap();
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(1));
    }

    #[test]
    fn unknown_top_level_keys_ignored() {
        let json = r#"{ "services": [], "future_section": { "key": 42 } }"#;
        // Should not fail: unknown keys are silently ignored.
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert!(cfg.services.is_empty());
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("config error: failed to parse"), "{}", msg);
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
