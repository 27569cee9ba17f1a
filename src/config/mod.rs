//! Configuration module
//!
//! Handles loading and managing configuration. The supervisor core treats
//! configuration as an external collaborator: it receives a ready-to-use
//! [`AppConfig`] and only echoes it for diagnostics.

pub mod env;
mod file;

pub use env::{EnvBuilder, EnvConfig, EnvGuard};
pub use file::ConfigFile;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Run timeout in seconds used when the caller supplies none
    pub default_timeout_secs: u64,

    /// Watchdog tick interval in milliseconds
    pub tick_interval_ms: u64,

    /// Default output format for verdicts (text, json, json-pretty)
    pub default_format: String,

    /// Enable debug logging
    pub debug: bool,

    /// Enable trace logging (echoes the resolved configuration)
    pub trace: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: 5,
            tick_interval_ms: 1000,
            default_format: "text".to_string(),
            debug: false,
            trace: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let config: Self = if path
            .as_ref()
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = if path
            .as_ref()
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Overlay environment-variable settings on top of this config.
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(timeout) = env.timeout {
            self.default_timeout_secs = timeout;
        }
        if let Some(tick_ms) = env.tick_ms {
            self.tick_interval_ms = tick_ms;
        }
        if let Some(format) = &env.format {
            self.default_format = format.clone();
        }
        if let Some(debug) = env.debug {
            self.debug = debug;
        }
        if let Some(trace) = env.trace {
            self.trace = trace;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.default_timeout_secs, 5);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.default_format, "text");
        assert!(!config.debug);
        assert!(!config.trace);
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut config = AppConfig::default();
        let env = EnvConfig {
            timeout: Some(30),
            trace: Some(true),
            ..Default::default()
        };

        config.apply_env(&env);

        assert_eq!(config.default_timeout_secs, 30);
        assert!(config.trace);
        // Untouched fields keep their defaults.
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn test_save_and_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runguard.yaml");

        let mut config = AppConfig::default();
        config.default_timeout_secs = 42;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.default_timeout_secs, 42);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runguard.json");

        let mut config = AppConfig::default();
        config.debug = true;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert!(loaded.debug);
    }
}
