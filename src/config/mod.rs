// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/homeward

//! Configuration module

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::core::Thresholds;
use crate::server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,

    /// Log level or filter directive, e.g. `info` or `homeward=debug`
    pub log_level: String,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Emergency-return thresholds
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Homeward".to_string(),
            log_level: "info".to_string(),
            server: ServerConfig::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Reject non-finite thresholds
    pub fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("critical_battery", t.critical_battery),
            ("max_distance", t.max_distance),
            ("max_wind", t.max_wind),
        ] {
            if !value.is_finite() {
                return Err(anyhow!("threshold {} must be finite, got {}", name, value));
            }
        }
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| anyhow!("invalid log_level {:?}: {}", self.log_level, e))?;
        Ok(())
    }

    /// Log filter for the subscriber; `--trace` and `--debug` win over `log_level`
    pub fn log_filter(&self, debug: bool, trace: bool) -> Result<EnvFilter> {
        let directive = if trace {
            "trace"
        } else if debug {
            "debug"
        } else {
            self.log_level.as_str()
        };
        EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid log filter {:?}: {}", directive, e))
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("homeward"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::FieldEncoding;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.field_encoding, FieldEncoding::Optional);
        assert_eq!(config.thresholds, Thresholds::default());
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let created = Config::load_or_create(&path).unwrap();
        assert!(path.exists());

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(created, loaded);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\nfield_encoding = \"zero_sentinel\"\n\n[thresholds]\ncritical_battery = 25.0\nmax_distance = 3.0\nmax_wind = 40.0\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.field_encoding, FieldEncoding::ZeroSentinel);
        assert_eq!(config.thresholds.critical_battery, 25.0);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_log_level_drives_filter() {
        let mut config = Config::default();
        config.log_level = "debug".to_string();

        assert_eq!(config.log_filter(false, false).unwrap().to_string(), "debug");
        assert_eq!(config.log_filter(false, true).unwrap().to_string(), "trace");

        config.log_level = "warn".to_string();
        assert_eq!(config.log_filter(true, false).unwrap().to_string(), "debug");
        assert_eq!(config.log_filter(false, false).unwrap().to_string(), "warn");
    }

    #[test]
    fn test_log_level_read_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "log_level = \"homeward=debug\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.log_level, "homeward=debug");
        assert_eq!(config.app_name, "Homeward");
        assert_eq!(config.log_filter(false, false).unwrap().to_string(), "homeward=debug");
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "log_level = \"homeward=loud\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut config = Config::default();
        config.thresholds.max_wind = f64::NAN;
        assert!(config.validate().is_err());
    }
}
