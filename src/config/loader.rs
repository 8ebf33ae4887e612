//! Configuration loading
//!
//! Precedence order (highest to lowest):
//! 1. Environment variable overrides
//! 2. `config.yaml` in the config directory
//! 3. Built-in defaults

use super::{paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with all layers merged
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Config> {
        let path = paths::root_config_path();
        let config = if path.exists() {
            Self::load_file(&path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };
        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate a configuration file
    ///
    /// Fails on invalid YAML, invalid value types, an unknown start view or a
    /// zero tick interval.
    pub fn validate(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            Self::load_defaults()
        };

        config
            .ui
            .start_view
            .parse::<crate::models::ViewId>()
            .map_err(|e| anyhow::anyhow!("ui.startView: {}", e))?;

        if config.ui.tick_interval_ms == 0 {
            anyhow::bail!("ui.tickIntervalMs must be greater than zero");
        }

        Ok(config)
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(user) = lookup("LAZYSTACK_SSH_USER") {
            config.ssh.user = user;
        }

        if let Some(view) = lookup("LAZYSTACK_START_VIEW") {
            config.ui.start_view = view;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.ui.start_view, "servers");
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigLoader::apply_overrides(Config::default(), |key| match key {
            "LAZYSTACK_SSH_USER" => Some("centos".to_string()),
            "LAZYSTACK_START_VIEW" => Some("dns".to_string()),
            _ => None,
        });

        assert_eq!(config.ssh.user, "centos");
        assert_eq!(config.ui.start_view, "dns");
    }

    #[test]
    fn test_validate_rejects_unknown_start_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "ui:\n  startView: instances\n").unwrap();

        let err = ConfigLoader::validate(&path).unwrap_err();
        assert!(err.to_string().contains("ui.startView"));
    }

    #[test]
    fn test_validate_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "ui: [unclosed\n").unwrap();

        assert!(ConfigLoader::validate(&path).is_err());
    }

    #[test]
    fn test_validate_missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigLoader::validate(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
