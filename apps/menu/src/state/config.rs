//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Config file (`config.toml`, explicit path or the platform config dir)
//! 2. Defaults (this file)
//!
//! ```toml
//! # ~/.config/menu/config.toml (Linux)
//! currency_symbol = "грн"
//! migration_policy = "destructive"
//! log_filter = "info,pizzeria=debug,sqlx=warn"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use pizzeria_db::{DbConfig, MigrationPolicy, DEFAULT_DATABASE_FILE};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info,pizzeria=debug,sqlx=warn";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the platform application directory")]
    NoProjectDir,
}

/// Application configuration.
///
/// Every field has a default, so a partial (or missing) file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Explicit database file. `None` uses the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Currency shown after prices in the list (`"150.00 грн"`).
    pub currency_symbol: String,

    /// What to do with a store written by another schema version.
    pub migration_policy: MigrationPolicy,

    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Database: platform data dir / `pizzeria.db`
    /// - Currency: грн
    /// - Migration: destructive
    fn default() -> Self {
        ConfigState {
            database_path: None,
            currency_symbol: "грн".to_string(),
            migration_policy: MigrationPolicy::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(ConfigState::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ConfigState = toml::from_str(&text)?;
        config.validate()?;

        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Loads `config.toml` from the platform config directory.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.pizzeria.menu/config.toml`
    /// - **Windows**: `%APPDATA%\pizzeria\menu\config\config.toml`
    /// - **Linux**: `~/.config/menu/config.toml`
    pub fn load_default() -> Result<Self, ConfigError> {
        let dirs = project_dirs()?;
        ConfigState::load(&dirs.config_dir().join(CONFIG_FILE))
    }

    /// Writes the configuration as pretty TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Rejects values the app cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolves the database file, creating the data directory if needed.
    pub fn resolve_database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Io {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DEFAULT_DATABASE_FILE))
    }

    /// Builds the store configuration.
    pub fn db_config(&self) -> Result<DbConfig, ConfigError> {
        Ok(DbConfig::new(self.resolve_database_path()?).migration_policy(self.migration_policy))
    }

    /// Formats a price for the list row.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(150.0), "150.00 грн");
    /// ```
    pub fn format_price(&self, price: f64) -> String {
        format!("{:.2} {}", price, self.currency_symbol)
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "pizzeria", "menu").ok_or(ConfigError::NoProjectDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        let config = ConfigState::default();
        assert_eq!(config.format_price(150.0), "150.00 грн");
        assert_eq!(config.format_price(189.5), "189.50 грн");
        assert_eq!(config.format_price(0.999), "1.00 грн");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "currency_symbol = \"UAH\"\nmigration_policy = \"strict\"\n").unwrap();

        let config = ConfigState::load(&path).unwrap();
        assert_eq!(config.currency_symbol, "UAH");
        assert_eq!(config.migration_policy, MigrationPolicy::Strict);
        assert_eq!(config.database_path, None);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        let config = ConfigState {
            database_path: Some(dir.path().join("menu.db")),
            currency_symbol: "€".to_string(),
            ..ConfigState::default()
        };
        config.save(&path).unwrap();

        assert_eq!(ConfigState::load(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_blank_currency() {
        let config = ConfigState {
            currency_symbol: "  ".to_string(),
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "theme = \"dark\"\ncurrency_symbol = \"UAH\"\n").unwrap();

        let config = ConfigState::load(&path).unwrap();
        assert_eq!(config.currency_symbol, "UAH");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "migration_policy = \"sometimes\"").unwrap();

        assert!(matches!(
            ConfigState::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_explicit_database_path_is_used() {
        let config = ConfigState {
            database_path: Some(PathBuf::from("/tmp/menu.db")),
            migration_policy: MigrationPolicy::Strict,
            ..ConfigState::default()
        };

        let db_config = config.db_config().unwrap();
        assert_eq!(db_config.database_path, PathBuf::from("/tmp/menu.db"));
        assert_eq!(db_config.migration_policy, MigrationPolicy::Strict);
    }
}
