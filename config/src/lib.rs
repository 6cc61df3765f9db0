//! # Configuration Management for Viewsmith
//!
//! This crate provides the configuration structures that control how view queries
//! are rendered.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::BuilderConfig;
//!
//! let builder_config = BuilderConfig::new(true, true, 5);
//! assert_eq!(builder_config.head_rows, 5);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [builder]
//! escape_embedded_quotes = true
//! strict_aliases = true
//! head_rows = 5
//! ```
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from VIEWSMITH_CONFIG or ./viewsmith.toml, falling back to defaults
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "./viewsmith.toml";
const CONFIG_PATH_VAR: &str = "VIEWSMITH_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub builder: BuilderConfig,
}

/// View query rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Double `"` characters inside quoted identifiers
    pub escape_embedded_quotes: bool,
    /// Reject explicit column aliases that are not bare identifiers
    pub strict_aliases: bool,
    /// Row count used by head queries when none is given
    pub head_rows: u64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            escape_embedded_quotes: true,
            strict_aliases: true,
            head_rows: 5,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named by `VIEWSMITH_CONFIG` (also read
    /// from `.env`), then `./viewsmith.toml`, otherwise defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, the variable may come from the environment
        let _ = dotenvy::dotenv();

        let config = match env::var(CONFIG_PATH_VAR) {
            Ok(config_path) => Self::from_file(&config_path)?,
            Err(env::VarError::NotPresent) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(env::VarError::NotPresent) => Self::default(),
            Err(err) => return Err(err.into()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.builder.head_rows == 0 {
            return Err(ConfigError::Invalid(
                "Builder head_rows must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl BuilderConfig {
    /// Create a new builder configuration
    pub fn new(escape_embedded_quotes: bool, strict_aliases: bool, head_rows: u64) -> Self {
        Self {
            escape_embedded_quotes,
            strict_aliases,
            head_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.builder.escape_embedded_quotes);
        assert!(config.builder.strict_aliases);
        assert_eq!(config.builder.head_rows, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = AppConfig::from_toml(
            r#"
            [builder]
            escape_embedded_quotes = false
            strict_aliases = true
            head_rows = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.builder, BuilderConfig::new(false, true, 20));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml("[builder]\nhead_rows = 3\n").unwrap();
        assert_eq!(config.builder, BuilderConfig::new(true, true, 3));

        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        let result = AppConfig::from_toml("[builder]\nhead_rows = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = AppConfig::from_toml("[builder]\nhead_rows = \"five\"\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = AppConfig::from_file("./does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
