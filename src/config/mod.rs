//! Engine configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `OUTRANK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use outrank::config::EngineConfig;
//!
//! let config = EngineConfig::load_validated(None).expect("Invalid configuration");
//!
//! println!("Cut tolerance: {}", config.tolerances.cut);
//! ```

mod error;
mod sorting;

pub use error::{ConfigError, ConfigValidationError};
pub use sorting::SortingConfig;

use serde::Deserialize;
use std::path::Path;

use crate::domain::foundation::Tolerances;
use crate::domain::sorting::SortingEngine;

/// Root engine configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Numeric tolerances shared by every computation
    #[serde(default)]
    pub tolerances: Tolerances,

    /// Sorting pipeline settings
    #[serde(default)]
    pub sorting: SortingConfig,

    /// Log filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present
    /// 2. Reads environment variables with `OUTRANK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `OUTRANK__TOLERANCES__CUT=1e-4` -> `tolerances.cut = 0.0001`
    /// - `OUTRANK__SORTING__MODE=pessimistic` -> `sorting.mode = Pessimistic`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from a TOML or JSON file, environment variables
    /// taking precedence.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration from `path` if given, else from the environment
    /// only, and validate it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if loading fails and
    /// `ConfigError::ValidationFailed` if a value is out of range.
    pub fn load_validated(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::load()?,
        };
        config.validate()?;
        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::default()
            .prefix("OUTRANK")
            .separator("__")
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` for negative or non-finite tolerances
    /// and for an empty log level.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.tolerances
            .validate()
            .map_err(|e| ConfigValidationError::InvalidTolerance(e.to_string()))?;
        if self.log_level.trim().is_empty() {
            return Err(ConfigValidationError::EmptyLogLevel);
        }
        Ok(())
    }

    /// Sorting engine built from the tolerances and sorting sections
    pub fn sorting_engine(&self) -> SortingEngine {
        self.sorting.engine(self.tolerances)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            sorting: SortingConfig::default(),
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sorting::SortingMode;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("OUTRANK__TOLERANCES__CUT");
        env::remove_var("OUTRANK__TOLERANCES__BINARY");
        env::remove_var("OUTRANK__SORTING__MODE");
        env::remove_var("OUTRANK__SORTING__SHARP_VETOES");
        env::remove_var("OUTRANK__LOG_LEVEL");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = EngineConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.tolerances, Tolerances::default());
        assert!(config.sorting.sharp_vetoes);
        assert_eq!(config.sorting.mode, SortingMode::Both);
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_load_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("OUTRANK__TOLERANCES__CUT", "0.0001");
        env::set_var("OUTRANK__SORTING__MODE", "pessimistic");
        env::set_var("OUTRANK__SORTING__SHARP_VETOES", "false");
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.tolerances.cut, 0.0001);
        assert_eq!(config.tolerances.binary, 1e-3);
        assert_eq!(config.sorting.mode, SortingMode::Pessimistic);
        assert!(!config.sorting.sharp_vetoes);
    }

    #[test]
    fn test_validate_rejects_negative_tolerance() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("OUTRANK__TOLERANCES__BINARY", "-0.5");
        let result = EngineConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn test_load_validated_reports_validation_failure() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("OUTRANK__TOLERANCES__CUT", "-1e-3");
        let result = EngineConfig::load_validated(None);
        clear_env();

        match result {
            Err(ConfigError::ValidationFailed(ConfigValidationError::InvalidTolerance(reason))) => {
                assert!(reason.contains("cut"), "unexpected reason: {}", reason);
            }
            other => panic!("expected a validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_load_validated_reads_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "log_level = \"warn\"").unwrap();

        let config = EngineConfig::load_validated(Some(file.path())).unwrap();
        assert_eq!(config.log_level, "warn");

        let mut empty_level = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(empty_level, "log_level = \"\"").unwrap();
        assert!(matches!(
            EngineConfig::load_validated(Some(empty_level.path())),
            Err(ConfigError::ValidationFailed(ConfigValidationError::EmptyLogLevel))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_log_level() {
        let config = EngineConfig {
            log_level: "  ".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyLogLevel)
        ));
    }

    #[test]
    fn test_load_from_toml_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\njson_logs = true\n\n[tolerances]\ncut = 0.01\n\n[sorting]\nmode = \"optimistic\""
        )
        .unwrap();

        let config = EngineConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.json_logs);
        assert_eq!(config.tolerances.cut, 0.01);
        assert_eq!(config.tolerances.cut_rounding, 1e-6);
        assert_eq!(config.sorting.mode, SortingMode::Optimistic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{ "sorting": {{ "mode": "optimistic" }} }}"#).unwrap();
        env::set_var("OUTRANK__SORTING__MODE", "pessimistic");
        let result = EngineConfig::load_from_file(file.path());
        clear_env();

        assert_eq!(result.unwrap().sorting.mode, SortingMode::Pessimistic);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let result = EngineConfig::load_from_file(Path::new("/nonexistent/outrank.toml"));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
