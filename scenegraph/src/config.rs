//! Configuration types for hierarchy propagation

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Errors that can occur while loading a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error when reading the file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// When structural contract checks run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Trust the hierarchy arrays, never check
    Never,
    /// Check only in builds with `debug_assertions`
    #[default]
    DebugOnly,
    /// Always check, including release builds
    Always,
}

impl Validation {
    /// Whether checks are active in this build
    pub fn enabled(self) -> bool {
        match self {
            Validation::Never => false,
            Validation::DebugOnly => cfg!(debug_assertions),
            Validation::Always => true,
        }
    }
}

/// Configuration for the propagation engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Contract checks on hierarchy arrays and command targets
    pub validation: Validation,
    /// Custom logging filter (None = default)
    pub log_filter: Option<String>,
}

impl HierarchyConfig {
    /// Parse a configuration from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: HierarchyConfig = serde_json::from_str(json)?;
        debug!(validation = ?config.validation, log_filter = ?config.log_filter, "Parsed HierarchyConfig");
        Ok(config)
    }

    /// Load a configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!(path = ?path, "Loading HierarchyConfig");
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Install a tracing subscriber using this configuration's filter
    pub fn init_logging(&self) {
        crate::init_logging_with(self.log_filter.as_deref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = HierarchyConfig::default();
        assert_eq!(config.validation, Validation::DebugOnly);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_validation_enabled() {
        assert!(!Validation::Never.enabled());
        assert!(Validation::Always.enabled());
        assert_eq!(Validation::DebugOnly.enabled(), cfg!(debug_assertions));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = HierarchyConfig::from_json_str(r#"{ "validation": "always" }"#).unwrap();
        assert_eq!(config.validation, Validation::Always);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = HierarchyConfig::from_json_str(r#"{ "validation": "sometimes" }"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "validation": "never", "log_filter": "scenegraph=trace" }}"#
        )
        .unwrap();

        let config = HierarchyConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.validation, Validation::Never);
        assert_eq!(config.log_filter.as_deref(), Some("scenegraph=trace"));
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        let config = HierarchyConfig::from_json_str(r#"{ "log_filter": "scenegraph=trace" }"#).unwrap();
        config.init_logging();
        // A subscriber is already installed; the second call must not panic
        config.init_logging();
        crate::init_logging();
    }

    #[test]
    fn test_load_missing_file() {
        let result = HierarchyConfig::load_from_file("does/not/exist.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
