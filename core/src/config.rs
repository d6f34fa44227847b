//! Configuration loaded from `passage.toml`.
//!
//! ```toml
//! [transitions]
//! animated = false
//!
//! [observe]
//! filter = "info,passage_runtime=debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageConfig {
    pub transitions: TransitionDefaults,
    pub observe: ObserveConfig,
}

impl PassageConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), ?config, "loaded passage config");
        Ok(config)
    }
}

/// Initial settings of every node a screen creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionDefaults {
    pub animated: bool,
}

impl Default for TransitionDefaults {
    fn default() -> Self {
        Self { animated: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserveConfig {
    /// `EnvFilter` directive, e.g. `info,passage_runtime=debug`.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObserveConfig {
    fn default() -> Self {
        Self {
            filter: "info,passage_runtime=debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = PassageConfig::from_toml_str("").unwrap();
        assert_eq!(config, PassageConfig::default());
        assert!(config.transitions.animated);
    }

    #[test]
    fn test_partial_config() {
        let config = PassageConfig::from_toml_str(
            r#"
            [transitions]
            animated = false

            [observe]
            format = "json"
            "#,
        )
        .unwrap();
        assert!(!config.transitions.animated);
        assert_eq!(config.observe.format, LogFormat::Json);
        assert_eq!(config.observe.filter, ObserveConfig::default().filter);
    }

    #[test]
    fn test_invalid_config() {
        let err = PassageConfig::from_toml_str("[transitions]\nanimated = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[observe]\nfilter = \"warn\"").unwrap();

        let config = PassageConfig::load(file.path()).unwrap();
        assert_eq!(config.observe.filter, "warn");
    }

    #[test]
    fn test_load_missing_file() {
        let err = PassageConfig::load("/definitely/not/here/passage.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
