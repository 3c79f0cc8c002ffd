//! quill configuration
//!
//! Settings live in a YAML file, by default `<config dir>/quill/config.yaml`.
//! Every field is optional; anything left out keeps its default.
//!
//! ```yaml
//! default_cipher: vigenere
//! model_file: /home/me/.local/share/quill/english.json
//! thresholds:
//!   coincidence: 3/50
//!   growth: 1/200
//!   mutual: 11/200
//! ```

use std::path::{Path, PathBuf};

use quill_core::Thresholds;
use serde::{Deserialize, Serialize};

/// Errors loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cipher used when the command line doesn't name one
    pub default_cipher: String,

    /// Frequency model used by `hack` when no model file is given
    pub model_file: Option<PathBuf>,

    /// Polyalphabetic key recovery cut-offs
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_cipher: "caesar".to_string(),
            model_file: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl Config {
    /// `<config dir>/quill/config.yaml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quill").join("config.yaml"))
    }

    /// Load from `path`, or from [`Config::default_path`] when `None`.
    ///
    /// An explicit path must exist. A missing file at the default location
    /// just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    tracing::debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // an empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if let Some((name, value)) = self.thresholds.first_negative() {
            return Err(ConfigError::Invalid(format!(
                "threshold {name} must not be negative, got {value}"
            )));
        }
        if self.default_cipher.trim().is_empty() {
            return Err(ConfigError::Invalid("default_cipher is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::Ratio;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_cipher, "caesar");
        assert_eq!(config.thresholds, Thresholds::default());
        assert!(config.model_file.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str("thresholds:\n  mutual: 3/50\n").unwrap();
        assert_eq!(config.thresholds.mutual, Ratio::new(3, 50));
        assert_eq!(config.thresholds.coincidence, Ratio::new(3, 50));
        assert_eq!(config.default_cipher, "caesar");

        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            Config::from_yaml_str("thresholds:\n  growth: 1/0\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_yaml_str("thresholds:\n  growth: -1/200\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = Config {
            default_cipher: "vigenere".into(),
            model_file: Some(PathBuf::from("/tmp/english.json")),
            thresholds: Thresholds {
                coincidence: Ratio::new(13, 200),
                ..Thresholds::default()
            },
        };
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("13/200"));
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_cipher: vernam\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.default_cipher, "vernam");

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::load(Some(missing.as_path())),
            Err(ConfigError::Io { .. })
        ));
    }
}
