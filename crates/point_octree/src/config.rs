//! File-backed configuration
//!
//! Loads and saves configuration types in TOML or RON, chosen by file
//! extension. [`crate::octree::OctreeConfig`] implements [`Config`], so an
//! octree's option set can live next to an application's own settings.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading or saving configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Unrecognized config file extension
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Configuration that can round-trip through a TOML or RON file
pub trait Config: Serialize + DeserializeOwned + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}
