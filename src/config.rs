//! Settings for the `twc` command line tool.
//!
//! Settings are read from TOML. Every field has a default, so an empty or
//! missing file behaves like the zero-config case.

pub mod user;

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub use user::{load_user_config, user_config_path};

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Errors raised while loading settings or edit scripts
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Well-formed but unusable value
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Column width of a tab stop when counting visual spaces
    pub tab_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl Settings {
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        let settings = Self::from_toml(&contents)?;
        log::debug!(target: "text_with_changes::config", "Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.tab_width == 0 {
            return Err(ConfigError::Invalid {
                message: "tab_width must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Settings from `explicit` if given, else the user config file, else defaults.
pub fn resolve_settings(explicit: Option<&Path>) -> ConfigResult<Settings> {
    match explicit {
        Some(path) => Settings::load(path),
        None => Ok(load_user_config()?.unwrap_or_default()),
    }
}
