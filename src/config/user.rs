//! User configuration loading for text-with-changes.
//!
//! User config location: $XDG_CONFIG_HOME/text-with-changes/config.toml
//! Fallback: the platform config directory (e.g. ~/.config/text-with-changes/config.toml)

use std::path::PathBuf;

use super::{ConfigResult, Settings};

const APP_DIR: &str = "text-with-changes";
const FILE_NAME: &str = "config.toml";

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/text-with-changes/config.toml
/// 2. Otherwise: `dirs::config_dir()`/text-with-changes/config.toml
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join(APP_DIR).join(FILE_NAME));
    }

    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(FILE_NAME))
}

/// Load the user configuration file if one exists.
///
/// Ok(None) means there is no file, which is not an error.
pub fn load_user_config() -> ConfigResult<Option<Settings>> {
    let Some(path) = user_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        log::trace!(target: "text_with_changes::config", "No user config at {}", path.display());
        return Ok(None);
    }
    Settings::load(&path).map(Some)
}
