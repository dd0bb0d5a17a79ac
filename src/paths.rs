//! XDG-style path utilities for configuration and data directories.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations
//! on every platform.

use std::path::PathBuf;

const APP_DIR: &str = "doctl";

/// Returns the configuration directory for doctl.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/doctl` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/doctl` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Returns the data directory for doctl, where the glossary database lives.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/doctl` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/doctl` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME").map_or_else(
        |_| home_dir().join(".local").join("share").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

/// Default location of the glossary database.
pub fn default_glossary_path() -> PathBuf {
    data_dir().join("glossary.db")
}

/// # Panics
///
/// Panics if the home directory cannot be determined.
#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
