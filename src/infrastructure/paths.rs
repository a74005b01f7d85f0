//! Path utilities for per-user files.
//!
//! castview keeps two locations: a configuration file and a data directory
//! where span traces are written. Both follow the XDG base directory layout
//! and fall back to `$HOME` when the XDG variables are unset.

use std::path::PathBuf;

const APP_DIR: &str = "castview";

/// Returns the data directory, `$XDG_DATA_HOME/castview` or
/// `~/.local/share/castview`.
///
/// Returns `None` when neither variable is set.
#[must_use]
pub fn get_data_dir() -> Option<PathBuf> {
    base_dir("XDG_DATA_HOME", &[".local", "share"]).map(|dir| dir.join(APP_DIR))
}

/// Returns the default configuration file, `$XDG_CONFIG_HOME/castview/config.toml`
/// or `~/.config/castview/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    base_dir("XDG_CONFIG_HOME", &[".config"]).map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn base_dir(xdg_var: &str, home_fallback: &[&str]) -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(xdg_var).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME").filter(|v| !v.is_empty())?;
    Some(home_fallback.iter().fold(PathBuf::from(home), |p, seg| p.join(seg)))
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths without a leading tilde, and all paths when `$HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) else {
        return PathBuf::from(path);
    };

    if path == "~" {
        PathBuf::from(home)
    } else if let Some(rest) = path.strip_prefix("~/") {
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}
