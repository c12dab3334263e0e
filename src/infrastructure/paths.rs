//! Path helpers for locating the configuration file.
//!
//! Follows the XDG base directory convention: `$XDG_CONFIG_HOME/bookshelf`,
//! falling back to `~/.config/bookshelf`.

use std::path::{Path, PathBuf};

/// Directory name under the user's configuration directory.
const APP_DIR: &str = "bookshelf";

/// Name of the configuration file inside [`APP_DIR`].
const CONFIG_FILE: &str = "config.toml";

/// Returns the default configuration file path, if a home or XDG directory is known.
///
/// # Examples
///
/// ```no_run
/// use bookshelf::infrastructure::default_config_file;
///
/// if let Some(path) = default_config_file() {
///     println!("config: {}", path.display());
/// }
/// ```
#[must_use]
pub fn default_config_file() -> Option<PathBuf> {
    config_file_from(
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        home_dir(),
    )
}

fn config_file_from(xdg_config_home: Option<PathBuf>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = xdg_config_home
        .filter(|dir| dir.is_absolute())
        .or_else(|| home.map(|home| home.join(".config")))?;
    Some(base.join(APP_DIR).join(CONFIG_FILE))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or when no home directory is known, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
