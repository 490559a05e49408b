//! Path handling for the Zellij sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! usually resolves to the directory Zellij was started from (typically the
//! user's home).

use std::path::PathBuf;

/// Directory holding the trace export files.
///
/// Resolves to `~/.local/share/zellij/evalboard` on the host when Zellij was
/// started from the home directory.
///
/// ```
/// use evalboard::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/evalboard"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("evalboard")
}

/// Expands a leading `~` to the `/host` mount.
///
/// ```
/// use evalboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
