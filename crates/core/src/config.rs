//! Configuration path utilities.
//!
//! Resolves the script declaration and history file paths, expanding `~`.

/// Default path for the script declaration file
const DEFAULT_SCRIPTS_PATH: &str = "~/.script-fu/scripts.yml";
/// Default path for the history of rendered commands
const DEFAULT_HISTORY_PATH: &str = "~/.script-fu/history.yml";

/// Resolves the script declaration file path.
///
/// Uses `scripts_path_arg` when given, the default path otherwise. Shell
/// expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use script_fu_core::config::get_scripts_path;
///
/// let default_path = get_scripts_path(None);
/// let custom_path = get_scripts_path(Some("/path/to/scripts.yml"));
/// assert_eq!(custom_path, "/path/to/scripts.yml");
/// ```
pub fn get_scripts_path(scripts_path_arg: Option<&str>) -> String {
    shellexpand::tilde(scripts_path_arg.unwrap_or(DEFAULT_SCRIPTS_PATH)).to_string()
}

/// Resolves the history file path, see [`get_scripts_path`].
pub fn get_history_path(history_path_arg: Option<&str>) -> String {
    shellexpand::tilde(history_path_arg.unwrap_or(DEFAULT_HISTORY_PATH)).to_string()
}
