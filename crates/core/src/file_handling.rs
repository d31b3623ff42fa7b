//! File handling for script declarations and the command history.
//!
//! This module reads and validates script declaration files and keeps the
//! history log of rendered commands that can be fed back to the interpreter.

use std::collections::HashSet;
use std::fs::{self, File};
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::declaration::{validate_name, ScriptDeclaration};
use crate::error::Error::NonUniqueScriptName;
use crate::error::{Error, Result};
use crate::script::Script;

/// Number of commands kept in the history, newest last.
pub const MAX_HISTORY_LEN: usize = 100;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path).map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

fn validate_script_names(declarations: &[ScriptDeclaration]) -> Result<()> {
    let mut names = HashSet::new();

    for declaration in declarations {
        validate_name(&declaration.name)?;

        if !names.insert(declaration.name.as_str()) {
            return Err(NonUniqueScriptName(declaration.name.clone()));
        }
    }

    Ok(())
}

/// Loads and validates script declarations from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The declaration file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - The file declares no scripts
/// - Script names are invalid or non-unique
///
/// # Examples
///
/// ```no_run
/// use script_fu_core::file_handling::get_script_declarations;
///
/// let declarations = get_script_declarations("/home/me/.script-fu/scripts.yml")?;
/// println!("Loaded {} scripts", declarations.len());
/// # Ok::<(), script_fu_core::error::Error>(())
/// ```
pub fn get_script_declarations(path: &str) -> Result<Vec<ScriptDeclaration>> {
    let reader = get_reader("script declaration", path)?;

    let declarations: Vec<ScriptDeclaration> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "script declaration".to_string(),
            path.to_string(),
            e,
        )
    })?;

    if declarations.is_empty() {
        return Err(Error::empty_script_declaration(path.to_string()));
    }

    validate_script_names(&declarations)?;

    Ok(declarations)
}

/// Loads the declarations at `path` and builds their scripts.
///
/// # Errors
///
/// See [`get_script_declarations`] and [`ScriptDeclaration::into_script`].
pub fn load_scripts(path: &str) -> Result<Vec<Script>> {
    get_script_declarations(path)?
        .into_iter()
        .map(ScriptDeclaration::into_script)
        .collect()
}

/// Reads every recorded command, oldest first. A missing file is an empty
/// history.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn get_history(history_path: &str) -> Result<Vec<String>> {
    if !Path::new(history_path).exists() {
        return Ok(Vec::new());
    }

    let reader = get_reader("history", history_path)?;

    serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "history".to_string(),
            history_path.to_string(),
            e,
        )
    })
}

/// The most recently recorded command, if any.
///
/// # Errors
///
/// See [`get_history`].
pub fn get_last_command(history_path: &str) -> Result<Option<String>> {
    Ok(get_history(history_path)?.pop())
}

/// Appends a rendered command to the history file, creating it and its
/// directory when needed. Only the newest [`MAX_HISTORY_LEN`] commands are
/// kept.
///
/// The new history is written to a temporary file beside the history and
/// renamed over it, so a failed write leaves the previous history in place.
///
/// # Errors
///
/// Returns an error if the existing history cannot be read, or the new history
/// cannot be written.
pub fn append_command(history_path: &str, command: &str) -> Result<()> {
    let io_error = |e: std::io::Error| Error::io_error("history".to_string(), history_path.to_string(), e);

    let mut history = get_history(history_path)?;
    history.push(command.to_string());

    if history.len() > MAX_HISTORY_LEN {
        let dropped = history.len() - MAX_HISTORY_LEN;
        history.drain(..dropped);
        debug!("Dropped {dropped} old commands from history");
    }

    let directory = match Path::new(history_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory).map_err(io_error)?;

    let mut temp_file = NamedTempFile::new_in(directory).map_err(io_error)?;

    serde_yaml::to_writer(&mut temp_file, &history).map_err(|e| {
        Error::yaml_error(
            "writing".to_string(),
            "history".to_string(),
            history_path.to_string(),
            e,
        )
    })?;

    temp_file
        .persist(history_path)
        .map_err(|e| io_error(e.error))?;

    info!("Recorded `{command}` in history at `{history_path}`");

    Ok(())
}
