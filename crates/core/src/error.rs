use thiserror::Error;

use crate::value::ArgType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("No scripts were found in the script declaration YAML. Is `{}` empty?", .path)]
    EmptyScriptDeclaration { path: String },

    #[error("Found a non-unique script name: `{}`", .0)]
    NonUniqueScriptName(String),

    #[error("Invalid script name: name may not be empty")]
    EmptyName,

    #[error("Invalid script name `{}`: name may not contain whitespace", .0)]
    NameWithWhitespace(String),

    #[error("Invalid script name `{}`: name cannot be purely numeric", .0)]
    NumericName(String),

    #[error("Invalid script name `{}`: name may not contain `{}`", .0, .1)]
    NameWithDelimiter(String, char),

    #[error("Argument `{}` of script {} has a default that is not a finite number", .1, .0)]
    NonFiniteDefault(String, String),

    #[error("Option argument `{}` of script {} declares no choices", .1, .0)]
    EmptyOptionChoices(String, String),

    #[error("Option index {} is out of range for `{}` ({} choices)", .index, .label, .choices)]
    OptionOutOfRange {
        label: String,
        index: i32,
        choices: usize,
    },

    #[error("Invocation of {} carries {} values, expected at least {}", .script, .found, .expected)]
    InvocationTooShort {
        script: String,
        expected: usize,
        found: usize,
    },

    #[error("Invocation of {} has a mismatched value at position {}: expected {}", .script, .position, .expected)]
    InvocationTypeMismatch {
        script: String,
        position: usize,
        expected: ArgType,
    },

    #[error("Script not found: `{}`", .0)]
    ScriptNotFound(String),

    #[error("Could not read a {} value from `{}`", .0, .1)]
    ValueFormat(ArgType, String),

    #[error("Parameter `{}` must be written as name=value", .0)]
    ParameterFormat(String),

    #[error("Script has no parameter named `{}`", .0)]
    UnknownParameter(String),

    #[error("Expected {} positional values, found {}", .0, .1)]
    ParameterCountMismatch(usize, usize),

    #[error("Cannot mix named (-p/--param) and positional values")]
    MixedParameterStyle,

    #[error("Rerun flag cannot be combined with a script name.")]
    RerunWithScript,
}

impl Error {
    pub fn empty_script_declaration(path: String) -> Self {
        Self::EmptyScriptDeclaration { path }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
