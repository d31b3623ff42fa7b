//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure and provides
//! validation for CLI arguments using the `clap` crate.

use crate::arguments::{determine, Provider, Style};
use clap::Parser;
use script_fu_core::error::Result;

/// Command-line arguments for the `sfu` tool.
///
/// Without a script name the declared scripts are listed. With a script name
/// the given values are bound to the script and the resulting command is
/// printed and recorded in the history.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use script_fu_cli::cli_args::Args;
///
/// let args = Args::parse_from(["sfu", "script-fu-blur", "-p", "adjustment=2.5"]);
/// assert_eq!(args.script_name.as_deref(), Some("script-fu-blur"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the script declaration YAML.
    ///
    /// If not provided, defaults to `~/.script-fu/scripts.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Path to the history of rendered commands.
    ///
    /// If not provided, defaults to `~/.script-fu/history.yml`.
    #[arg(long, short = 'l')]
    pub history_path: Option<String>,

    /// Print the command without recording it in the history.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Print the last recorded command, ready to be evaluated again.
    #[arg(long, short = 'r', action)]
    pub rerun_last_command: bool,

    /// Describe the procedure generated for the script instead of running it.
    #[arg(long, action)]
    pub describe: bool,

    /// The script to invoke.
    #[arg(num_args(1))]
    pub script_name: Option<String>,

    /// Named values in the format name=value, where name is a procedure
    /// parameter name such as `image-2`.
    ///
    /// Cannot be mixed with positional values.
    #[arg(long = "param", short = 'p', action = clap::ArgAction::Append)]
    pub parameters: Vec<String>,

    /// One value per declared argument, in declaration order.
    ///
    /// Cannot be mixed with named values.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub positional_values: Vec<String>,
}

impl Provider for Args {
    /// Determines the value style based on the provided arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if both named and positional values are provided.
    fn get_style(&self) -> Result<Style> {
        determine(&self.parameters, &self.positional_values)
    }
}
