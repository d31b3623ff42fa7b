//! Value style determination and validation.
//!
//! Values for a script can be given by parameter name or by position, but not
//! both in one invocation.

use script_fu_core::error::Error::MixedParameterStyle;
use script_fu_core::error::Result;

/// The style of value input being used.
#[derive(PartialEq, Clone, Debug)]
pub enum Style {
    /// No values provided, every argument keeps its current value
    None,
    /// Named values provided with -p/--param flags (name=value format)
    Named(Vec<String>),
    /// Positional values, one per declared argument
    Positional(Vec<String>),
}

/// Trait for objects that can determine their value style.
pub trait Provider {
    /// Validates that named and positional values aren't mixed and returns
    /// the appropriate `Style`.
    ///
    /// # Errors
    ///
    /// Returns an error if named and positional values are mixed.
    fn get_style(&self) -> Result<Style>;
}

/// Determines the value style based on the provided value lists.
///
/// # Errors
///
/// Returns [`MixedParameterStyle`] if both named and positional values are
/// provided.
///
/// # Examples
///
/// ```rust
/// use script_fu_cli::arguments::{determine, Style};
///
/// let style = determine(&["radius=5".to_string()], &[]).unwrap();
/// assert_eq!(style, Style::Named(vec!["radius=5".to_string()]));
///
/// let style = determine(&[], &[]).unwrap();
/// assert_eq!(style, Style::None);
/// ```
pub fn determine(named_args: &[String], positional_args: &[String]) -> Result<Style> {
    let using_named = !named_args.is_empty();
    let using_positional = !positional_args.is_empty();

    match (using_named, using_positional) {
        (true, true) => Err(MixedParameterStyle),
        (true, false) => Ok(Style::Named(named_args.to_vec())),
        (false, true) => Ok(Style::Positional(positional_args.to_vec())),
        (false, false) => Ok(Style::None),
    }
}
