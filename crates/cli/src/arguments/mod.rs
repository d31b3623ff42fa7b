//! Value processing for the script-fu CLI.
//!
//! This module turns the values given on the command line into an invocation
//! of a script:
//! - **Named values**: Using `-p name=value`, keyed by procedure parameter name
//! - **Positional values**: One trailing value per declared argument
//! - **No values**: Every argument keeps its current value
//!
//! The two styles cannot be mixed.

// Export public items from submodules
pub mod processing;
pub mod style;
pub mod validation;

// Re-exports for convenience
pub use processing::process_command_line;
pub use style::determine;
pub use style::Provider;
pub use style::Style;
