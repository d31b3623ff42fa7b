//! Script-Fu CLI Library
//!
//! This crate provides the command-line front end for script-fu-core. It loads
//! script declarations, describes the procedures generated for them, binds
//! command-line values to a script and records the rendered command.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and validation
//! - [`arguments`]: Turning named or positional values into an invocation
//! - [`host`]: In-memory procedure host and procedure descriptions
//!
//! # Examples
//!
//! ```bash
//! # List declared scripts
//! sfu
//!
//! # Show the generated procedure
//! sfu --describe script-fu-glow
//!
//! # Named values, keyed by parameter name
//! sfu script-fu-glow -p image=1 -p drawable=2 -p adjustment=12.5
//!
//! # Positional values, one per declared argument
//! sfu script-fu-glow -- -1 1 2 12.5 '#ffff00' true Round Glow -1
//!
//! # Print the last recorded command
//! sfu --rerun-last-command
//! ```

pub mod arguments;
pub mod cli_args;
pub mod host;
