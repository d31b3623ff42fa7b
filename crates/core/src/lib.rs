//! Script-Fu Core Library
//!
//! This crate provides the typed argument registry behind script extensions of
//! an image editor: scripts declare a named, ordered, typed parameter list,
//! which is exported as procedure metadata, bound from host invocations,
//! rendered back into a re-evaluable interpreter call for the history log and
//! reset to its declared defaults between interactive uses.
//!
//! # Key Features
//!
//! - **Value Model**: Tagged argument values with per-kind rendering and reset
//! - **Procedure Metadata**: Unique parameter names and documentation per script
//! - **Standard Arguments**: Binding of the implicit display/image/item prefix
//! - **Command Rendering**: Locale independent, escaped history commands
//! - **Declarations and History**: YAML script declarations and command history
//!
//! # Examples
//!
//! Loading scripts and rendering their default command:
//!
//! ```no_run
//! use script_fu_core::file_handling::load_scripts;
//!
//! for script in load_scripts("/home/me/.script-fu/scripts.yml")? {
//!     println!("{}: {}", script.title(), script.command());
//! }
//! # Ok::<(), script_fu_core::error::Error>(())
//! ```

pub mod command;
pub mod config;
pub mod declaration;
pub mod error;
pub mod file_handling;
pub mod invocation;
pub mod procedure;
pub mod registry;
pub mod script;
pub mod standard_args;
pub mod value;
