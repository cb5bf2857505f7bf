//! Cancionero CLI Library
//!
//! Command-line front end for the Cancionero music catalog API.
//!
//! This library exposes the command definitions and application state for
//! testing purposes.

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use commands::{run, Cli, Command};
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use state::App;
