//! The `mezopay` command-line tool.
//!
//! Encodes and decodes `musd:pay` payment URIs, converts amounts, and reads
//! balances or sends MUSD payments through a JSON-RPC node.
//!
//! # Modules
//!
//! - [`cli`] - Argument definitions with environment variable fallbacks
//! - [`commands`] - Command implementations producing JSON output
//! - [`error`] - Command error types

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::Cli;
pub use commands::{CommandOutput, run};
pub use error::CliError;
