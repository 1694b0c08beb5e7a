//! CLI command handlers for SliceGen.
//!
//! Each subcommand parses its own arguments and returns a [`CliResult`];
//! `main` maps failures to process exit codes.

pub mod common;
pub mod config;
pub mod generate;
pub mod regions;
pub mod templates;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use generate::GenerateArgs;
pub use regions::RegionsArgs;
pub use templates::TemplatesArgs;
