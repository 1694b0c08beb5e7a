//! Templates command: checks or exports the template assets.

use crate::cli::common::{self, CliError, CliResult};
use crate::codegen::blocks::FRAGMENTS;
use crate::codegen::template::{load_asset, TEMPLATE_ASSET};
use crate::config::Config;
use clap::{Args, Subcommand};
use std::fs;
use std::path::PathBuf;

/// Inspect the template assets
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    command: TemplatesCommand,
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    /// List fragment names in the active asset
    List,
    /// Report element fragments missing from the active asset
    Check,
    /// Write the built-in assets to a directory for customizing
    Export(ExportArgs),
}

/// Write the built-in assets to a directory
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Destination directory
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

const ASSETS: [&str; 3] = [TEMPLATE_ASSET, "ino.t", "c.t"];

impl TemplatesArgs {
    /// Execute templates subcommand
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        match &self.command {
            TemplatesCommand::List => {
                let store = common::load_templates(config)?;
                for name in store.names() {
                    println!("{name}");
                }
                Ok(())
            }
            TemplatesCommand::Check => {
                let store = common::load_templates(config)?;
                let missing: Vec<&str> = FRAGMENTS
                    .iter()
                    .copied()
                    .filter(|name| store.load_template(&format!("<{name}>")).is_err())
                    .collect();
                if missing.is_empty() {
                    println!("✓ {} has every element fragment", store.asset_name());
                    return Ok(());
                }
                for name in &missing {
                    println!("  ✗ <{name}>");
                }
                Err(CliError::validation(format!(
                    "{} fragment(s) missing from {}",
                    missing.len(),
                    store.asset_name()
                )))
            }
            TemplatesCommand::Export(args) => {
                fs::create_dir_all(&args.dir).map_err(|e| {
                    CliError::io(format!("Failed to create {}: {e}", args.dir.display()))
                })?;
                for name in ASSETS {
                    let text = load_asset(None, name)?;
                    let path = args.dir.join(name);
                    fs::write(&path, text).map_err(|e| {
                        CliError::io(format!("Failed to write {}: {e}", path.display()))
                    })?;
                    println!("✓ Wrote {}", path.display());
                }
                Ok(())
            }
        }
    }
}
