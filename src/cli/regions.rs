//! Regions command: shows the tagged regions of a source file.

use crate::cli::common::{CliError, CliResult};
use crate::codegen::Document;
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// List the tagged regions of a generated source file
#[derive(Debug, Clone, Args)]
pub struct RegionsArgs {
    /// Generated .ino or .c file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize, Debug)]
struct RegionOutput {
    name: String,
    depth: usize,
}

impl RegionsArgs {
    /// Execute the regions command
    pub fn execute(&self) -> CliResult<()> {
        let text = fs::read_to_string(&self.file)
            .map_err(|e| CliError::io(format!("Failed to read {}: {e}", self.file.display())))?;
        let doc = Document::parse(&text)?;
        let regions: Vec<RegionOutput> = doc
            .outline()
            .into_iter()
            .map(|(depth, name)| RegionOutput { name, depth })
            .collect();

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&regions)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for region in &regions {
                println!("{}{}", "  ".repeat(region.depth), region.name);
            }
        }
        Ok(())
    }
}
