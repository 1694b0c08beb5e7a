//! Generate command.

use crate::cli::common::{self, CliError, CliResult};
use crate::codegen::CodeGenerator;
use crate::config::Config;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Generate or regenerate a GUIslice source file from a project
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Project file (TOML or JSON)
    #[arg(short, long, value_name = "FILE")]
    pub project: PathBuf,

    /// Output file; defaults to <project name>.<ino|c> beside the project
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Target platform: arduino, tft_espi or linux
    #[arg(long, value_name = "TARGET")]
    pub target: Option<String>,

    /// Rebuild every callback case instead of keeping edited ones
    #[arg(long)]
    pub no_round_trip: bool,

    /// Do not keep a .bak copy of the previous output
    #[arg(long)]
    pub no_backup: bool,

    /// Create eligible elements in flash for this run
    #[arg(long)]
    pub flash: bool,

    /// Print the generated source instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let project = common::load_project(&self.project)?;
        let target = match &self.target {
            Some(name) => common::parse_target(name)?,
            None => config.generation.target,
        };
        let output = self.output.clone().unwrap_or_else(|| {
            let dir = self.project.parent().unwrap_or_else(|| Path::new("."));
            common::default_output(&project, target, dir)
        });

        let templates = common::load_templates(config)?;
        let ctx = common::context(&project, &templates, config, target, &output)
            .with_round_trip(config.generation.round_trip && !self.no_round_trip)
            .with_flash(config.generation.use_flash || self.flash);
        let generator = CodeGenerator::new().with_template_dir(config.paths.template_dir.clone());

        if self.dry_run {
            let existing = if output.exists() {
                Some(fs::read_to_string(&output).map_err(|e| {
                    CliError::io(format!("Failed to read {}: {e}", output.display()))
                })?)
            } else {
                None
            };
            print!("{}", generator.generate(&ctx, existing.as_deref())?);
            return Ok(());
        }

        let backup = config.generation.backup && !self.no_backup;
        generator.generate_file(&ctx, &output, backup)?;
        println!("✓ Generated {}", output.display());
        Ok(())
    }
}
