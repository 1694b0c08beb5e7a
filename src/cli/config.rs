//! Configuration management CLI commands.

use crate::cli::common::{self, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Target platform: arduino, tft_espi or linux
    #[arg(long, value_name = "TARGET")]
    target: Option<String>,

    /// Directory with template asset overrides
    #[arg(long, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Directory font include files are checked against
    #[arg(long, value_name = "DIR")]
    font_dir: Option<PathBuf>,

    /// Keep edited callback cases (true or false)
    #[arg(long, value_name = "BOOL")]
    round_trip: Option<bool>,

    /// Screen rotation 0-3
    #[arg(long, value_name = "N")]
    rotation: Option<i32>,

    /// Keep a .bak copy of the previous output (true or false)
    #[arg(long, value_name = "BOOL")]
    backup: Option<bool>,

    /// Create eligible elements in flash (true or false)
    #[arg(long, value_name = "BOOL")]
    flash: Option<bool>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(config_path),
            ConfigCommand::Set(args) => args.execute(config_path),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult<()> {
        let config = common::load_config(config_path)?;

        if self.json {
            let json = serde_json::to_string_pretty(&config).map_err(|e| {
                CliError::io(format!("Failed to serialize configuration to JSON: {e}"))
            })?;
            println!("{json}");
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self, config_path: Option<&Path>) -> CliResult<()> {
        if self.target.is_none()
            && self.template_dir.is_none()
            && self.font_dir.is_none()
            && self.round_trip.is_none()
            && self.rotation.is_none()
            && self.backup.is_none()
            && self.flash.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified",
            ));
        }

        let mut config = common::load_config(config_path)?;

        if let Some(name) = &self.target {
            config.generation.target = common::parse_target(name)?;
        }
        if let Some(dir) = &self.template_dir {
            config.paths.template_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.font_dir {
            config.paths.font_dir = Some(dir.clone());
        }
        if let Some(enabled) = self.round_trip {
            config.generation.round_trip = enabled;
        }
        if let Some(rotation) = self.rotation {
            config.generation.screen_rotation = Some(rotation);
        }
        if let Some(enabled) = self.backup {
            config.generation.backup = enabled;
        }
        if let Some(enabled) = self.flash {
            config.generation.use_flash = enabled;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let saved = match config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        };
        saved.map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}

fn show_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "(not configured)".to_string(), |p| p.display().to_string())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("SliceGen Configuration");
    println!("======================");
    println!();

    println!("Paths:");
    println!("  Templates: {}", show_path(config.paths.template_dir.as_ref()));
    println!("  Fonts:     {}", show_path(config.paths.font_dir.as_ref()));
    println!("  Log file:  {}", config.log_file_path().display());
    println!();

    let generation = &config.generation;
    println!("Generation:");
    println!("  Target:       {}", generation.target);
    println!("  Round trip:   {}", generation.round_trip);
    println!(
        "  Rotation:     {}",
        generation.screen_rotation
            .map_or_else(|| "(driver default)".to_string(), |r| r.to_string())
    );
    println!("  Transparency: {}", generation.transparency_color);
    println!("  Backup:       {}", generation.backup);
    println!("  Flash:        {}", generation.use_flash);
    println!();

    println!("Keypads:");
    for (label, keypad) in [("Numeric", &config.num_keypad), ("Alpha", &config.alpha_keypad)] {
        println!(
            "  {label:<8} at ({}, {}), font {}",
            keypad.x,
            keypad.y,
            keypad.font.as_deref().unwrap_or("builtin")
        );
    }
}
