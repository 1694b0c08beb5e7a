//! SliceGen - GUIslice code generator
//!
//! Reads a project file describing pages and widgets and keeps the
//! matching Arduino or Linux source file in sync with it.

use clap::{Parser, Subcommand};
use slicegen::cli::{CliResult, ConfigArgs, GenerateArgs, RegionsArgs, TemplatesArgs};
use slicegen::cli::common;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// SliceGen - GUIslice code generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every pipe and merge decision
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate or regenerate a source file from a project
    Generate(GenerateArgs),
    /// List the tagged regions of a source file
    Regions(RegionsArgs),
    /// Inspect or export the template assets
    Templates(TemplatesArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn run(cli: &Cli) -> CliResult<()> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Command::Generate(args) => args.execute(&common::load_config(config_path)?),
        Command::Regions(args) => args.execute(),
        Command::Templates(args) => args.execute(&common::load_config(config_path)?),
        Command::Config(args) => args.execute(config_path),
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "slicegen=debug" } else { "slicegen=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
