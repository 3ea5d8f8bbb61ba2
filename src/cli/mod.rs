//! CLI command definitions and handlers

mod analyze;
mod init;
mod presets;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

use metcalfe::config::{load_config_file, load_project_config, ProjectConfig};
use metcalfe::models::IntegrationLevel;
use metcalfe::reporters::OutputFormat;
use metcalfe::Canvas;

/// Metcalfe - network value calculator
#[derive(Parser, Debug)]
#[command(name = "metcalfe")]
#[command(
    version,
    about = "Value a network of services with an extended Metcalfe's Law",
    long_about = "Metcalfe groups connected nodes, weighs each group by connection synergy \
and integration depth, and compares the result with every node standing alone.\n\n\
Input is a canvas file (JSON or TOML) or one of the built-in presets.",
    after_help = "\
Examples:
  metcalfe value canvas.json                 Value a saved canvas
  metcalfe value --preset line -i full       Value a preset at full integration
  metcalfe value canvas.toml --explain       Show the per-group breakdown
  metcalfe compare --preset uber -f json     All integration levels as JSON
  metcalfe stats canvas.json                 Structural statistics
  metcalfe export-preset phone -o phone.json Start from a preset"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: metcalfe.toml or .metcalferc.json in the current directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the network comes from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Canvas file (.json or .toml)
    #[arg(value_name = "FILE", required_unless_present = "preset", conflicts_with = "preset")]
    pub file: Option<PathBuf>,

    /// Use a built-in preset instead of a file (see `metcalfe presets`)
    #[arg(long, short = 'p')]
    pub preset: Option<String>,

    /// Output format: text, json
    #[arg(long, short = 'f', value_parser = ["text", "json"])]
    pub format: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct IntegrationArg {
    /// Integration level: simple, moderate, full
    #[arg(
        long,
        short = 'i',
        env = "METCALFE_INTEGRATION",
        ignore_case = true,
        value_parser = ["simple", "moderate", "full"]
    )]
    pub integration: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Standalone value, connected value and multiplier
    #[command(after_help = "\
Examples:
  metcalfe value canvas.json
  metcalfe value --preset mercari -i moderate
  metcalfe value canvas.json --explain -f json")]
    Value {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        integration: IntegrationArg,

        /// Include the per-group breakdown
        #[arg(long)]
        explain: bool,
    },

    /// List connected groups and their values
    Groups {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        integration: IntegrationArg,
    },

    /// Value the network at every integration level
    Compare {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Node, connection and group statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the built-in presets
    Presets {
        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,
    },

    /// Write a preset as a canvas JSON file
    ExportPreset {
        /// Preset id (line, mercari, uber, phone)
        id: String,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Write a metcalfe.toml with the default coefficient tables
    Init {
        /// Target directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = || load_config(cli.config.as_deref());

    match cli.command {
        Commands::Value {
            source,
            integration,
            explain,
        } => analyze::value(&config()?, &source, &integration, explain),
        Commands::Groups {
            source,
            integration,
        } => analyze::groups(&config()?, &source, &integration),
        Commands::Compare { source } => analyze::compare(&config()?, &source),
        Commands::Stats { source } => analyze::stats(&config()?, &source),
        Commands::Presets { format } => presets::list(&config()?, format.as_deref()),
        Commands::ExportPreset { id, output } => presets::export(&id, output.as_deref()),
        Commands::Init { dir } => init::run(&dir),
    }
}

/// Explicit `--config` is strict; otherwise look in the current directory
fn load_config(path: Option<&Path>) -> Result<ProjectConfig> {
    match path {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}

/// Flag (or METCALFE_INTEGRATION), then config default, then `simple`
fn resolve_integration(config: &ProjectConfig, arg: &IntegrationArg) -> Result<IntegrationLevel> {
    match &arg.integration {
        Some(level) => Ok(level.parse()?),
        None => Ok(config.defaults.integration.unwrap_or_default()),
    }
}

/// Flag, then config default, then `text`
fn resolve_format(config: &ProjectConfig, flag: Option<&str>) -> Result<OutputFormat> {
    match flag.or(config.defaults.format.as_deref()) {
        Some(f) => Ok(f.parse()?),
        None => Ok(OutputFormat::Text),
    }
}

/// A canvas and the name to show for it
fn load_source(source: &SourceArgs) -> Result<(Canvas, Option<String>)> {
    if let Some(id) = &source.preset {
        let preset = metcalfe::presets::find(id)?;
        debug!("Using preset '{}'", preset.id);
        let name = preset.name.to_string();
        let canvas = Canvas::from_state(preset.data)?;
        return Ok((canvas, Some(name)));
    }

    let path = source
        .file
        .as_deref()
        .context("Either FILE or --preset is required")?;
    let canvas = Canvas::load(path)
        .with_context(|| format!("Failed to load canvas {}", path.display()))?;
    let name = canvas
        .name()
        .map(str::to_string)
        .or_else(|| path.file_name().map(|n| n.to_string_lossy().into_owned()));
    Ok((canvas, name))
}
