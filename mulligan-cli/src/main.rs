use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mulligan::config::Config;
use mulligan::core::output::OutputFormat;

mod commands;

use commands::{SelectionArgs, SequenceArgs};

#[derive(Parser)]
#[command(name = "mulligan")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Batch rename files with chained string operations",
    long_about = "Mulligan runs file names through an ordered sequence of rename operations, \
                  previews every change as a character diff, and applies the batch so that \
                  names can be swapped or rotated without conflicts."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, markdown)
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Config file (defaults to ./mulligan.toml, then ~/.config/mulligan/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what a sequence would do to the selected files
    Preview {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        sequence: SequenceArgs,

        /// Show every operation's diff, not just the overall change
        #[arg(long)]
        stages: bool,
    },

    /// Rename the selected files
    Apply {
        #[command(flatten)]
        selection: SelectionArgs,

        #[command(flatten)]
        sequence: SequenceArgs,

        /// Compute the renames without touching any file
        #[arg(long)]
        dry_run: bool,

        /// Apply even when the preview reports empty or colliding names
        #[arg(long)]
        allow_warnings: bool,
    },

    /// Revert the last apply
    Undo,

    /// Manage saved sequences
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// Inspect available rename operations
    Ops {
        #[command(subcommand)]
        action: OpsAction,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List saved presets
    List,

    /// Print a preset
    Show {
        /// Preset name
        name: String,
    },

    /// Save a sequence file as a preset
    Save {
        /// Preset name (letters, digits, '-' or '_')
        name: String,

        /// Sequence file to save
        #[arg(short, long)]
        sequence: PathBuf,

        /// Short description shown in listings
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a preset
    Delete {
        /// Preset name
        name: String,
    },
}

#[derive(Subcommand)]
enum OpsAction {
    /// List operation kinds
    List,

    /// Print a sequence containing one default-configured operation
    Template {
        /// Operation kind (e.g. enumerate, replace_string)
        kind: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default settings
    Init {
        /// Write ~/.config/mulligan/config.toml instead of ./mulligan.toml
        #[arg(long)]
        global: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --verbose
    let default_filter = if cli.verbose {
        "mulligan=debug"
    } else {
        "mulligan=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Writing a fresh config must not depend on parsing the current one
    if let Commands::Config {
        action: ConfigAction::Init { global, force },
    } = cli.command
    {
        return commands::config::init(global, force);
    }

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Preview {
            selection,
            sequence,
            stages,
        } => commands::preview::run(selection, sequence, stages, &config, cli.format)?,
        Commands::Apply {
            selection,
            sequence,
            dry_run,
            allow_warnings,
        } => commands::apply::run(
            selection,
            sequence,
            commands::apply::ApplyOptions {
                dry_run,
                allow_warnings,
            },
            &config,
            cli.format,
        )?,
        Commands::Undo => commands::undo::run(&config, cli.format)?,
        Commands::Preset { action } => match action {
            PresetAction::List => commands::preset::list(&config, cli.format)?,
            PresetAction::Show { name } => commands::preset::show(&name, &config, cli.format)?,
            PresetAction::Save {
                name,
                sequence,
                description,
            } => commands::preset::save(&name, &sequence, description, &config)?,
            PresetAction::Delete { name } => commands::preset::delete(&name, &config)?,
        },
        Commands::Ops { action } => match action {
            OpsAction::List => commands::ops::list(cli.format)?,
            OpsAction::Template { kind } => commands::ops::template(&kind, cli.format)?,
        },
        Commands::Config { .. } => {}
    }

    Ok(())
}
