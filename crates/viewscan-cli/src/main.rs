mod commands;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reader::read_workspace;
use viewscan_core::{list_triggers, ResultMap};

#[derive(Parser)]
#[command(
    name = "viewscan",
    version,
    about = "viewscan — list on_change triggers declared in ERP form and tree views"
)]
struct Cli {
    /// Log scanning progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List on_change triggers found in view snapshots
    List {
        /// Snapshot file or directory (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Model to scan (repeatable; defaults to the configured or all models)
        #[arg(short, long = "model")]
        models: Vec<String>,

        /// Output format: json (default) or human
        #[arg(long, default_value = "json")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the triggers of two snapshot sets
    Diff {
        /// First snapshot file/directory
        left: PathBuf,

        /// Second snapshot file/directory
        right: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List {
            path,
            models,
            format,
            output,
        } => commands::list::run_list(&path, &models, &format, output.as_deref()),
        Commands::Diff { left, right } => commands::diff::run_diff(&left, &right),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Load the snapshots at `input_path` and list the triggers of `models`
/// (the configured or all snapshot models when empty).
pub fn build_triggers(input_path: &Path, models: &[String]) -> Result<ResultMap, String> {
    let workspace = read_workspace(input_path)?;
    let selected = workspace.select_models(models);
    tracing::info!(
        files = workspace.files.len(),
        models = selected.len(),
        "listing triggers"
    );

    list_triggers(&workspace.snapshot, &selected).map_err(|e| e.to_string())
}
