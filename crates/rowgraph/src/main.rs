//! Rowgraph CLI - Build and analyze entity graphs from the command line.
//!
//! Rowgraph builds a typed graph from JSON rows and a mapping file, then
//! runs path, impact and reachability queries over the saved dataset.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use rowgraph::Settings;
use tracing_subscriber::EnvFilter;

mod cli;

/// Rowgraph: typed graphs from tabular rows.
#[derive(Parser)]
#[command(name = "rowgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file (defaults to ./rowgraph.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a dataset from rows and a mapping
    Build {
        /// Rows as JSON (array of objects, or {"columns", "rows"})
        #[arg(short, long)]
        data: PathBuf,

        /// Mapping file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        mapping: PathBuf,

        /// Write the dataset JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Find simple paths between entities
    Paths {
        /// Dataset JSON produced by `build`
        #[arg(short, long)]
        dataset: PathBuf,

        /// Source entity ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<String>,

        /// Target entity ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        to: Vec<String>,

        /// Maximum path length in nodes (1-20)
        #[arg(long, value_parser = cli::parse_bound)]
        max_length: Option<usize>,
    },

    /// Show what lies downstream of entities
    Impact {
        /// Dataset JSON produced by `build`
        #[arg(short, long)]
        dataset: PathBuf,

        /// Source entity ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<String>,

        /// Maximum depth in hops (1-20)
        #[arg(long, value_parser = cli::parse_bound)]
        max_depth: Option<usize>,
    },

    /// Reduce a dataset to paths or impact from the given sources
    Filter {
        /// Dataset JSON produced by `build`
        #[arg(short, long)]
        dataset: PathBuf,

        /// Source entity ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<String>,

        /// Target entity ids (comma-separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "to_type")]
        to: Vec<String>,

        /// Target entity types (comma-separated)
        #[arg(long, value_delimiter = ',')]
        to_type: Vec<String>,

        /// Maximum depth (1-20)
        #[arg(long, value_parser = cli::parse_bound)]
        max_depth: Option<usize>,

        /// Write the filtered dataset JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Extract everything reachable from entities
    Reachable {
        /// Dataset JSON produced by `build`
        #[arg(short, long)]
        dataset: PathBuf,

        /// Source entity ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        from: Vec<String>,

        /// Maximum depth in hops (1-20)
        #[arg(long, value_parser = cli::parse_bound)]
        max_depth: Option<usize>,

        /// Write the subgraph dataset JSON here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => return report_error(&e),
    };
    let json = cli.json;

    let result = match cli.command {
        Commands::Build { data, mapping, out } => {
            cli::build::run(&settings, &data, &mapping, out.as_deref(), json)
        }
        Commands::Paths {
            dataset,
            from,
            to,
            max_length,
        } => cli::paths::run(&settings, &dataset, &from, &to, max_length, json),
        Commands::Impact {
            dataset,
            from,
            max_depth,
        } => cli::impact::run(&settings, &dataset, &from, max_depth, json),
        Commands::Filter {
            dataset,
            from,
            to,
            to_type,
            max_depth,
            out,
        } => cli::filter::run(
            &settings,
            &dataset,
            &cli::filter::Targets::from_args(to, to_type),
            &from,
            max_depth,
            out.as_deref(),
            json,
        ),
        Commands::Reachable {
            dataset,
            from,
            max_depth,
            out,
        } => cli::reachable::run(&settings, &dataset, &from, max_depth, out.as_deref(), json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report_error(&e),
    }
}

/// Settings from `--config` or the working directory, with env overrides.
fn load_settings(cli: &Cli) -> rowgraph::Result<Settings> {
    let dir = std::env::current_dir()?;
    let settings = Settings::discover(cli.config.as_deref(), &dir)?.with_env_overrides();
    settings.validate()?;
    Ok(settings)
}

fn report_error(e: &rowgraph::Error) -> ExitCode {
    eprintln!("{}: {e}", "error".red().bold());
    // Show cause chain for nested errors
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("  {}: {cause}", "caused by".dimmed());
        source = std::error::Error::source(cause);
    }
    ExitCode::FAILURE
}
