use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use shrike_cli::commands;

#[derive(Parser)]
#[command(name = "shrike")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "A CLI tool for analyzing proxy traffic-log exports from security tests",
    long_about = "Shrike ingests Logger++ CSV exports (one file or a directory), normalizes \
                  them into a consistent record set, applies exclusion filters, and renders \
                  activity statistics as console output or a single-file HTML report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, table, pretty)
    #[arg(short, long, global = true, default_value = "pretty")]
    format: String,

    /// Additional timestamp formats to accept, in chrono strftime syntax
    /// (repeatable; replaces the built-in vocabulary)
    #[arg(long = "time-format", global = true, value_name = "FORMAT")]
    time_format: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a log export and generate the HTML report
    Analyze {
        /// Path to a CSV export or a directory of exports
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// File extensions to exclude (comma-separated, e.g. js,css,woff2)
        #[arg(long = "exclude-ext")]
        exclude_ext: Vec<String>,

        /// Tool labels to exclude (comma-separated, e.g. Scanner,Extensions)
        #[arg(long = "exclude-tool")]
        exclude_tool: Vec<String>,

        /// Output path for the HTML report
        #[arg(short, long, default_value = "traffic_report.html")]
        output: PathBuf,
    },

    /// Display dataset statistics without writing a report
    Stats {
        /// Path to a CSV export or a directory of exports
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// File extensions to exclude (comma-separated)
        #[arg(long = "exclude-ext")]
        exclude_ext: Vec<String>,

        /// Tool labels to exclude (comma-separated)
        #[arg(long = "exclude-tool")]
        exclude_tool: Vec<String>,
    },

    /// Write the filtered dataset as CSV (file) or JSON (stdout)
    Filter {
        /// Path to a CSV export or a directory of exports
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// File extensions to exclude (comma-separated)
        #[arg(long = "exclude-ext")]
        exclude_ext: Vec<String>,

        /// Tool labels to exclude (comma-separated)
        #[arg(long = "exclude-tool")]
        exclude_tool: Vec<String>,

        /// Output filtered records to a CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze {
            path,
            exclude_ext,
            exclude_tool,
            output,
        } => {
            commands::analyze::execute(&path, &exclude_ext, &exclude_tool, &cli.time_format, &output)
        }
        Commands::Stats {
            path,
            exclude_ext,
            exclude_tool,
        } => commands::stats::execute(
            &path,
            &exclude_ext,
            &exclude_tool,
            &cli.time_format,
            &cli.format,
        ),
        Commands::Filter {
            path,
            exclude_ext,
            exclude_tool,
            output,
        } => commands::filter::execute(&path, &exclude_ext, &exclude_tool, &cli.time_format, output),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("shrike_cli=debug,shrike_core=debug,shrike_report=debug")
    } else {
        EnvFilter::new("shrike_cli=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
