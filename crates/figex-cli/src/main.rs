//! CLI for extracting labeled financial figures from statement text.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, confirm, dict, extract};

/// Financial figure extraction - locate labeled figures in noisy statement text
#[derive(Parser)]
#[command(name = "figex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a label dictionary JSON file
    #[arg(short, long, global = true)]
    dictionary: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract figures from a single text file
    Extract(extract::ExtractArgs),

    /// Extract figures from multiple text files
    Batch(batch::BatchArgs),

    /// Record a human-confirmed value into the override store
    Confirm(confirm::ConfirmArgs),

    /// Inspect or export the active label dictionary
    Dict(dict::DictArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.dictionary.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.dictionary.as_deref()),
        Commands::Confirm(args) => confirm::run(args),
        Commands::Dict(args) => dict::run(args, cli.dictionary.as_deref()),
    }
}
