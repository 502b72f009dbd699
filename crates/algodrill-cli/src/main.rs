//! algodrill CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod play;
mod prompt;

#[derive(Parser)]
#[command(name = "algodrill", version, about = "Interactive algorithm practice sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a new practice session
    Setup {
        /// Number of questions
        #[arg(long, default_value = "5")]
        questions: usize,

        /// Problem kinds to enable (comma-separated, e.g. "tree-search,matrix-game"; default: all)
        #[arg(long)]
        kinds: Option<String>,

        /// Zero-based question indexes to switch to fixed-seed generation (comma-separated)
        #[arg(long)]
        fixed: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Play the stored session from where it stands
    Run {
        /// Write the session report JSON here
        #[arg(long)]
        report: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the stored session and its cursor
    Status {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Discard the stored session
    Reset {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("algodrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Setup {
            questions,
            kinds,
            fixed,
            config,
        } => commands::setup::execute(questions, kinds, fixed, config).await,
        Commands::Run { report, config } => commands::run::execute(report, config).await,
        Commands::Status { config } => commands::status::execute(config),
        Commands::Reset { config } => commands::reset::execute(config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
