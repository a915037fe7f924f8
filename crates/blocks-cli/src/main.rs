//! blocks CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "blocks", version, about = "Terminal flashcard matching game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a set in the terminal
    Play {
        /// Public id of the set to fetch from the API
        #[arg(long, conflicts_with = "file")]
        set: Option<String>,

        /// Play a local set JSON file (offline, no score submission)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the leaderboard for a set
    Leaderboard {
        /// Public id of the set
        #[arg(long)]
        set: String,

        /// Rows to display
        #[arg(long)]
        limit: Option<usize>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate set JSON files
    Validate {
        /// Path to a set file or directory
        #[arg(long)]
        file: PathBuf,
    },

    /// Create starter config and an example set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blocks=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { set, file, config } => commands::play::execute(set, file, config).await,
        Commands::Leaderboard { set, limit, config } => {
            commands::leaderboard::execute(set, limit, config).await
        }
        Commands::Validate { file } => commands::validate::execute(file),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
