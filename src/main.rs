use clap::{Parser, Subcommand};
use tracing::warn;

mod cli;
mod config;
mod core;
mod error;
mod ui;
mod utils;

use config::Config;
use error::{ExplorerError, Result};
use ui::Messages;

#[derive(Parser)]
#[command(name = "lyrics-explorer")]
#[command(about = "Explore song lyrics from Genius: statistics, common words and a word cloud")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a song and print its lyrics report
    Search(cli::search::SearchArgs),

    /// Open the interactive lyrics explorer
    Explore(cli::explore::ExploreArgs),

    /// Show or edit configuration
    Config(cli::config::ConfigArgs),

    /// Manage the song cache
    Cache(cli::cache::CacheArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        report_error(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // The explorer owns the terminal, so nothing may log over it
    let suppress_logs = matches!(cli.command, Commands::Explore(_));
    utils::logging::init_logging(cli.verbose, suppress_logs).map_err(ExplorerError::Internal)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Search(args) => cli::search::execute(args, &config).await,
        Commands::Explore(args) => cli::explore::execute(args, &config).await,
        Commands::Config(args) => {
            cli::config::execute(args, &config, cli.config.as_deref()).await
        }
        Commands::Cache(args) => cli::cache::execute(args, &config).await,
    }
}

fn report_error(error: &ExplorerError) {
    if error.is_missing_token() {
        eprintln!("❌ {}", error::ConfigError::MissingToken);
        return;
    }

    if error.is_rate_limited() {
        warn!("Genius kept rate limiting the request: {}", error);
    }
    eprintln!("❌ {}", Messages::error(error));
    eprintln!("{}", Messages::RATE_LIMIT_HINT);
}
