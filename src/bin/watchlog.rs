mod commands;

use clap::Parser;
use commands::{execute_command, utils::load_context, Commands};
use std::path::PathBuf;

/// Personal log of watched movies and TV shows
#[derive(Parser)]
#[command(
    name = "watchlog",
    about = "Personal log of watched movies and TV shows",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Database file (default: $WATCHLOG_DATABASE or the XDG data directory)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// TMDB API key (default: $TMDB_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    commands::utils::init_logging(args.verbose);

    let ctx = match load_context(args.database, args.api_key) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("❌ Failed to open the watch log: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(args.command.unwrap_or(Commands::Menu), &ctx).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
