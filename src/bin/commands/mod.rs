pub mod list;
pub mod report;
pub mod search;
pub mod utils;

use clap::Subcommand;
use watchlog::{AppContext, Controller};

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total watch time for one day
    ///
    /// Usage examples:
    /// # Watch time logged today
    /// watchlog report daily
    ///
    /// # Watch time logged on a specific day
    /// watchlog report daily --date 2024-03-09
    Daily {
        /// Day to report on (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Total watch time for the seven days ending on a date
    Weekly {
        /// Last day of the window (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// The genre with the most logged entries
    Genre,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default when no command is given)
    Menu,

    /// List logged entries, most recent first
    ///
    /// Usage examples:
    /// # Show the ten most recent entries
    /// watchlog list --limit 10
    ///
    /// # Emit every entry as one JSON object per line
    /// watchlog list --json
    List {
        /// Maximum number of entries to show (0 for no limit)
        #[arg(long, default_value = "0")]
        limit: usize,

        /// Output one JSON object per entry
        #[arg(long)]
        json: bool,
    },

    /// Show logged entries by id
    Show {
        /// Ids of the entries to show
        ids: Vec<i64>,

        /// Output one JSON object per entry
        #[arg(long)]
        json: bool,
    },

    /// Watch-time reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Search the catalog for movies and TV shows
    ///
    /// Requires a TMDB API key (--api-key or TMDB_API_KEY).
    ///
    /// Usage examples:
    /// watchlog search "The Wire"
    ///
    /// # Fetch genre and runtime for the best match only
    /// watchlog search "The Wire" --first
    Search {
        /// Title to search for
        query: String,

        /// Maximum number of results to show (0 for no limit)
        #[arg(long, default_value = "10")]
        limit: usize,

        /// Show full details for the best-ranked match instead of listing matches
        #[arg(long)]
        first: bool,
    },
}

/// Execute the appropriate command handler based on the parsed command
pub async fn execute_command(
    command: Commands,
    ctx: &AppContext,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Menu => {
            Controller::stdio(ctx).run().await?;
            Ok(())
        }

        Commands::List { limit, json } => list::handle_list(ctx, limit, json),

        Commands::Show { ids, json } => {
            if ids.is_empty() {
                return Err("Must specify at least one id to show".into());
            }

            list::handle_show(ctx, &ids, json)
        }

        Commands::Report { command } => match command {
            ReportCommands::Daily { date } => report::handle_daily(ctx, date.as_deref()),
            ReportCommands::Weekly { date } => report::handle_weekly(ctx, date.as_deref()),
            ReportCommands::Genre => report::handle_genre(ctx),
        },

        Commands::Search {
            query,
            limit,
            first,
        } => {
            if first {
                search::handle_search_first(ctx, &query).await
            } else {
                search::handle_search(ctx, &query, limit).await
            }
        }
    }
}
