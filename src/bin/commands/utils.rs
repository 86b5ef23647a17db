use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use watchlog::{AppConfig, AppContext};

/// Initialise `env_logger`.
///
/// Logs go to stderr so they never mix with the menu. `RUST_LOG` wins over the
/// default filter; `--verbose` raises this crate to debug.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "watchlog=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Build the application context from the environment plus command-line overrides.
pub fn load_context(
    database: Option<PathBuf>,
    api_key: Option<String>,
) -> Result<AppContext, Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(database) = database {
        config = config.with_database_path(database);
    }
    if let Some(api_key) = api_key {
        config = config.with_api_key(api_key);
    }

    log::debug!("Using database {}", config.database_path.display());
    let http_client = http_client::native::NativeClient::new();
    Ok(AppContext::from_config(&config, Box::new(http_client))?)
}

/// Parse an optional `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match date {
        Some(date) => NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Invalid date '{date}'. Expected YYYY-MM-DD").into()),
        None => Ok(Local::now().date_naive()),
    }
}
