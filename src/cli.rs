//! Command-line interface definitions.
//!
//! Every option can be given as a flag; API keys and the config path also
//! fall back to environment variables.

use crate::session::{DEFAULT_FROM_DATE, DEFAULT_QUERY, DEFAULT_SELECTOR};
use clap::Parser;

/// Command-line arguments for news_search.
///
/// # Examples
///
/// ```sh
/// # One search across every source with the defaults
/// news_search
///
/// # Only the Guardian, from a given date, also written as JSON
/// news_search -q "electric vehicles" -f 2025-02-01 -s api2 -o ./out/results.json
///
/// # Keep editing and re-running searches
/// news_search --interactive
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search keyword
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(short, long = "from", default_value = DEFAULT_FROM_DATE)]
    pub from_date: String,

    /// Sources to query: all, api1 (NewsAPI), api2 (The Guardian), api3 (NewsAPI.org)
    #[arg(short, long, default_value = DEFAULT_SELECTOR)]
    pub source: String,

    /// Optional path to config.yaml file
    #[arg(short, long, env = "NEWS_SEARCH_CONFIG")]
    pub config: Option<String>,

    /// NewsAPI key, used for sources 1 and 3
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub newsapi_key: Option<String>,

    /// Guardian content API key
    #[arg(long, env = "GUARDIAN_API_KEY", hide_env_values = true)]
    pub guardian_key: Option<String>,

    /// Also write results to this JSON file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show results from sources that succeeded even when another fails
    #[arg(long)]
    pub allow_partial: bool,

    /// Query sources one at a time instead of all at once
    #[arg(long)]
    pub sequential: bool,

    /// Keep reading commands after the first search
    #[arg(short, long)]
    pub interactive: bool,

    /// Heading printed above the results
    #[arg(long, default_value = "News Search")]
    pub title: String,
}
