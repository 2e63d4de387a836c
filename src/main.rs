//! # News Search
//!
//! Searches several news APIs at once and merges their results into one list
//! of normalized articles.
//!
//! ## Sources
//!
//! - NewsAPI `everything` search (sources 1 and 3)
//! - The Guardian content search (source 2)
//!
//! ## Usage
//!
//! ```sh
//! NEWSAPI_KEY=... GUARDIAN_API_KEY=... news_search -q tesla -f 2025-01-28
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: CLI flags, environment and an optional YAML file
//! 2. **Search**: the aggregator queries the selected sources and merges them
//!    in source order; any failure fails the search unless partial results
//!    were requested
//! 3. **Output**: the session is rendered to the terminal and optionally
//!    written as JSON
//! 4. **Interactive**: optionally keep editing inputs and re-running searches

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod prompt;
mod providers;
mod session;
mod utils;

use aggregator::Aggregator;
use api::HttpFetcher;
use cli::Cli;
use config::{AppConfig, Dispatch, load_config};
use outputs::{json, terminal};
use session::{FailureMode, SearchSession};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_search starting up");

    let args = Cli::parse();
    debug!(query = %args.query, from = %args.from_date, source = %args.source, "Parsed CLI arguments");

    // ---- Configuration ----
    let mut config = match &args.config {
        Some(path) => load_config(path).inspect_err(|e| {
            error!(path = %path, error = %e, "Failed to load configuration");
        })?,
        None => AppConfig::default(),
    };
    config.override_keys(args.newsapi_key.clone(), args.guardian_key.clone());
    if args.sequential {
        config.dispatch = Dispatch::Sequential;
    }

    let fetcher = HttpFetcher::new(config.timeout())?;
    let aggregator = Aggregator::new(fetcher, config.endpoints()).with_dispatch(config.dispatch);

    let mode = if args.allow_partial {
        FailureMode::Partial
    } else {
        FailureMode::AllOrNothing
    };
    let mut session = SearchSession::new(args.query.clone(), args.from_date.clone(), args.source.clone())
        .with_mode(mode);

    // ---- Initial search ----
    session.search(&aggregator).await;
    print!("{}", terminal::render_session(&args.title, &session));

    if let Some(output) = &args.output {
        if let Err(e) = json::write_results(&session, Path::new(output)).await {
            error!(path = %output, error = %e, "Failed to write JSON results");
        }
    }

    // ---- Interactive ----
    if args.interactive {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        prompt::run(&args.title, &mut session, &aggregator, stdin, tokio::io::stdout()).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = session.articles().len(),
        failed = session.error().is_some(),
        "Execution complete"
    );

    Ok(())
}
