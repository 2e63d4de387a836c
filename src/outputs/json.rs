//! JSON output of merged search results.

use crate::models::NormalizedArticle;
use crate::session::SearchSession;
use crate::utils::ensure_writable_dir;
use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// The document written to disk for one search.
#[derive(Debug, Serialize)]
pub struct SearchResults<'a> {
    pub query: &'a str,
    pub from: &'a str,
    pub selector: &'a str,
    pub articles: &'a [NormalizedArticle],
}

impl<'a> From<&'a SearchSession> for SearchResults<'a> {
    fn from(session: &'a SearchSession) -> Self {
        SearchResults {
            query: &session.query,
            from: &session.from_date,
            selector: &session.selector,
            articles: session.articles(),
        }
    }
}

/// Write the session's current results to `path` as pretty-printed JSON.
///
/// # Arguments
///
/// * `session` - The session whose inputs and articles are written
/// * `path` - Destination file; its parent directory is created when missing
///
/// # Returns
///
/// `Ok(())` on success, or an error if the directory is not writable,
/// serialization fails or the file cannot be written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_results(session: &SearchSession, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&SearchResults::from(session))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = ensure_writable_dir(parent).await {
            error!(dir = %parent.display(), error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    fs::write(path, json).await?;
    info!(count = session.articles().len(), "Wrote JSON results");
    Ok(())
}
