//! HTTP access behind a small trait.
//!
//! The aggregator never talks to `reqwest` directly. It goes through
//! [`FetchBody`], which has one production implementation ([`HttpFetcher`])
//! and can be stubbed in tests so the merge and session logic run without a
//! network.
//!
//! A non-2xx status is a failure here, before any body parsing happens.

use crate::error::FailureCause;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

/// Fetch the body of a GET request as text.
pub trait FetchBody {
    /// Issue a GET for `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Transport failures and non-success statuses both return a
    /// [`FailureCause`].
    async fn get_text(&self, url: &Url) -> Result<String, FailureCause>;
}

/// [`FetchBody`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with an optional per-request timeout.
    ///
    /// With no timeout the transport's defaults apply.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl FetchBody for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(host = url.host_str().unwrap_or_default(), path = %url.path()))]
    async fn get_text(&self, url: &Url) -> Result<String, FailureCause> {
        let t0 = Instant::now();
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                %status,
                elapsed_ms = t0.elapsed().as_millis() as u128,
                "Upstream returned non-success status"
            );
            return Err(FailureCause::Status(status));
        }

        let body = response.text().await?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u128,
            "Fetched response body"
        );
        Ok(body)
    }
}
