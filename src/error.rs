//! The single failure kind produced by the aggregation pipeline.
//!
//! Every way a source can fail (transport, HTTP status, unexpected body
//! shape) is a [`FetchFailure`]. Callers that only care about the generic
//! outcome display [`USER_MESSAGE`]; the detailed cause stays in the logs.

use crate::models::Source;
use reqwest::StatusCode;
use thiserror::Error;

/// The message shown to the user whenever any dispatched source fails.
pub const USER_MESSAGE: &str = "Failed to fetch article data";

/// A failed fetch from one source.
#[derive(Debug, Error)]
#[error("{provider} fetch failed: {cause}")]
pub struct FetchFailure {
    /// Which source failed.
    pub provider: Source,
    /// What went wrong.
    #[source]
    pub cause: FailureCause,
}

impl FetchFailure {
    pub fn new(provider: Source, cause: impl Into<FailureCause>) -> Self {
        Self {
            provider,
            cause: cause.into(),
        }
    }
}

/// Why a source failed.
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(StatusCode),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}
