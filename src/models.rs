//! Data models for the aggregation pipeline.
//!
//! - [`NormalizedArticle`]: the common record every source is mapped into
//! - [`Source`]: the three configured providers, in merge order
//! - [`Selector`]: which subset of sources a search should query
//! - [`SearchRequest`]: the keyword/date/selector triple for one search
//! - [`SourceOutcome`]: one source's result when failures are kept per source

use crate::error::FetchFailure;
use serde::Serialize;
use std::fmt;

/// The common article shape produced from every provider response.
///
/// Optional fields are omitted from JSON output entirely when absent, so a
/// Guardian record carries no `source` key at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedArticle {
    /// Source-provided identifier. Not unique across sources.
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Publisher name, when the provider reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One of the configured news providers.
///
/// The declaration order is the merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// Source 1: NewsAPI `everything` search.
    NewsApi,
    /// Source 2: Guardian content search.
    Guardian,
    /// Source 3: a second NewsAPI-shaped endpoint.
    NewsApiOrg,
}

impl Source {
    /// All sources in merge order.
    pub const ALL: [Source; 3] = [Source::NewsApi, Source::Guardian, Source::NewsApiOrg];

    /// Human-readable provider name.
    pub fn label(self) -> &'static str {
        match self {
            Source::NewsApi => "NewsAPI",
            Source::Guardian => "The Guardian",
            Source::NewsApiOrg => "NewsAPI.org",
        }
    }

    /// Selector value that picks only this source.
    pub fn selector_value(self) -> &'static str {
        match self {
            Source::NewsApi => "api1",
            Source::Guardian => "api2",
            Source::NewsApiOrg => "api3",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which sources a search queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Only(Source),
    /// Anything not recognized. Queries nothing and is not an error.
    Unrecognized(String),
}

impl Selector {
    /// Interpret a raw selector value.
    ///
    /// Accepts exactly `all`, `api1`..`api3` and `source1`..`source3`. Any
    /// other spelling, including a different case or padding, is
    /// [`Selector::Unrecognized`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "all" => Selector::All,
            "api1" | "source1" => Selector::Only(Source::NewsApi),
            "api2" | "source2" => Selector::Only(Source::Guardian),
            "api3" | "source3" => Selector::Only(Source::NewsApiOrg),
            _ => Selector::Unrecognized(raw.to_string()),
        }
    }

    pub fn includes(&self, source: Source) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(only) => *only == source,
            Selector::Unrecognized(_) => false,
        }
    }

    /// Selected sources, in merge order.
    pub fn sources(&self) -> Vec<Source> {
        Source::ALL.into_iter().filter(|s| self.includes(*s)).collect()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("all"),
            Selector::Only(source) => f.write_str(source.selector_value()),
            Selector::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Inputs for a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text keyword. May be empty.
    pub query: String,
    /// Lower date bound, expected as `YYYY-MM-DD` but sent as given.
    pub from_date: String,
    pub selector: Selector,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, from_date: impl Into<String>, selector: &str) -> Self {
        Self {
            query: query.into(),
            from_date: from_date.into(),
            selector: Selector::parse(selector),
        }
    }
}

/// One source's result, kept separate from the others.
#[derive(Debug)]
pub enum SourceOutcome {
    Success {
        source: Source,
        articles: Vec<NormalizedArticle>,
    },
    Failure(FetchFailure),
}

impl SourceOutcome {
    pub fn source(&self) -> Source {
        match self {
            SourceOutcome::Success { source, .. } => *source,
            SourceOutcome::Failure(failure) => failure.provider,
        }
    }
}
