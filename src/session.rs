//! Search state: the inputs, the current results and the status flags.
//!
//! A [`SearchSession`] holds what a search screen shows: the keyword, the
//! from-date, the source selector, the article list, an error message and a
//! loading flag. Every search replaces the article list in full.
//!
//! # Overlapping searches
//!
//! [`SearchSession::search`] holds the session mutably until it settles, so
//! searches started through it never overlap. Callers that run searches
//! concurrently drive [`SearchSession::begin`] and [`SearchSession::settle`]
//! themselves: each search takes a [`SearchTicket`], only the outcome for the
//! most recent ticket is applied, and an older search that settles late is
//! discarded.

use crate::aggregator::{merge_outcomes, Aggregator};
use crate::api::FetchBody;
use crate::error::{FetchFailure, USER_MESSAGE};
use crate::models::{NormalizedArticle, SearchRequest, SourceOutcome};
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_QUERY: &str = "tesla";
pub const DEFAULT_FROM_DATE: &str = "2025-01-28";
pub const DEFAULT_SELECTOR: &str = "all";

/// How a session treats a search where some sources fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Any failure clears the results and shows the generic message.
    #[default]
    AllOrNothing,
    /// Keep results from sources that succeeded and name the ones that failed.
    Partial,
}

/// Identifies one search started on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone)]
pub struct SearchSession {
    pub query: String,
    pub from_date: String,
    pub selector: String,
    pub mode: FailureMode,
    articles: Vec<NormalizedArticle>,
    error: Option<String>,
    loading: bool,
    generation: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY, DEFAULT_FROM_DATE, DEFAULT_SELECTOR)
    }
}

impl SearchSession {
    pub fn new(query: impl Into<String>, from_date: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            from_date: from_date.into(),
            selector: selector.into(),
            mode: FailureMode::default(),
            articles: Vec::new(),
            error: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn with_mode(mut self, mode: FailureMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn articles(&self) -> &[NormalizedArticle] {
        &self.articles
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The request the current inputs describe.
    pub fn request(&self) -> SearchRequest {
        SearchRequest::new(self.query.clone(), self.from_date.clone(), &self.selector)
    }

    /// Mark a search as started: loading on, error cleared.
    pub fn begin(&mut self) -> SearchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        SearchTicket(self.generation)
    }

    fn is_current(&self, ticket: SearchTicket) -> bool {
        if ticket.0 != self.generation {
            debug!(ticket = ticket.0, current = self.generation, "Discarding stale search outcome");
            return false;
        }
        true
    }

    /// Apply an all-or-nothing outcome. Returns `false` for a stale ticket.
    pub fn settle(&mut self, ticket: SearchTicket, outcome: Result<Vec<NormalizedArticle>, FetchFailure>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        match outcome {
            Ok(articles) => {
                info!(count = articles.len(), "Search settled");
                self.articles = articles;
            }
            Err(failure) => {
                warn!(error = %failure, "Search failed");
                self.articles.clear();
                self.error = Some(USER_MESSAGE.to_string());
            }
        }
        self.loading = false;
        true
    }

    /// Apply per-source outcomes, keeping whatever succeeded. Returns `false`
    /// for a stale ticket.
    pub fn settle_partial(&mut self, ticket: SearchTicket, outcomes: Vec<SourceOutcome>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        for outcome in &outcomes {
            debug!(source = %outcome.source(), ok = matches!(outcome, SourceOutcome::Success { .. }), "Source outcome");
        }
        let (articles, failures) = merge_outcomes(outcomes);
        info!(count = articles.len(), failed_sources = failures.len(), "Search settled");

        self.articles = articles;
        if !failures.is_empty() {
            for failure in &failures {
                warn!(error = %failure, "Source failed");
            }
            let names = failures.iter().map(|f| f.provider.label()).join(", ");
            self.error = Some(format!("{USER_MESSAGE} from {names}"));
        }
        self.loading = false;
        true
    }

    /// Run a full search with the current inputs and apply its outcome.
    #[instrument(level = "info", skip_all, fields(query = %self.query, from = %self.from_date, selector = %self.selector))]
    pub async fn search<F>(&mut self, aggregator: &Aggregator<F>) -> &[NormalizedArticle]
    where
        F: FetchBody,
    {
        let ticket = self.begin();
        let request = self.request();
        match self.mode {
            FailureMode::AllOrNothing => {
                let outcome = aggregator.search(&request).await;
                self.settle(ticket, outcome);
            }
            FailureMode::Partial => {
                let outcomes = aggregator.search_by_source(&request).await;
                self.settle_partial(ticket, outcomes);
            }
        }
        &self.articles
    }
}
