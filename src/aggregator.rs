//! The article aggregator: build requests, dispatch, normalize, merge.
//!
//! # Pipeline
//!
//! 1. **Request construction**: one URL per selected source from the keyword,
//!    the from-date and the provider's fixed paging/sort parameters
//! 2. **Selective dispatch**: only the sources the [`Selector`] picks are queried
//! 3. **Normalization**: each body is mapped into [`NormalizedArticle`]s
//! 4. **Merge**: results are concatenated in source order (1, 2, 3) with no
//!    sorting and no de-duplication
//!
//! [`Aggregator::search`] is all-or-nothing: the first failing source fails
//! the whole search. [`Aggregator::search_by_source`] keeps every source's
//! outcome so a caller can decide to show partial results.
//!
//! [`Selector`]: crate::models::Selector

use crate::api::FetchBody;
use crate::config::{Dispatch, Endpoints};
use crate::error::FetchFailure;
use crate::models::{NormalizedArticle, SearchRequest, Selector, Source, SourceOutcome};
use crate::providers::{guardian, newsapi};
use crate::utils::{looks_like_iso_date, truncate_for_log};
use futures::future::{join_all, try_join_all};
use itertools::{Either, Itertools};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Queries the configured sources and merges their results.
#[derive(Debug)]
pub struct Aggregator<F> {
    fetcher: F,
    endpoints: Endpoints,
    dispatch: Dispatch,
}

impl<F> Aggregator<F>
where
    F: FetchBody,
{
    pub fn new(fetcher: F, endpoints: Endpoints) -> Self {
        Self {
            fetcher,
            endpoints,
            dispatch: Dispatch::default(),
        }
    }

    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The URL that `source` would be queried with for `request`.
    pub fn request_url(&self, source: Source, request: &SearchRequest) -> Result<Url, url::ParseError> {
        let endpoint = self.endpoints.for_source(source);
        match source {
            Source::NewsApi | Source::NewsApiOrg => newsapi::request_url(
                &endpoint.base,
                &request.query,
                &request.from_date,
                &endpoint.api_key,
            ),
            Source::Guardian => guardian::request_url(
                &endpoint.base,
                &request.query,
                &request.from_date,
                &endpoint.api_key,
            ),
        }
    }

    /// Query one source end to end.
    #[instrument(level = "info", skip_all, fields(%source))]
    pub async fn fetch_source(
        &self,
        source: Source,
        request: &SearchRequest,
    ) -> Result<Vec<NormalizedArticle>, FetchFailure> {
        let t0 = Instant::now();
        let url = self
            .request_url(source, request)
            .map_err(|e| FetchFailure::new(source, e))?;

        let body = self.fetcher.get_text(&url).await.map_err(|cause| {
            warn!(error = %cause, "Request failed");
            FetchFailure::new(source, cause)
        })?;

        let articles = normalize(source, &body).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "Response did not match the expected shape"
            );
            FetchFailure::new(source, e)
        })?;

        info!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u128,
            "Normalized articles"
        );
        Ok(articles)
    }

    /// Search every selected source and merge, failing if any source fails.
    ///
    /// Sources are queried according to the configured [`Dispatch`] mode and
    /// their records concatenated in source order (1, 2, 3). Nothing is
    /// sorted or de-duplicated.
    ///
    /// # Arguments
    ///
    /// * `request` - Keyword, from-date and selector for this search
    ///
    /// # Returns
    ///
    /// The merged records, or an empty list when the selector is
    /// unrecognized (no request is sent in that case).
    ///
    /// # Errors
    ///
    /// The first [`FetchFailure`] from any selected source. Records from
    /// sources that succeeded are discarded.
    #[instrument(level = "info", skip_all, fields(query = %request.query, from = %request.from_date, selector = %request.selector))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<NormalizedArticle>, FetchFailure> {
        let sources = self.selected_sources(request);
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let per_source = match self.dispatch {
            Dispatch::Sequential => {
                let mut per_source = Vec::with_capacity(sources.len());
                for source in sources {
                    per_source.push(self.fetch_source(source, request).await?);
                }
                per_source
            }
            Dispatch::Concurrent => {
                try_join_all(sources.into_iter().map(|source| self.fetch_source(source, request))).await?
            }
        };

        let merged = per_source.concat();
        info!(count = merged.len(), "Merged search results");
        Ok(merged)
    }

    /// Search every selected source, keeping each source's outcome.
    ///
    /// Outcomes are returned in source order. A failure never stops the
    /// remaining sources from being queried.
    #[instrument(level = "info", skip_all, fields(query = %request.query, from = %request.from_date, selector = %request.selector))]
    pub async fn search_by_source(&self, request: &SearchRequest) -> Vec<SourceOutcome> {
        let sources = self.selected_sources(request);

        let results = match self.dispatch {
            Dispatch::Sequential => {
                let mut results = Vec::with_capacity(sources.len());
                for source in &sources {
                    results.push(self.fetch_source(*source, request).await);
                }
                results
            }
            Dispatch::Concurrent => {
                join_all(sources.iter().map(|source| self.fetch_source(*source, request))).await
            }
        };

        results
            .into_iter()
            .zip(sources)
            .map(|(result, source)| match result {
                Ok(articles) => SourceOutcome::Success { source, articles },
                Err(failure) => SourceOutcome::Failure(failure),
            })
            .collect()
    }

    fn selected_sources(&self, request: &SearchRequest) -> Vec<Source> {
        if !looks_like_iso_date(&request.from_date) {
            warn!(from = %request.from_date, "From-date is not YYYY-MM-DD; sending it unchanged");
        }
        if let Selector::Unrecognized(raw) = &request.selector {
            warn!(selector = %raw, "Unrecognized source selector; no sources will be queried");
        }
        let sources = request.selector.sources();
        debug!(?sources, dispatch = ?self.dispatch, "Selected sources");
        sources
    }
}

fn normalize(source: Source, body: &str) -> Result<Vec<NormalizedArticle>, serde_json::Error> {
    match source {
        Source::NewsApi | Source::NewsApiOrg => newsapi::normalize(body),
        Source::Guardian => guardian::normalize(body),
    }
}

/// Split per-source outcomes into the merged successful records (source
/// order preserved) and the failures.
pub fn merge_outcomes(outcomes: Vec<SourceOutcome>) -> (Vec<NormalizedArticle>, Vec<FetchFailure>) {
    let (articles, failures): (Vec<Vec<NormalizedArticle>>, Vec<FetchFailure>) =
        outcomes.into_iter().partition_map(|outcome| match outcome {
            SourceOutcome::Success { articles, .. } => Either::Left(articles),
            SourceOutcome::Failure(failure) => Either::Right(failure),
        });
    (articles.concat(), failures)
}

#[cfg(test)]
pub(crate) mod testing {
    //! A canned-response [`FetchBody`] for driving the pipeline without a network.

    use crate::api::FetchBody;
    use crate::config::{Endpoint, Endpoints};
    use crate::error::FailureCause;
    use reqwest::StatusCode;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use url::Url;

    pub const NEWSAPI_PATH: &str = "/one";
    pub const GUARDIAN_PATH: &str = "/two";
    pub const NEWSAPIORG_PATH: &str = "/three";

    /// Answers by URL path; unknown paths get a 404.
    #[derive(Debug, Default)]
    pub struct StubFetcher {
        responses: HashMap<String, Result<String, StatusCode>>,
        pub calls: RefCell<Vec<Url>>,
    }

    impl StubFetcher {
        pub fn respond(mut self, path: &str, body: impl Into<String>) -> Self {
            self.responses.insert(path.to_string(), Ok(body.into()));
            self
        }

        pub fn fail(mut self, path: &str, status: StatusCode) -> Self {
            self.responses.insert(path.to_string(), Err(status));
            self
        }

        pub fn called_paths(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|u| u.path().to_string()).collect()
        }
    }

    impl FetchBody for StubFetcher {
        async fn get_text(&self, url: &Url) -> Result<String, FailureCause> {
            self.calls.borrow_mut().push(url.clone());
            match self.responses.get(url.path()) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FailureCause::Status(*status)),
                None => Err(FailureCause::Status(StatusCode::NOT_FOUND)),
            }
        }
    }

    pub fn stub_endpoints() -> Endpoints {
        let endpoint = |path: &str, key: &str| Endpoint {
            base: format!("http://stub.local{path}"),
            api_key: key.to_string(),
        };
        Endpoints {
            newsapi: endpoint(NEWSAPI_PATH, "news-key"),
            guardian: endpoint(GUARDIAN_PATH, "guardian-key"),
            newsapiorg: endpoint(NEWSAPIORG_PATH, "news-key"),
        }
    }

    /// A NewsAPI body with one article per title, ids `<prefix>-<n>`.
    pub fn newsapi_body(prefix: &str, titles: &[&str]) -> String {
        let articles: Vec<serde_json::Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                serde_json::json!({
                    "source": { "id": format!("{prefix}-{i}"), "name": format!("{prefix} news") },
                    "title": title,
                    "description": format!("about {title}"),
                    "url": format!("https://{prefix}.example/{i}")
                })
            })
            .collect();
        serde_json::json!({ "status": "ok", "totalResults": articles.len(), "articles": articles }).to_string()
    }

    /// A Guardian body with one result per title.
    pub fn guardian_body(titles: &[&str]) -> String {
        let results: Vec<serde_json::Value> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                serde_json::json!({
                    "webPublicationDate": format!("2025-01-{:02}T00:00:00Z", i + 1),
                    "webTitle": title,
                    "webUrl": format!("https://www.theguardian.com/{i}")
                })
            })
            .collect();
        serde_json::json!({ "response": { "status": "ok", "results": results } }).to_string()
    }

    /// A stub answering all three sources successfully.
    pub fn all_sources_stub() -> StubFetcher {
        StubFetcher::default()
            .respond(NEWSAPI_PATH, newsapi_body("one", &["a1", "a2"]))
            .respond(GUARDIAN_PATH, guardian_body(&["g1", "g2", "g3"]))
            .respond(NEWSAPIORG_PATH, newsapi_body("three", &["c1"]))
    }
}
