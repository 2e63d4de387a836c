//! Request builders and response normalizers for each news provider.
//!
//! Every provider module exports the same two functions:
//! - `request_url(base, query, from, api_key)`: the search URL for one query
//! - `normalize(body)`: maps the raw JSON body into [`NormalizedArticle`]s
//!
//! # Supported Providers
//!
//! | Source | Module | Endpoint | Notes |
//! |--------|--------|----------|-------|
//! | NewsAPI (1) | [`newsapi`] | `/v2/everything` | Sorted by publish time |
//! | The Guardian (2) | [`guardian`] | `/search` | Sorted by relevance; no publisher name |
//! | NewsAPI.org (3) | [`newsapi`] | `/v2/everything` | Same shape as source 1 |
//!
//! Both providers are capped at [`PAGE_SIZE`] results per search.
//!
//! [`NormalizedArticle`]: crate::models::NormalizedArticle

pub mod guardian;
pub mod newsapi;

/// Results requested from each provider.
pub const PAGE_SIZE: u32 = 10;
