//! Guardian content search (source 2).
//!
//! The Guardian reports no publisher name, so records carry no `source`, and
//! the canonical URL doubles as the description.

use super::PAGE_SIZE;
use crate::models::NormalizedArticle;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    response: SearchResponse,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    web_publication_date: String,
    web_title: String,
    web_url: String,
}

impl From<SearchResult> for NormalizedArticle {
    fn from(result: SearchResult) -> Self {
        NormalizedArticle {
            id: result.web_publication_date,
            title: result.web_title,
            description: Some(result.web_url.clone()),
            source: None,
            url: Some(result.web_url),
        }
    }
}

/// Build the content search URL for `query` published on or after `from`.
pub fn request_url(base: &str, query: &str, from: &str, api_key: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("from", from)
        .append_pair("page-size", &PAGE_SIZE.to_string())
        .append_pair("order-by", "relevance")
        .append_pair("api-key", api_key);
    Ok(url)
}

/// Map a Guardian response body into normalized records, keeping response order.
pub fn normalize(body: &str) -> Result<Vec<NormalizedArticle>, serde_json::Error> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;
    Ok(envelope
        .response
        .results
        .into_iter()
        .map(NormalizedArticle::from)
        .collect())
}
