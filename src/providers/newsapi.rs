//! NewsAPI `everything` search.
//!
//! Used for both source 1 and source 3. A response looks like:
//!
//! ```text
//! { "status": "ok", "totalResults": 2,
//!   "articles": [ { "source": { "id": "cnn", "name": "CNN" },
//!                   "title": "...", "description": "...", "url": "..." } ] }
//! ```

use super::PAGE_SIZE;
use crate::models::NormalizedArticle;
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    source: ArticleSource,
    title: String,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ArticleSource {
    id: Option<String>,
    name: Option<String>,
}

impl From<Article> for NormalizedArticle {
    fn from(article: Article) -> Self {
        NormalizedArticle {
            id: article.source.id.unwrap_or_default(),
            title: article.title,
            description: article.description,
            source: article.source.name,
            url: article.url,
        }
    }
}

/// Build the search URL for `query` published on or after `from`.
pub fn request_url(base: &str, query: &str, from: &str, api_key: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut()
        .append_pair("q", query)
        .append_pair("from", from)
        .append_pair("pageSize", &PAGE_SIZE.to_string())
        .append_pair("sortBy", "publishedAt")
        .append_pair("apiKey", api_key);
    Ok(url)
}

/// Map a NewsAPI response body into normalized records, keeping response order.
pub fn normalize(body: &str) -> Result<Vec<NormalizedArticle>, serde_json::Error> {
    let response: EverythingResponse = serde_json::from_str(body)?;
    Ok(response.articles.into_iter().map(NormalizedArticle::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_single_article() {
        let body = r#"{"articles":[{"source":{"id":"cnn"},"title":"T","description":"D","url":"U"}]}"#;
        let articles = normalize(body).unwrap();

        assert_eq!(
            articles,
            vec![NormalizedArticle {
                id: "cnn".to_string(),
                title: "T".to_string(),
                description: Some("D".to_string()),
                source: None,
                url: Some("U".to_string()),
            }]
        );
    }

    #[test]
    fn test_normalize_carries_publisher_name() {
        let body = serde_json::json!({
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "source": { "id": "the-verge", "name": "The Verge" },
                    "author": "Jane Smith",
                    "title": "First",
                    "description": null,
                    "url": "https://example.com/1",
                    "publishedAt": "2025-01-28T12:00:00Z"
                },
                {
                    "source": { "id": null, "name": "Electrek" },
                    "title": "Second",
                    "description": "Two",
                    "url": "https://example.com/2"
                }
            ]
        })
        .to_string();

        let articles = normalize(&body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "the-verge");
        assert_eq!(articles[0].source.as_deref(), Some("The Verge"));
        assert_eq!(articles[0].description, None);
        assert_eq!(articles[1].id, "");
        assert_eq!(articles[1].title, "Second");
    }

    #[test]
    fn test_normalize_rejects_missing_articles() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"bad key"}"#;
        assert!(normalize(body).is_err());
    }

    #[test]
    fn test_normalize_rejects_missing_title() {
        let body = r#"{"articles":[{"source":{"id":"cnn"},"url":"U"}]}"#;
        assert!(normalize(body).is_err());
    }

    #[test]
    fn test_request_url_parameters() {
        let url = request_url("https://newsapi.org/v2/everything", "electric cars", "2025-01-28", "k3y").unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/v2/everything");
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "electric cars".to_string()),
                ("from".to_string(), "2025-01-28".to_string()),
                ("pageSize".to_string(), "10".to_string()),
                ("sortBy".to_string(), "publishedAt".to_string()),
                ("apiKey".to_string(), "k3y".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_url_rejects_bad_base() {
        assert!(request_url("not a url", "tesla", "2025-01-28", "k").is_err());
    }
}
