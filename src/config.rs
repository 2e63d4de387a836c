//! Runtime configuration: provider endpoints, API keys and dispatch mode.
//!
//! Configuration is read once at startup. Values come from an optional YAML
//! file and are then overridden by CLI flags (which fall back to environment
//! variables, see [`crate::cli::Cli`]).
//!
//! ```yaml
//! newsapi_url: https://newsapi.org/v2/everything
//! guardian_url: https://content.guardianapis.com/search
//! newsapiorg_url: https://newsapi.org/v2/everything
//! newsapi_key: "..."
//! guardian_key: "..."
//! dispatch: concurrent
//! timeout_secs: 20
//! ```

use crate::models::Source;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument, warn};

pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org/v2/everything";
pub const DEFAULT_GUARDIAN_URL: &str = "https://content.guardianapis.com/search";

/// How selected sources are dispatched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// All selected requests in flight at once.
    #[default]
    Concurrent,
    /// One at a time in source order, stopping at the first failure.
    Sequential,
}

/// Settings loaded from `config.yaml`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub newsapi_url: String,
    pub guardian_url: String,
    pub newsapiorg_url: String,
    pub newsapi_key: Option<String>,
    pub guardian_key: Option<String>,
    pub dispatch: Dispatch,
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            newsapi_url: DEFAULT_NEWSAPI_URL.to_string(),
            guardian_url: DEFAULT_GUARDIAN_URL.to_string(),
            newsapiorg_url: DEFAULT_NEWSAPI_URL.to_string(),
            newsapi_key: None,
            guardian_key: None,
            dispatch: Dispatch::default(),
            timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Replace keys with the given values where present.
    pub fn override_keys(&mut self, newsapi_key: Option<String>, guardian_key: Option<String>) {
        if newsapi_key.is_some() {
            self.newsapi_key = newsapi_key;
        }
        if guardian_key.is_some() {
            self.guardian_key = guardian_key;
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve the per-source endpoints.
    ///
    /// A missing key is not an error: it is sent empty and the provider's
    /// rejection surfaces as a fetch failure.
    pub fn endpoints(&self) -> Endpoints {
        let newsapi_key = self.newsapi_key.clone().unwrap_or_else(|| {
            warn!("No NewsAPI key configured; NewsAPI searches will be rejected upstream");
            String::new()
        });
        let guardian_key = self.guardian_key.clone().unwrap_or_else(|| {
            warn!("No Guardian key configured; Guardian searches will be rejected upstream");
            String::new()
        });

        Endpoints {
            newsapi: Endpoint {
                base: self.newsapi_url.clone(),
                api_key: newsapi_key.clone(),
            },
            guardian: Endpoint {
                base: self.guardian_url.clone(),
                api_key: guardian_key,
            },
            newsapiorg: Endpoint {
                base: self.newsapiorg_url.clone(),
                api_key: newsapi_key,
            },
        }
    }
}

/// Load configuration from a YAML file.
///
/// Fields missing from the file keep their [`AppConfig::default`] values.
///
/// # Arguments
///
/// * `path` - Path to the `config.yaml` file
///
/// # Returns
///
/// The parsed [`AppConfig`], or an error if the file cannot be read or is
/// not valid YAML for this schema.
#[instrument(level = "info")]
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn Error>> {
    let yaml = std::fs::read_to_string(path)?;
    let config = AppConfig::from_yaml(&yaml)?;
    info!(dispatch = ?config.dispatch, "Loaded configuration");
    Ok(config)
}

/// Base URL and key for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base: String,
    pub api_key: String,
}

/// Resolved endpoints for every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub newsapi: Endpoint,
    pub guardian: Endpoint,
    pub newsapiorg: Endpoint,
}

impl Endpoints {
    pub fn for_source(&self, source: Source) -> &Endpoint {
        match source {
            Source::NewsApi => &self.newsapi,
            Source::Guardian => &self.guardian,
            Source::NewsApiOrg => &self.newsapiorg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.newsapi_url, DEFAULT_NEWSAPI_URL);
        assert_eq!(config.newsapiorg_url, DEFAULT_NEWSAPI_URL);
        assert_eq!(config.guardian_url, DEFAULT_GUARDIAN_URL);
        assert_eq!(config.dispatch, Dispatch::Concurrent);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml("guardian_key: abc\ndispatch: sequential\n").unwrap();
        assert_eq!(config.guardian_key.as_deref(), Some("abc"));
        assert_eq!(config.dispatch, Dispatch::Sequential);
        assert_eq!(config.newsapi_url, DEFAULT_NEWSAPI_URL);
    }

    #[test]
    fn test_unknown_dispatch_is_rejected() {
        assert!(AppConfig::from_yaml("dispatch: sideways\n").is_err());
    }

    #[test]
    fn test_override_keys_only_replaces_present_values() {
        let mut config = AppConfig::from_yaml("newsapi_key: from-file\nguardian_key: g-file\n").unwrap();
        config.override_keys(Some("from-cli".to_string()), None);

        assert_eq!(config.newsapi_key.as_deref(), Some("from-cli"));
        assert_eq!(config.guardian_key.as_deref(), Some("g-file"));
    }

    #[test]
    fn test_endpoints_share_newsapi_key() {
        let mut config = AppConfig::default();
        config.newsapi_key = Some("n".to_string());
        config.newsapiorg_url = "http://localhost:1234/org".to_string();

        let endpoints = config.endpoints();
        assert_eq!(endpoints.for_source(Source::NewsApi).api_key, "n");
        assert_eq!(endpoints.for_source(Source::NewsApiOrg).api_key, "n");
        assert_eq!(endpoints.for_source(Source::NewsApiOrg).base, "http://localhost:1234/org");
        assert_eq!(endpoints.for_source(Source::Guardian).api_key, "");
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs: 7").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("/nonexistent/news_search/config.yaml").is_err());
    }
}
