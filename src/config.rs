//! Scroll configuration
//!
//! A scroll job is described in a YAML or JSON file:
//!
//! ```yaml
//! url: https://localhost:9200
//! index: logs-*
//! query:
//!   term: { level: error }
//! size: 500
//! scroll: 2m
//! auth:
//!   type: basic
//!   username: elastic
//!   password: ${ELASTIC_PASSWORD}
//! http:
//!   max_retries: 5
//! ```
//!
//! `${VAR}` placeholders in the url and auth fields are resolved from the
//! environment when the file is loaded.

use crate::error::{Error, Result};
use crate::http::{AuthConfig, HttpClientConfig};
use crate::page::{HitsPath, DEFAULT_HITS_PATH};
use crate::pagination::{ScrollRequest, DEFAULT_KEEP_ALIVE, DEFAULT_PAGE_SIZE};
use crate::types::BackoffType;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Regex for matching environment placeholders: ${VAR_NAME}
static ENV_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

// ============================================================================
// Top-Level Scroll Config
// ============================================================================

/// Complete scroll job configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Cluster base URL
    pub url: String,

    /// Index name or pattern
    pub index: String,

    /// Query clause
    #[serde(default = "default_query")]
    pub query: Value,

    /// Sort clause, `_doc` order when unset
    #[serde(default)]
    pub sort: Option<Value>,

    /// Hits per page
    #[serde(default = "default_size")]
    pub size: u32,

    /// Scroll context keep-alive
    #[serde(default = "default_scroll")]
    pub scroll: String,

    /// Dotted path to the hit list in each response
    #[serde(default = "default_hits_path")]
    pub hits_path: String,

    /// Authentication
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_query() -> Value {
    serde_json::json!({"match_all": {}})
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_scroll() -> String {
    DEFAULT_KEEP_ALIVE.to_string()
}

fn default_hits_path() -> String {
    DEFAULT_HITS_PATH.to_string()
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

// ============================================================================
// Loading & Conversion
// ============================================================================

impl ScrollConfig {
    /// Minimal config for an index on a cluster
    pub fn new(url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index: index.into(),
            query: default_query(),
            sort: None,
            size: default_size(),
            scroll: default_scroll(),
            hits_path: default_hits_path(),
            auth: AuthConfig::None,
            http: HttpSettings::default(),
        }
    }

    /// Parse a YAML (or JSON) document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Check that the config describes a runnable scroll
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(Error::missing_field("url"));
        }
        let parsed = url::Url::parse(&self.url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }
        if self.index.trim().is_empty() {
            return Err(Error::missing_field("index"));
        }
        if self.size == 0 {
            return Err(Error::invalid_value("size", "must be greater than 0"));
        }
        if self.scroll.trim().is_empty() {
            return Err(Error::invalid_value("scroll", "keep-alive must not be empty"));
        }
        if !self.query.is_object() {
            return Err(Error::invalid_value("query", "must be a JSON object"));
        }
        HitsPath::parse(&self.hits_path)?;
        Ok(())
    }

    /// Resolve `${VAR}` placeholders using the process environment
    pub fn resolve_env(&mut self) -> Result<()> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve `${VAR}` placeholders with a custom lookup
    pub fn resolve_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.url = interpolate(&self.url, &lookup)?;
        match &mut self.auth {
            AuthConfig::None => {}
            AuthConfig::Basic { username, password } => {
                *username = interpolate(username, &lookup)?;
                *password = interpolate(password, &lookup)?;
            }
            AuthConfig::Bearer { token } => *token = interpolate(token, &lookup)?,
            AuthConfig::ApiKey { id, key } => {
                if let Some(id) = id {
                    *id = interpolate(id, &lookup)?;
                }
                *key = interpolate(key, &lookup)?;
            }
        }
        Ok(())
    }

    /// Parsed hits path
    pub fn hits_path(&self) -> Result<HitsPath> {
        HitsPath::parse(&self.hits_path)
    }

    /// HTTP client configuration for this cluster
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .base_url(self.url.clone())
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff,
                Duration::from_millis(self.http.initial_backoff_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            )
            .build()
    }

    /// Scroll request for the paginator
    pub fn scroll_request(&self) -> Result<ScrollRequest> {
        let mut request = ScrollRequest::new(self.index.clone())
            .query(self.query.clone())
            .size(self.size)
            .keep_alive(self.scroll.clone())
            .hits_path(self.hits_path()?);
        if let Some(sort) = &self.sort {
            request = request.sort(sort.clone());
        }
        Ok(request)
    }
}

/// Load a scroll config from a YAML or JSON file and resolve env placeholders
pub fn load_config(path: impl AsRef<Path>) -> Result<ScrollConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let mut config = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content)?,
        _ => ScrollConfig::from_yaml_str(&content)?,
    };
    config.resolve_env()?;
    Ok(config)
}

fn interpolate<F>(input: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = None;
    let output = ENV_REGEX.replace_all(input, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        lookup(name).unwrap_or_else(|| {
            missing.get_or_insert_with(|| name.to_string());
            String::new()
        })
    });

    match missing {
        Some(name) => Err(Error::config(format!(
            "environment variable '{name}' is not set"
        ))),
        None => Ok(output.into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Write;

    const YAML: &str = r"
url: http://localhost:9200
index: logs-*
query:
  term:
    level: error
size: 250
scroll: 2m
auth:
  type: basic
  username: elastic
  password: ${ES_PASSWORD}
http:
  max_retries: 5
  backoff: linear
";

    #[test]
    fn test_parse_yaml() {
        let config = ScrollConfig::from_yaml_str(YAML).unwrap();
        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.index, "logs-*");
        assert_eq!(config.query, json!({"term": {"level": "error"}}));
        assert_eq!(config.size, 250);
        assert_eq!(config.scroll, "2m");
        assert_eq!(config.hits_path, "hits.hits");
        assert_eq!(config.http.max_retries, 5);
        assert_eq!(config.http.backoff, BackoffType::Linear);
        assert_eq!(config.http.timeout_secs, 30);
        config.validate().unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = ScrollConfig::from_yaml_str("url: http://es:9200\nindex: docs\n").unwrap();
        assert_eq!(config, ScrollConfig::new("http://es:9200", "docs"));
        assert_eq!(config.auth, AuthConfig::None);
    }

    #[test]
    fn test_resolve_env() {
        let mut config = ScrollConfig::from_yaml_str(YAML).unwrap();
        let vars: HashMap<&str, &str> = [("ES_PASSWORD", "s3cret")].into();
        config
            .resolve_with(|name| vars.get(name).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(
            config.auth,
            AuthConfig::Basic {
                username: "elastic".to_string(),
                password: "s3cret".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_env_missing_variable() {
        let mut config = ScrollConfig::from_yaml_str(YAML).unwrap();
        let err = config.resolve_with(|_| None).unwrap_err();
        assert!(err.to_string().contains("ES_PASSWORD"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ScrollConfig::new("http://localhost:9200", "docs");
        config.size = 0;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "size"
        ));

        let config = ScrollConfig::new("http://localhost:9200", "  ");
        assert!(matches!(
            config.validate(),
            Err(Error::MissingConfigField { ref field }) if field == "index"
        ));

        let config = ScrollConfig::new("not a url", "docs");
        assert!(matches!(config.validate(), Err(Error::InvalidUrl(_))));

        let config = ScrollConfig::new("ftp://localhost", "docs");
        assert!(config.validate().is_err());

        let mut config = ScrollConfig::new("http://localhost:9200", "docs");
        config.hits_path = "hits..hits".to_string();
        assert!(config.validate().is_err());

        let mut config = ScrollConfig::new("http://localhost:9200", "docs");
        config.query = json!("match_all");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_scroll_request_conversion() {
        let mut config = ScrollConfig::new("http://localhost:9200", "docs");
        config.sort = Some(json!(["@timestamp"]));
        config.size = 10;

        let request = config.scroll_request().unwrap();
        assert_eq!(request.index, "docs");
        assert_eq!(request.size, 10);
        assert_eq!(request.sort, Some(json!(["@timestamp"])));

        let http = config.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some("http://localhost:9200"));
        assert_eq!(http.max_retries, 3);
        assert_eq!(http.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_load_config_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"url": "http://localhost:9200", "index": "docs", "auth": {{"type": "bearer", "token": "t"}}}}"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.index, "docs");
        assert_eq!(
            config.auth,
            AuthConfig::Bearer {
                token: "t".to_string()
            }
        );
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nope/scroll.yaml").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
