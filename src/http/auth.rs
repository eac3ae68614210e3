//! Request authentication
//!
//! Covers the schemes Elasticsearch clusters commonly accept.

use base64::Engine as _;
use reqwest::blocking::RequestBuilder;
use serde::{Deserialize, Serialize};

/// Authentication configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// Elasticsearch API key
    ///
    /// With `id` set, the header value is `base64(id:key)`. Without it, `key`
    /// is taken to be already encoded.
    ApiKey {
        /// API key id
        #[serde(default)]
        id: Option<String>,
        /// API key secret or pre-encoded key
        key: String,
    },
}

impl AuthConfig {
    /// Apply credentials to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            AuthConfig::None => req,
            AuthConfig::Basic { username, password } => req.basic_auth(username, Some(password)),
            AuthConfig::Bearer { token } => req.bearer_auth(token),
            AuthConfig::ApiKey { .. } => match self.api_key_header() {
                Some(value) => req.header("Authorization", value),
                None => req,
            },
        }
    }

    /// `Authorization` header value for API key auth
    pub fn api_key_header(&self) -> Option<String> {
        match self {
            AuthConfig::ApiKey { id: Some(id), key } => {
                let encoded =
                    base64::engine::general_purpose::STANDARD.encode(format!("{id}:{key}"));
                Some(format!("ApiKey {encoded}"))
            }
            AuthConfig::ApiKey { id: None, key } => Some(format!("ApiKey {key}")),
            _ => None,
        }
    }

    /// Short name of the scheme, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::ApiKey { .. } => "api_key",
        }
    }
}
