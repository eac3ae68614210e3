//! Page model and hit extraction
//!
//! A [`Page`] is one fetched batch of search results. Hits live at a fixed
//! dotted path inside the page body, `hits.hits` for Elasticsearch responses.

use crate::error::{Error, Result};
use crate::types::Hit;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default location of the hit list inside a search response
pub const DEFAULT_HITS_PATH: &str = "hits.hits";

/// One fetched batch of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    body: Value,
}

impl Page {
    /// Wrap a response body
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Raw response body
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the page and return its body
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Scroll id carried by an Elasticsearch scroll response
    pub fn scroll_id(&self) -> Option<&str> {
        self.body.get("_scroll_id").and_then(Value::as_str)
    }

    /// Hits at the given path
    pub fn hits(&self, path: &HitsPath) -> Result<&[Hit]> {
        extract_hits(self, path)
    }
}

impl From<Value> for Page {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

/// Dotted path to the hit list within a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitsPath {
    segments: Vec<String>,
}

impl HitsPath {
    /// Parse a dotted path such as `hits.hits` or `$.data.items`
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.strip_prefix("$.").unwrap_or(path);
        if path.is_empty() {
            return Err(Error::invalid_value("hits_path", "path must not be empty"));
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::invalid_value(
                "hits_path",
                format!("empty segment in '{path}'"),
            ));
        }

        Ok(Self { segments })
    }

    /// Path segments in lookup order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl Default for HitsPath {
    fn default() -> Self {
        Self {
            segments: vec!["hits".to_string(), "hits".to_string()],
        }
    }
}

impl FromStr for HitsPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for HitsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

/// Extract the ordered hit list of a page.
///
/// An empty array, or an explicit `null`, at the path is zero hits. A missing
/// field or a non-array value is a [`Error::MalformedPage`].
pub fn extract_hits<'a>(page: &'a Page, path: &HitsPath) -> Result<&'a [Hit]> {
    let mut current = page.body();
    for segment in path.segments() {
        match current {
            Value::Object(map) => {
                current = map.get(segment).ok_or_else(|| {
                    Error::malformed_page(path.to_string(), format!("missing field '{segment}'"))
                })?;
            }
            other => {
                return Err(Error::malformed_page(
                    path.to_string(),
                    format!("expected object before '{segment}', found {}", kind(other)),
                ))
            }
        }
    }

    match current {
        Value::Array(hits) => Ok(hits.as_slice()),
        Value::Null => Ok(&[]),
        other => Err(Error::malformed_page(
            path.to_string(),
            format!("expected array, found {}", kind(other)),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
