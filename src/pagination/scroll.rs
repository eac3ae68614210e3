//! Elasticsearch scroll pagination
//!
//! Opens a scroll context with `POST /{index}/_search?scroll=…`, continues it
//! with `POST /_search/scroll` and releases it with `DELETE /_search/scroll`.
//!
//! The first response is always held as the current page, even when it has
//! no hits. Any later response without hits ends the sequence.

use super::types::PageSequence;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::page::{HitsPath, Page};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Default scroll context keep-alive
pub const DEFAULT_KEEP_ALIVE: &str = "1m";

/// Default batch size per scroll request
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// What to search and how to page through it
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    /// Index name or pattern
    pub index: String,
    /// Query clause (the value of the `query` key)
    pub query: Value,
    /// Hits per page
    pub size: u32,
    /// Scroll context keep-alive, e.g. `1m`
    pub keep_alive: String,
    /// Optional sort clause; `_doc` order when unset
    pub sort: Option<Value>,
    /// Where the hits live in each response
    pub hits_path: HitsPath,
}

impl ScrollRequest {
    /// Match-all scroll over an index
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            query: json!({"match_all": {}}),
            size: DEFAULT_PAGE_SIZE,
            keep_alive: DEFAULT_KEEP_ALIVE.to_string(),
            sort: None,
            hits_path: HitsPath::default(),
        }
    }

    /// Set the query clause
    #[must_use]
    pub fn query(mut self, query: Value) -> Self {
        self.query = query;
        self
    }

    /// Set the page size
    #[must_use]
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the scroll keep-alive
    #[must_use]
    pub fn keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = keep_alive.into();
        self
    }

    /// Set the sort clause
    #[must_use]
    pub fn sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the hits path
    #[must_use]
    pub fn hits_path(mut self, path: HitsPath) -> Self {
        self.hits_path = path;
        self
    }

    /// Body of the opening search request
    pub fn search_body(&self) -> Value {
        json!({
            "size": self.size,
            "query": self.query,
            "sort": self.sort.clone().unwrap_or_else(|| json!(["_doc"])),
        })
    }

    fn search_path(&self) -> String {
        format!("/{}/_search", self.index.trim_matches('/'))
    }
}

/// Page sequence backed by the Elasticsearch scroll API
#[derive(Debug)]
pub struct ScrollPages {
    client: HttpClient,
    request: ScrollRequest,
    current: Option<Page>,
    scroll_id: Option<String>,
    pages_fetched: usize,
}

impl ScrollPages {
    /// Create a scroll sequence. Nothing is fetched until `restart`.
    pub fn new(client: HttpClient, request: ScrollRequest) -> Self {
        Self {
            client,
            request,
            current: None,
            scroll_id: None,
            pages_fetched: 0,
        }
    }

    /// The search being scrolled
    pub fn request(&self) -> &ScrollRequest {
        &self.request
    }

    /// Open scroll context id, if any
    pub fn scroll_id(&self) -> Option<&str> {
        self.scroll_id.as_deref()
    }

    /// Total responses fetched across all traversals
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Release the open scroll context.
    ///
    /// Failures are logged and swallowed; the context expires on its own
    /// after the keep-alive.
    pub fn clear_scroll(&mut self) {
        let Some(id) = self.scroll_id.take() else {
            return;
        };

        let config = RequestConfig::new()
            .json(json!({ "scroll_id": [id] }))
            .retries(0);
        match self.client.delete("/_search/scroll", config) {
            Ok(_) => debug!("Cleared scroll context"),
            Err(e) => warn!("Failed to clear scroll context: {e}"),
        }
    }

    fn finish(&mut self) {
        debug!(pages = self.pages_fetched, "Scroll exhausted");
        self.current = None;
        self.clear_scroll();
    }
}

impl PageSequence for ScrollPages {
    fn restart(&mut self) -> Result<()> {
        self.clear_scroll();
        self.current = None;

        debug!(
            index = %self.request.index,
            size = self.request.size,
            keep_alive = %self.request.keep_alive,
            "Opening scroll"
        );
        let config = RequestConfig::new()
            .query("scroll", self.request.keep_alive.clone())
            .json(self.request.search_body());
        let body: Value = self.client.post_json(&self.request.search_path(), config)?;

        let page = Page::new(body);
        self.scroll_id = page.scroll_id().map(str::to_string);
        self.pages_fetched += 1;
        self.current = Some(page);
        Ok(())
    }

    fn advance_to_next_page(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Ok(());
        }

        let Some(scroll_id) = self.scroll_id.clone() else {
            self.finish();
            return Ok(());
        };

        let config = RequestConfig::new().json(json!({
            "scroll": self.request.keep_alive,
            "scroll_id": scroll_id,
        }));
        let body: Value = self.client.post_json("/_search/scroll", config)?;
        let page = Page::new(body);
        self.pages_fetched += 1;

        if let Some(id) = page.scroll_id() {
            self.scroll_id = Some(id.to_string());
        }

        if page.hits(&self.request.hits_path)?.is_empty() {
            self.finish();
        } else {
            debug!(page = self.pages_fetched, "Fetched scroll page");
            self.current = Some(page);
        }
        Ok(())
    }

    fn has_current_page(&self) -> bool {
        self.current.is_some()
    }

    fn current_page(&self) -> Option<&Page> {
        self.current.as_ref()
    }

    fn hits_path(&self) -> Option<&HitsPath> {
        Some(&self.request.hits_path)
    }

    fn set_hits_path(&mut self, path: &HitsPath) {
        self.request.hits_path = path.clone();
    }
}

impl Drop for ScrollPages {
    fn drop(&mut self) {
        self.clear_scroll();
    }
}
