//! In-memory page sequence
//!
//! Serves pages that are already materialized, e.g. a JSON dump of search
//! responses. Keeps call counters so callers can observe fetch behaviour.

use super::types::PageSequence;
use crate::error::{Error, Result};
use crate::page::Page;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::trace;

/// Page sequence over a fixed list of pages
#[derive(Debug, Clone, Default)]
pub struct VecPages {
    pages: Vec<Page>,
    /// Index of the current page, `None` before the first restart
    cursor: Option<usize>,
    restarts: usize,
    page_advances: usize,
}

impl VecPages {
    /// Create a sequence from pages
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    /// Create a sequence from raw response bodies
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        Self::new(values.into_iter().map(Page::new).collect())
    }

    /// Parse a JSON array of pages
    pub fn from_json_str(json: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(values) => Ok(Self::from_values(values)),
            _ => Err(Error::config("page dump must be a JSON array of pages")),
        }
    }

    /// Load a JSON array of pages from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_json_str(&content)
    }

    /// Number of pages held
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if there are no pages at all
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// How many times `restart` was called
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// How many times `advance_to_next_page` was called
    pub fn page_advances(&self) -> usize {
        self.page_advances
    }
}

impl PageSequence for VecPages {
    fn restart(&mut self) -> Result<()> {
        self.restarts += 1;
        self.cursor = Some(0);
        trace!(pages = self.pages.len(), "Restarted in-memory pages");
        Ok(())
    }

    fn advance_to_next_page(&mut self) -> Result<()> {
        self.page_advances += 1;
        if let Some(index) = self.cursor {
            if index < self.pages.len() {
                self.cursor = Some(index + 1);
            }
        }
        Ok(())
    }

    fn has_current_page(&self) -> bool {
        self.current_page().is_some()
    }

    fn current_page(&self) -> Option<&Page> {
        self.cursor.and_then(|index| self.pages.get(index))
    }
}
