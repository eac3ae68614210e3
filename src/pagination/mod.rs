//! Pagination module
//!
//! Supports: in-memory pages, Elasticsearch scroll
//!
//! # Overview
//!
//! Every source of pages implements [`PageSequence`], the only contract the
//! hit cursor relies on. Fetching, retries and scroll bookkeeping stay here.

mod memory;
mod scroll;
mod types;

pub use memory::VecPages;
pub use scroll::{ScrollPages, ScrollRequest, DEFAULT_KEEP_ALIVE, DEFAULT_PAGE_SIZE};
pub use types::PageSequence;
