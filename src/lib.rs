//! # hitscroll
//!
//! Flat, restartable hit iteration over paginated search results.
//!
//! Search backends hand out results a page at a time. [`HitSequence`] turns
//! any [`PageSequence`] into one lazy sequence of hits, with a position that
//! keeps counting across page boundaries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hitscroll::http::{HttpClient, HttpClientConfig};
//! use hitscroll::{HitSequence, ScrollPages, ScrollRequest};
//!
//! fn main() -> hitscroll::Result<()> {
//!     let client = HttpClient::with_config(
//!         HttpClientConfig::builder().base_url("http://localhost:9200").build(),
//!     )?;
//!     let pages = ScrollPages::new(client, ScrollRequest::new("logs-*").size(500));
//!     let mut hits = HitSequence::new(pages);
//!
//!     for item in &mut hits {
//!         let (position, hit) = item?;
//!         println!("{position}: {}", hit["_id"]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HitSequence   restart / advance / current / position     │
//! └──────────────────────────────┬───────────────────────────┘
//!                                │ PageSequence
//!              ┌─────────────────┴─────────────────┐
//!              │ VecPages          │ ScrollPages   │
//!              │ (in memory/file)  │ (HTTP scroll) │
//!              └───────────────────┴───────┬───────┘
//!                                          │
//!                            HttpClient (retry, backoff, auth)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page model and hit extraction
pub mod page;

/// Flat hit cursor
pub mod hits;

/// Page sequences
pub mod pagination;

/// HTTP client with retry and authentication
pub mod http;

/// Scroll job configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use hits::{HitSequence, Hits};
pub use page::{extract_hits, HitsPath, Page};
pub use pagination::{PageSequence, ScrollPages, ScrollRequest, VecPages};
pub use types::Hit;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
