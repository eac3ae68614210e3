//! CLI module
//!
//! Command-line interface for flattening search results.
//!
//! # Commands
//!
//! - `scroll` - Scroll an Elasticsearch index, one hit per line
//! - `flatten` - Flatten a JSON dump of search responses
//! - `validate` - Check a scroll configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputArgs};
pub use runner::{emit_hits, Runner};
