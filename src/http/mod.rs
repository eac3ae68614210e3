//! HTTP client module
//!
//! Provides a blocking HTTP client with retry, backoff strategies and
//! authentication, used by the scroll paginator.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Basic, bearer and Elasticsearch API key

mod auth;
mod client;

pub use auth::AuthConfig;
pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
