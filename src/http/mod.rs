//! HTTP client module
//!
//! Provides the HTTP client used for API and telemetry requests.
//!
//! # Features
//!
//! - **Single attempt**: a failed request is reported, never retried
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
