//! Remote API module
//!
//! Resource URLs per shard and a client returning raw JSON documents.

mod client;
mod endpoints;

pub use client::ApiClient;
pub use endpoints::Endpoint;

#[cfg(test)]
mod tests;
