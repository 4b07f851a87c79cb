//! Shared HTTP client
//!
//! One pooled client is built at startup and handed to every adapter.
//! Cloning is cheap and shares the same connection pool.

use std::time::Duration;

use reqwest::Client;

use crate::application::errors::BotError;

const USER_AGENT: &str = concat!("mimir-bot/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Build the pooled client; `timeout` is the default per-request bound.
    pub fn new(timeout: Duration) -> Result<Self, BotError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| BotError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Drop this handle. The pool is released only once every clone is gone,
    /// so call this after the adapters holding clones have been dropped.
    pub fn close(self) {
        tracing::debug!("Closing HTTP client");
        drop(self.client);
    }
}
