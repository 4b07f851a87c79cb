//! Health checks for campus services

use std::time::Duration;

use futures::future::join_all;
use reqwest::StatusCode;

use crate::application::errors::UpstreamError;
use crate::domain::entities::{HealthTarget, ServiceState, ServiceStatus};
use crate::infrastructure::http::HttpClient;

/// Per-check bound; an expired check counts as down without affecting the others
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Clone)]
pub struct HealthService {
    http: HttpClient,
    targets: Vec<HealthTarget>,
    timeout: Duration,
}

impl HealthService {
    pub fn new(http: HttpClient, targets: Vec<HealthTarget>) -> Self {
        Self {
            http,
            targets,
            timeout: CHECK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn targets(&self) -> &[HealthTarget] {
        &self.targets
    }

    /// Check every target concurrently. Results keep the configured order.
    pub async fn check_all(&self) -> Vec<ServiceStatus> {
        join_all(self.targets.iter().map(|target| self.check(target))).await
    }

    async fn check(&self, target: &HealthTarget) -> ServiceStatus {
        let state = match self.probe(target).await {
            Ok(()) => ServiceState::Up,
            Err(e) => {
                if e.is_timeout() {
                    tracing::debug!("Health check {} timed out: {}", target.name, e);
                } else {
                    tracing::debug!("Health check {} failed: {}", target.name, e);
                }
                ServiceState::Timeout
            }
        };

        ServiceStatus {
            service_name: target.name.clone(),
            state,
        }
    }

    async fn probe(&self, target: &HealthTarget) -> Result<(), UpstreamError> {
        let response = self
            .http
            .inner()
            .get(&target.url)
            .timeout(self.timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            other => Err(UpstreamError::Status(other.as_u16())),
        }
    }
}
