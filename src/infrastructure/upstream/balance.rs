//! Electricity balance backend

use reqwest::header::COOKIE;
use serde::Deserialize;

use super::{lenient_opt_string, lenient_string};
use crate::application::errors::{BalanceError, UpstreamError};
use crate::domain::entities::BalanceResult;
use crate::infrastructure::http::HttpClient;

/// Name of the admin cookie the backend authenticates with
const ADMIN_COOKIE: &str = "MIMIR_ELEC_ADMIN_TOKEN";

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BalanceBody {
    #[serde(deserialize_with = "lenient_string")]
    room_number: String,
    balance: f64,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    room_number: Option<String>,
}

/// Client for the balance query endpoint
#[derive(Clone)]
pub struct BalanceService {
    http: HttpClient,
    base_url: String,
    admin_token: String,
}

impl BalanceService {
    pub fn new(http: HttpClient, base_url: impl Into<String>, admin_token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            admin_token: admin_token.into(),
        }
    }

    /// Look up the balance for a free-text room identifier.
    pub async fn query(&self, raw: &str) -> Result<BalanceResult, BalanceError> {
        let response = self
            .http
            .inner()
            .get(format!("{}/query", self.base_url))
            .query(&[("raw", raw)])
            .header(COOKIE, format!("{}={}", ADMIN_COOKIE, self.admin_token))
            .send()
            .await
            .map_err(UpstreamError::from)?;

        let status = response.status();
        let body = response.bytes().await.map_err(UpstreamError::from)?;

        if status.is_success() {
            let balance: BalanceBody = serde_json::from_slice(&body).map_err(UpstreamError::from)?;
            return Ok(BalanceResult {
                room_number: balance.room_number,
                balance: balance.balance,
            });
        }

        let error: ErrorBody = serde_json::from_slice(&body).map_err(UpstreamError::from)?;
        tracing::debug!("Balance backend answered {} with {:?}", status, error);

        Err(match error.message.as_deref() {
            Some("roomNotFound") => BalanceError::RoomNotFound,
            Some("fetchFailed") => BalanceError::FetchFailed {
                room_number: error.room_number,
            },
            _ => BalanceError::Unknown {
                message: error.message,
                room_number: error.room_number,
            },
        })
    }
}
