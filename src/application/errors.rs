//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of a call to an external HTTP service.
///
/// Every adapter resolves to either a typed value or one of these; none of
/// them ever reaches the dispatcher.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream unreachable: {0}")]
    Unreachable(String),

    #[error("upstream timed out: {0}")]
    Timeout(String),

    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("upstream reported {0}")]
    Business(String),

    #[error("upstream answered with HTTP {0}")]
    Status(u16),

    #[error("unknown upstream error: {0}")]
    Unknown(String),
}

impl UpstreamError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout(e.to_string())
        } else if e.is_decode() {
            UpstreamError::MalformedResponse(e.to_string())
        } else if e.is_connect() || e.is_request() {
            UpstreamError::Unreachable(e.to_string())
        } else {
            UpstreamError::Unknown(e.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self {
        UpstreamError::MalformedResponse(e.to_string())
    }
}

/// Classified outcome of a balance query that did not succeed
#[derive(Error, Debug)]
pub enum BalanceError {
    #[error("room not found")]
    RoomNotFound,

    #[error("fetch failed for room {room_number:?}")]
    FetchFailed { room_number: Option<String> },

    #[error("unknown balance error {message:?} for room {room_number:?}")]
    Unknown {
        message: Option<String>,
        room_number: Option<String>,
    },

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}
