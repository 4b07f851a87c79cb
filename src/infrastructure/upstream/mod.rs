//! External service adapters
//!
//! Each adapter maps a domain request onto one upstream HTTP API and the
//! response onto a typed result or a classified error.

pub mod balance;
pub mod forum;
pub mod health;
pub mod weather;

pub use balance::BalanceService;
pub use forum::ForumService;
pub use health::HealthService;
pub use weather::WeatherService;

use serde::{Deserialize, Deserializer};

/// Accepts a JSON string, number, bool, or null/empty array as a string.
///
/// Upstreams are loose about scalar types (AMap sends `[]` for missing
/// fields, the balance backend sends room numbers as either type).
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(items) if items.is_empty() => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a scalar, found {}",
            other
        ))),
    }
}

pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = lenient_string(deserializer)?;
    Ok(if s.is_empty() { None } else { Some(s) })
}
