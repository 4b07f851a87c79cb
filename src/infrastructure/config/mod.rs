//! Configuration management
//!
//! All settings come from the process environment. Required values fail
//! startup; optional ones fall back to defaults silently.

use std::time::Duration;

use crate::application::errors::ConfigError;

pub const DEFAULT_BACKEND_URL: &str = "http://api.mysit.life";
pub const DEFAULT_WEATHER_API: &str = "https://restapi.amap.com/v3/weather/weatherInfo";
pub const DEFAULT_FORUM_URL: &str = "https://forum.mysit.life";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Whether the bot runs against the platform sandbox or production
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sandbox,
    Production,
}

impl Mode {
    pub fn is_sandbox(&self) -> bool {
        matches!(self, Mode::Sandbox)
    }
}

/// Platform application credentials
#[derive(Clone)]
pub struct BotCredentials {
    pub app_id: String,
    pub app_secret: String,
}

impl std::fmt::Debug for BotCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Bot configuration
#[derive(Clone)]
pub struct Config {
    /// Absent when running without the platform (console mode)
    pub credentials: Option<BotCredentials>,
    pub mode: Mode,
    pub backend_url: String,
    pub elec_url: String,
    pub elec_admin_token: String,
    pub weather_api: String,
    pub weather_token: String,
    pub forum_url: String,
    pub forum_token: String,
    pub http_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("credentials", &self.credentials)
            .field("mode", &self.mode)
            .field("backend_url", &self.backend_url)
            .field("elec_url", &self.elec_url)
            .field("elec_admin_token", &"<redacted>")
            .field("weather_api", &self.weather_api)
            .field("weather_token", &"<redacted>")
            .field("forum_url", &self.forum_url)
            .field("forum_token", &"<redacted>")
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Config {
    /// Load from environment variables
    pub fn from_env(require_credentials: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), require_credentials)
    }

    /// Load through an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F, require_credentials: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &str| get(key).ok_or_else(|| ConfigError::MissingField(key.to_string()));

        let credentials = if require_credentials {
            Some(BotCredentials {
                app_id: require("QQBOT_APP_ID")?,
                app_secret: require("QQBOT_APP_SECRET")?,
            })
        } else {
            None
        };

        let mode = match get("QQBOT_SANDBOX") {
            Some(raw) => {
                if parse_bool("QQBOT_SANDBOX", &raw)? {
                    Mode::Sandbox
                } else {
                    Mode::Production
                }
            }
            None => Mode::Production,
        };

        let backend_url = get("MIMIR_BACKEND_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let elec_url = get("MIMIR_ELEC_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("{}/elec", backend_url));

        let weather_api = get("WEATHER_API")
            .map(|u| u.trim_end_matches(['?', '&']).to_string())
            .unwrap_or_else(|| DEFAULT_WEATHER_API.to_string());

        let forum_url = get("FORUM_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_FORUM_URL.to_string());

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                // Zero would fail every request on the spot
                match raw.trim().parse::<u64>() {
                    Ok(secs) if secs > 0 => Duration::from_secs(secs),
                    _ => {
                        return Err(ConfigError::InvalidValue {
                            field: "HTTP_TIMEOUT_SECS".to_string(),
                            value: raw,
                        })
                    }
                }
            }
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            credentials,
            mode,
            backend_url,
            elec_url,
            elec_admin_token: require("MIMIR_ELEC_ADMIN_TOKEN")?,
            weather_api,
            weather_token: require("WEATHER_API_TOKEN")?,
            forum_url,
            forum_token: require("FORUM_TOKEN")?,
            http_timeout,
        })
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}
