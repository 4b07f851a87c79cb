//! QQ group bot adapter
//!
//! Outbound half only: access-token exchange, group messages and group file
//! uploads over the bot OpenAPI. Inbound events arrive already decoded from
//! the gateway, see [`payload`].

pub mod payload;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::{Conversation, InboundMessage, Media, MediaKind};
use crate::domain::traits::{Bot, BotInfo, ReplySink};
use crate::infrastructure::config::{BotCredentials, Mode};
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::upstream::lenient_string;

pub use payload::decode_line;

/// Access token endpoint
const TOKEN_URL: &str = "https://bots.qq.com/app/getAppAccessToken";

/// OpenAPI base URLs
const API_BASE: &str = "https://api.sgroup.qq.com";
const SANDBOX_API_BASE: &str = "https://sandbox.api.sgroup.qq.com";

/// Refresh tokens this long before they expire
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

const MSG_TYPE_TEXT: u8 = 0;
const MSG_TYPE_MEDIA: u8 = 7;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    app_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(deserialize_with = "lenient_string")]
    expires_in: String,
}

struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Serialize)]
struct MediaRef<'a> {
    file_info: &'a str,
}

#[derive(Serialize)]
struct GroupMessageRequest<'a> {
    content: &'a str,
    msg_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    media: Option<MediaRef<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg_seq: Option<u32>,
}

#[derive(Serialize)]
struct GroupFileRequest<'a> {
    file_type: u8,
    url: &'a str,
    srv_send_msg: bool,
}

#[derive(Deserialize)]
struct GroupFileResponse {
    file_info: String,
    #[serde(default)]
    file_uuid: Option<String>,
    #[serde(default)]
    ttl: Option<u64>,
}

#[derive(Deserialize)]
struct Me {
    id: String,
    username: String,
}

/// QQ bot adapter
pub struct QqAdapter {
    http: HttpClient,
    credentials: BotCredentials,
    api_base: String,
    token_url: String,
    token: Mutex<Option<AccessToken>>,
}

impl QqAdapter {
    pub fn new(http: HttpClient, credentials: BotCredentials, mode: Mode) -> Self {
        let api_base = if mode.is_sandbox() { SANDBOX_API_BASE } else { API_BASE };
        Self {
            http,
            credentials,
            api_base: api_base.to_string(),
            token_url: TOKEN_URL.to_string(),
            token: Mutex::new(None),
        }
    }

    /// Point the adapter at different endpoints (local gateways, tests)
    pub fn with_endpoints(mut self, api_base: impl Into<String>, token_url: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self.token_url = token_url.into();
        self
    }

    /// Get the API URL for a path
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Current access token, fetching a new one when missing or near expiry
    async fn access_token(&self) -> Result<String, BotError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() + TOKEN_REFRESH_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http
            .inner()
            .post(&self.token_url)
            .json(&TokenRequest {
                app_id: &self.credentials.app_id,
                client_secret: &self.credentials.app_secret,
            })
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Auth(format!("Token request failed: {}", response.status())));
        }

        let data: TokenResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        let lifetime = data
            .expires_in
            .trim()
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| BotError::Parse(format!("Invalid expires_in: {:?}", data.expires_in)))?;

        tracing::debug!("Fetched access token valid for {:?}", lifetime);
        let value = data.access_token.clone();
        *cached = Some(AccessToken {
            value: data.access_token,
            expires_at: Instant::now() + lifetime,
        });
        Ok(value)
    }

    async fn call<R: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<R, BotError> {
        let token = self.access_token().await?;
        let response = request
            .header(AUTHORIZATION, format!("QQBot {}", token))
            .header("X-Union-Appid", &self.credentials.app_id)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            *self.token.lock().await = None;
            return Err(BotError::Auth("Access token rejected".to_string()));
        }
        if !status.is_success() {
            let error = response.text().await.unwrap_or_default();
            return Err(BotError::Network(format!("QQ API error {}: {}", status, error)));
        }

        response.json().await.map_err(|e| BotError::Parse(e.to_string()))
    }

    async fn post_group_message(&self, group_openid: &str, request: &GroupMessageRequest<'_>) -> Result<(), BotError> {
        let url = self.api_url(&format!("/v2/groups/{}/messages", group_openid));
        let _: IgnoredAny = self.call(self.http.inner().post(url).json(request)).await?;
        Ok(())
    }
}

#[async_trait]
impl ReplySink for QqAdapter {
    async fn reply(&self, to: &InboundMessage, text: &str) -> Result<(), BotError> {
        tracing::debug!("Replying in {}: {}", to.conversation.group_openid, text);
        let request = GroupMessageRequest {
            content: text,
            msg_type: MSG_TYPE_TEXT,
            media: None,
            msg_id: Some(&to.id),
            msg_seq: Some(1),
        };
        self.post_group_message(&to.conversation.group_openid, &request).await
    }

    async fn upload_media(
        &self,
        conversation: &Conversation,
        kind: MediaKind,
        url: &str,
    ) -> Result<Media, BotError> {
        let endpoint = self.api_url(&format!("/v2/groups/{}/files", conversation.group_openid));
        let request = GroupFileRequest {
            file_type: kind.file_type(),
            url,
            srv_send_msg: false,
        };
        let data: GroupFileResponse = self.call(self.http.inner().post(endpoint).json(&request)).await?;

        Ok(Media {
            file_info: data.file_info,
            file_uuid: data.file_uuid,
            ttl: data.ttl,
        })
    }

    async fn reply_media(&self, to: &InboundMessage, text: &str, media: &Media) -> Result<(), BotError> {
        let request = GroupMessageRequest {
            content: text,
            msg_type: MSG_TYPE_MEDIA,
            media: Some(MediaRef {
                file_info: &media.file_info,
            }),
            msg_id: Some(&to.id),
            msg_seq: Some(1),
        };
        self.post_group_message(&to.conversation.group_openid, &request).await
    }
}

#[async_trait]
impl Bot for QqAdapter {
    async fn start(&self) -> Result<BotInfo, BotError> {
        tracing::info!("Starting QQ bot (app id: {})", self.credentials.app_id);
        let me: Me = self.call(self.http.inner().get(self.api_url("/users/@me"))).await?;
        Ok(BotInfo {
            id: me.id,
            name: me.username,
        })
    }

    async fn send_group_message(&self, group_openid: &str, text: &str) -> Result<(), BotError> {
        let request = GroupMessageRequest {
            content: text,
            msg_type: MSG_TYPE_TEXT,
            media: None,
            msg_id: None,
            msg_seq: None,
        };
        self.post_group_message(group_openid, &request).await
    }
}
