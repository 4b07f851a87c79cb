//! Shared test helpers
#![allow(dead_code)]

use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;

use mimir_bot::application::errors::BotError;
use mimir_bot::domain::entities::{Conversation, InboundMessage, Media, MediaKind};
use mimir_bot::domain::traits::{Bot, BotInfo, ReplySink};
use mimir_bot::infrastructure::http::HttpClient;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn http() -> HttpClient {
    HttpClient::new(Duration::from_secs(5)).expect("client should build")
}

pub fn message(text: &str) -> InboundMessage {
    InboundMessage::new(Conversation::group("G1"), text).with_id("msg-1")
}

/// Everything a sink was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Upload { kind: MediaKind, url: String },
    Media { text: String, file_info: String },
    Group { group_openid: String, text: String },
}

/// Reply sink and bot that records instead of delivering
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<Sent>>,
    fail_uploads: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn reply(&self, _to: &InboundMessage, text: &str) -> Result<(), BotError> {
        self.record(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn upload_media(
        &self,
        _conversation: &Conversation,
        kind: MediaKind,
        url: &str,
    ) -> Result<Media, BotError> {
        self.record(Sent::Upload {
            kind,
            url: url.to_string(),
        });
        if self.fail_uploads {
            return Err(BotError::Network("upload refused".to_string()));
        }
        Ok(Media::new(format!("info:{}", url)))
    }

    async fn reply_media(&self, _to: &InboundMessage, text: &str, media: &Media) -> Result<(), BotError> {
        self.record(Sent::Media {
            text: text.to_string(),
            file_info: media.file_info.clone(),
        });
        Ok(())
    }
}

#[async_trait]
impl Bot for RecordingSink {
    async fn start(&self) -> Result<BotInfo, BotError> {
        Ok(BotInfo {
            id: "test".to_string(),
            name: "mimir".to_string(),
        })
    }

    async fn send_group_message(&self, group_openid: &str, text: &str) -> Result<(), BotError> {
        self.record(Sent::Group {
            group_openid: group_openid.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
