use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Conversation, InboundMessage, Media, MediaKind};

/// Sends replies back to the conversation a message came from
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Reply with plain text
    async fn reply(&self, to: &InboundMessage, text: &str) -> Result<(), BotError>;

    /// Upload a remote file so it can be attached to a reply
    async fn upload_media(
        &self,
        conversation: &Conversation,
        kind: MediaKind,
        url: &str,
    ) -> Result<Media, BotError>;

    /// Reply with text and a previously uploaded media attachment
    async fn reply_media(
        &self,
        to: &InboundMessage,
        text: &str,
        media: &Media,
    ) -> Result<(), BotError>;
}

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: ReplySink {
    /// Authenticate against the platform and report who we are
    async fn start(&self) -> Result<BotInfo, BotError>;

    /// Send an unsolicited message to a group
    async fn send_group_message(&self, group_openid: &str, text: &str) -> Result<(), BotError>;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
}
