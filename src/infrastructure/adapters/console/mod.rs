//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Conversation, GroupEvent, InboundMessage, Media, MediaKind};
use crate::domain::traits::{Bot, BotInfo, ReplySink};

/// Conversation every console line is attributed to
pub const CONSOLE_GROUP: &str = "console";

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "mimir-bot".to_string(),
            },
        }
    }

    /// Every non-empty line typed on the console is a message to the bot
    pub fn decode_line(line: &str) -> Option<GroupEvent> {
        Some(GroupEvent::AtMessage(InboundMessage::new(
            Conversation::group(CONSOLE_GROUP),
            line,
        )))
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplySink for ConsoleAdapter {
    async fn reply(&self, _to: &InboundMessage, text: &str) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        Ok(())
    }

    async fn upload_media(
        &self,
        _conversation: &Conversation,
        kind: MediaKind,
        url: &str,
    ) -> Result<Media, BotError> {
        tracing::debug!("Console upload of {:?} {}", kind, url);
        Ok(Media::new(url))
    }

    async fn reply_media(&self, _to: &InboundMessage, text: &str, media: &Media) -> Result<(), BotError> {
        println!("[BOT] {}", text);
        println!("  [Media] {}", media.file_info);
        Ok(())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<BotInfo, BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(self.info.clone())
    }

    async fn send_group_message(&self, group_openid: &str, text: &str) -> Result<(), BotError> {
        println!("[BOT -> {}] {}", group_openid, text);
        Ok(())
    }
}
