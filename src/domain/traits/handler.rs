use async_trait::async_trait;

use super::ReplySink;
use crate::domain::entities::InboundMessage;

/// Everything a command handler gets to see for one invocation
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub message: &'a InboundMessage,
    /// Raw text following the trigger, trimmed
    pub params: &'a str,
    pub sink: &'a dyn ReplySink,
}

impl<'a> CommandContext<'a> {
    /// Reply with text; delivery failures are logged, never propagated.
    pub async fn reply(&self, text: &str) {
        if let Err(e) = self.sink.reply(self.message, text).await {
            tracing::error!(
                "Failed to reply in group {}: {}",
                self.message.conversation.group_openid,
                e
            );
        }
    }
}

/// Runs one chat command. Implementations must send a reply on every path.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: CommandContext<'_>);
}
