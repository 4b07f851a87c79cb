//! Hot forum discussions

use async_trait::async_trait;

use super::SERVICE_UNAVAILABLE;
use crate::application::errors::UpstreamError;
use crate::domain::entities::ForumDiscussion;
use crate::domain::traits::{CommandContext, CommandHandler};
use crate::infrastructure::upstream::ForumService;

pub const TRIGGER: &str = "热帖";

pub struct ForumCommand {
    service: ForumService,
}

impl ForumCommand {
    pub fn new(service: ForumService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for ForumCommand {
    async fn handle(&self, ctx: CommandContext<'_>) {
        let reply = match self.service.hot_discussions().await {
            Ok(discussions) => format!("\n{}", ranked_titles(&discussions)),
            Err(UpstreamError::Status(code)) => format!("\n请求失败，状态码: {}", code),
            Err(e) => {
                tracing::error!("Forum request failed: {:?}", e);
                SERVICE_UNAVAILABLE.to_string()
            }
        };
        ctx.reply(&reply).await;
    }
}

pub fn ranked_titles(discussions: &[ForumDiscussion]) -> String {
    discussions
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {}", i + 1, d.title))
        .collect::<Vec<_>>()
        .join("\n")
}
