//! Room electricity balance

use async_trait::async_trait;

use super::SERVICE_UNAVAILABLE;
use crate::application::errors::{BalanceError, UpstreamError};
use crate::domain::entities::BalanceResult;
use crate::domain::traits::{CommandContext, CommandHandler};
use crate::infrastructure::upstream::BalanceService;

pub const TRIGGER: &str = "查电费";

pub struct BalanceCommand {
    service: BalanceService,
}

impl BalanceCommand {
    pub fn new(service: BalanceService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for BalanceCommand {
    async fn handle(&self, ctx: CommandContext<'_>) {
        let reply = match self.service.query(ctx.params).await {
            Ok(balance) => success_reply(&balance),
            Err(e) => failure_reply(e),
        };
        ctx.reply(&reply).await;
    }
}

pub fn success_reply(balance: &BalanceResult) -> String {
    format!("#{} 的电费为 {} 元", balance.room_number, balance.display_balance())
}

pub fn failure_reply(error: BalanceError) -> String {
    match error {
        BalanceError::RoomNotFound => "请输入正确的房间号".to_string(),
        BalanceError::FetchFailed {
            room_number: Some(room),
        } => format!("查询 #{} 的电费失败", room),
        BalanceError::FetchFailed { room_number: None } => {
            tracing::error!("Balance backend reported fetchFailed without a room number");
            SERVICE_UNAVAILABLE.to_string()
        }
        BalanceError::Unknown { .. } => {
            tracing::warn!("Unclassified balance failure: {}", error);
            "查询电费时出现未知错误".to_string()
        }
        BalanceError::Upstream(e @ (UpstreamError::Unreachable(_) | UpstreamError::Timeout(_))) => {
            tracing::error!("HTTP request to balance backend failed: {:?}", e);
            "无法连接到电费查询服务，请稍后再试".to_string()
        }
        BalanceError::Upstream(e @ UpstreamError::MalformedResponse(_)) => {
            tracing::error!("Failed to parse balance response: {:?}", e);
            "解析电费查询响应时出错".to_string()
        }
        BalanceError::Upstream(e) => {
            tracing::error!("Unexpected error querying balance: {:?}", e);
            SERVICE_UNAVAILABLE.to_string()
        }
    }
}
