//! Campus service status

use async_trait::async_trait;

use crate::domain::entities::ServiceStatus;
use crate::domain::traits::{CommandContext, CommandHandler};
use crate::infrastructure::upstream::HealthService;

pub const TRIGGER: &str = "服务状态";

pub struct StatusCommand {
    service: HealthService,
}

impl StatusCommand {
    pub fn new(service: HealthService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CommandHandler for StatusCommand {
    async fn handle(&self, ctx: CommandContext<'_>) {
        let statuses = self.service.check_all().await;
        ctx.reply(&status_reply(&statuses)).await;
    }
}

pub fn status_reply(statuses: &[ServiceStatus]) -> String {
    let lines: Vec<String> = statuses
        .iter()
        .map(|s| format!("{}: {}", s.service_name, s.state.label()))
        .collect();
    format!("\n{}", lines.join("\n"))
}
