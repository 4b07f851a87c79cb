//! App download QR code

use async_trait::async_trait;

use super::SERVICE_UNAVAILABLE;
use crate::domain::entities::MediaKind;
use crate::domain::traits::{CommandContext, CommandHandler};

pub const TRIGGER: &str = "下载地址";
pub const QRCODE_URL: &str = "https://g.mysit.life/static/img/qrcode.png";
pub const INSTRUCTIONS: &str = "扫描二维码进入下载页。iOS用户可在App Store搜索小应生活。";

pub struct DownloadCommand {
    qrcode_url: String,
}

impl DownloadCommand {
    pub fn new(qrcode_url: impl Into<String>) -> Self {
        Self {
            qrcode_url: qrcode_url.into(),
        }
    }
}

impl Default for DownloadCommand {
    fn default() -> Self {
        Self::new(QRCODE_URL)
    }
}

#[async_trait]
impl CommandHandler for DownloadCommand {
    async fn handle(&self, ctx: CommandContext<'_>) {
        let media = match ctx
            .sink
            .upload_media(&ctx.message.conversation, MediaKind::Image, &self.qrcode_url)
            .await
        {
            Ok(media) => media,
            Err(e) => {
                tracing::error!("Failed to upload download QR code: {}", e);
                ctx.reply(SERVICE_UNAVAILABLE).await;
                return;
            }
        };

        if let Err(e) = ctx.sink.reply_media(ctx.message, INSTRUCTIONS, &media).await {
            tracing::error!("Failed to send download QR code: {}", e);
        }
    }
}
