//! Message dispatcher - Routes inbound text to at most one command

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::application::commands::SERVICE_UNAVAILABLE;
use crate::domain::entities::{CommandRegistry, InboundMessage};
use crate::domain::traits::{CommandContext, ReplySink};
use crate::infrastructure::config::Mode;

/// Outcome of dispatching one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A command matched and ran, whatever its own outcome
    Handled,
    NotHandled,
}

/// Message dispatcher - walks the registry in order, first match wins
pub struct MessageDispatcher {
    registry: CommandRegistry,
    mode: Mode,
}

impl MessageDispatcher {
    pub fn new(registry: CommandRegistry, mode: Mode) -> Self {
        Self { registry, mode }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn normalize(text: &str) -> &str {
        text.trim()
    }

    /// Run the first matching command. Unmatched text is echoed in sandbox
    /// mode and ignored in production.
    pub async fn dispatch(&self, message: &InboundMessage, sink: &dyn ReplySink) -> Dispatch {
        let text = Self::normalize(&message.text);

        let Some(command) = self.registry.find(text) else {
            if self.mode.is_sandbox() {
                if let Err(e) = sink.reply(message, &format!("echo \"{}\"", text)).await {
                    tracing::error!("Failed to send echo: {}", e);
                }
            }
            return Dispatch::NotHandled;
        };

        tracing::debug!("Dispatching to {}", command.trigger);
        let ctx = CommandContext {
            message,
            params: command.params(text),
            sink,
        };

        if let Err(panic) = AssertUnwindSafe(command.handler.handle(ctx)).catch_unwind().await {
            tracing::error!("Command {} panicked: {}", command.trigger, panic_message(&*panic));
            ctx.reply(SERVICE_UNAVAILABLE).await;
        }

        Dispatch::Handled
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
