//! Group event handling

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::application::messaging::{Dispatch, MessageDispatcher};
use crate::domain::entities::GroupEvent;
use crate::domain::traits::{Bot, BotInfo};

/// Sent when the bot joins a group
pub const JOIN_GREETING: &str = "我进群了，哥";

/// Service for processing platform events
pub struct EventService<B: Bot> {
    bot: B,
    dispatcher: MessageDispatcher,
    info: BotInfo,
}

impl<B: Bot + 'static> EventService<B> {
    pub fn new(bot: B, dispatcher: MessageDispatcher, info: BotInfo) -> Self {
        Self {
            bot,
            dispatcher,
            info,
        }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Handle a single event to completion
    pub async fn handle(&self, event: GroupEvent) -> Option<Dispatch> {
        match event {
            GroupEvent::AtMessage(message) => {
                tracing::info!("Received: {}", MessageDispatcher::normalize(&message.text));
                Some(self.dispatcher.dispatch(&message, &self.bot).await)
            }
            GroupEvent::RobotAdded { group_openid } => {
                tracing::info!("robot[{}] joined group {}", self.info.name, group_openid);
                if let Err(e) = self.bot.send_group_message(&group_openid, JOIN_GREETING).await {
                    tracing::error!("Failed to greet group {}: {}", group_openid, e);
                }
                None
            }
            GroupEvent::RobotRemoved { group_openid } => {
                tracing::info!("robot[{}] left group {}", self.info.name, group_openid);
                None
            }
        }
    }

    /// Handle events as they arrive, each in its own task, until the channel
    /// closes or `shutdown` resolves. Returns once every in-flight event has
    /// finished; events still queued after shutdown are not started.
    pub async fn run<S>(self: Arc<Self>, mut events: mpsc::Receiver<GroupEvent>, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down, waiting for {} in-flight event(s)", tasks.len());
                    break;
                }
                event = events.recv() => match event {
                    Some(event) => {
                        let service = Arc::clone(&self);
                        tasks.spawn(async move {
                            service.handle(event).await;
                        });
                    }
                    None => break,
                },
                Some(finished) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = finished {
                        tracing::error!("Event task failed: {}", e);
                    }
                }
            }
        }

        while let Some(finished) = tasks.join_next().await {
            if let Err(e) = finished {
                tracing::error!("Event task failed: {}", e);
            }
        }
        tracing::info!("Event stream closed");
    }
}
