//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod handler;

pub use bot::{Bot, BotInfo, ReplySink};
pub use handler::{CommandContext, CommandHandler};
