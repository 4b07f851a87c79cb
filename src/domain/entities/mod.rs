//! Domain entities - Core business objects with no external dependencies

pub mod balance;
pub mod command;
pub mod forum;
pub mod message;
pub mod status;
pub mod weather;

pub use balance::BalanceResult;
pub use command::{Command, CommandRegistry};
pub use forum::ForumDiscussion;
pub use message::{Conversation, GroupEvent, InboundMessage, Media, MediaKind};
pub use status::{HealthTarget, ServiceState, ServiceStatus};
pub use weather::{City, ForecastEntry, WeatherSnapshot};
