//! mimir-bot: a group chat bot that answers a handful of text commands by
//! calling campus web services.

pub mod application;
pub mod domain;
pub mod infrastructure;
