//! Domain layer - Core business objects with no I/O of their own
//!
//! This layer contains:
//! - Entities: Messages, commands, and the typed results of upstream services
//! - Traits: Abstractions for the platform and for command handlers

pub mod entities;
pub mod traits;
