//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Commands: the registered chat commands and their replies
//! - Services: group event handling
//! - Errors: Domain-specific errors
//! - Messaging: Text normalization and dispatching

pub mod commands;
pub mod errors;
pub mod messaging;
pub mod services;
