//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Environment configuration
//! - Http: The shared HTTP client
//! - Upstream: Adapters for the services commands call
//! - Adapters: Platform integrations (QQ, console)

pub mod adapters;
pub mod config;
pub mod http;
pub mod upstream;
