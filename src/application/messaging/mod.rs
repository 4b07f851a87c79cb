//! Message handling - Normalization and dispatch

pub mod dispatcher;

pub use dispatcher::{Dispatch, MessageDispatcher};
