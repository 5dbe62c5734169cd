//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion clients (Anthropic Messages API over HTTP, scripted mock)
//! - The agent wrapper and the command-line controller

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
