pub mod agent;
pub mod controller;

pub use agent::{AgentConfig, ClaudeAgent};
pub use controller::AskController;
