mod anthropic_client;
mod mock_completion_client;

pub use anthropic_client::*;
pub use mock_completion_client::*;
