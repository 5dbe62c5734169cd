pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{AskQuestionUseCase, CompletionClient};

pub use connector::{
    AgentConfig, AnthropicClient, AskController, ClaudeAgent, MockCompletionClient,
};

pub use domain::{
    CompletionReply, CompletionRequest, ContentBlock, DomainError, ErrorKind, Message, Outcome,
    Query, QueryOverrides, Response, Role,
};

pub use cli::Cli;
