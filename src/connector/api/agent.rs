use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::application::{AskQuestionUseCase, CompletionClient};
use crate::connector::adapter::AnthropicClient;
use crate::domain::{DomainError, QueryOverrides, Response};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Credential and endpoint for a [`ClaudeAgent`], resolved once at startup.
///
/// The key comes from the caller or `ANTHROPIC_API_KEY`; the endpoint is
/// whatever [`AnthropicClient::configured_base_url`] resolves.
#[derive(Clone)]
pub struct AgentConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl AgentConfig {
    /// An explicit non-empty key wins over the environment.
    pub fn from_env(api_key: Option<&str>) -> Self {
        Self::from_lookup(api_key, |name| std::env::var(name).ok())
    }

    pub fn from_lookup(api_key: Option<&str>, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| lookup(API_KEY_ENV).filter(|key| !key.is_empty()));
        let base_url = AnthropicClient::configured_base_url(&lookup);
        Self { api_key, base_url }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn credential(&self) -> Result<&str, DomainError> {
        self.api_key.as_deref().ok_or_else(|| {
            DomainError::configuration(format!(
                "{API_KEY_ENV} must be provided either as an argument or as an environment variable"
            ))
        })
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Holds a credential and a completion client; asks one question per call.
///
/// Construction never touches the network.
pub struct ClaudeAgent {
    api_key: String,
    client: Arc<dyn CompletionClient>,
    use_case: AskQuestionUseCase,
}

impl ClaudeAgent {
    /// Build an agent backed by [`AnthropicClient`], taking the key from
    /// `api_key` or `ANTHROPIC_API_KEY`.
    pub fn new(api_key: Option<&str>) -> Result<Self, DomainError> {
        Self::from_config(AgentConfig::from_env(api_key))
    }

    pub fn from_config(config: AgentConfig) -> Result<Self, DomainError> {
        let api_key = config.credential()?;
        let client = Arc::new(AnthropicClient::new(api_key, &config.base_url));
        debug!("Using Anthropic endpoint {}", client.url());
        Self::with_client(config, client)
    }

    /// Build an agent around any [`CompletionClient`]; the credential is still required.
    pub fn with_client(
        config: AgentConfig,
        client: Arc<dyn CompletionClient>,
    ) -> Result<Self, DomainError> {
        let api_key = config.credential()?.to_string();
        Ok(Self {
            api_key,
            use_case: AskQuestionUseCase::new(Arc::clone(&client)),
            client,
        })
    }

    /// Ask a single question.
    ///
    /// Failures of the remote call never surface as `Err`: they become a
    /// [`Response`] whose answer starts with `"Error: "` and whose
    /// `raw_response` holds `{"error": ...}`. `Err` is returned only when
    /// `overrides` produce an invalid query, before anything is sent.
    pub async fn ask(
        &self,
        question: &str,
        overrides: Option<&QueryOverrides>,
    ) -> Result<Response, DomainError> {
        self.use_case.execute(question, overrides).await
    }

    /// Like [`ask`](Self::ask) but call failures are returned as `Err`.
    pub async fn try_ask(
        &self,
        question: &str,
        overrides: Option<&QueryOverrides>,
    ) -> Result<Response, DomainError> {
        self.use_case.try_execute(question, overrides).await
    }

    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }
}

impl fmt::Debug for ClaudeAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("ClaudeAgent")
            .field("api_key", &key)
            .field("provider", &self.client.provider_name())
            .finish()
    }
}
