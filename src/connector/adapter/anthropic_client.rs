use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::{CompletionReply, CompletionRequest, DomainError};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const BASE_URL_ENV: &str = "ANTHROPIC_BASE_URL";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// HTTP client for the Anthropic Messages API (and compatible endpoints).
///
/// Building the client performs no I/O. Each [`CompletionClient::create_message`]
/// call is exactly one `POST /v1/messages` with no retry; HTTP failures are
/// mapped onto [`DomainError`] variants:
///
/// | Status        | Error                          |
/// |---------------|--------------------------------|
/// | 401, 403      | `DomainError::Authentication`  |
/// | 429           | `DomainError::RateLimit`       |
/// | other non-2xx | `DomainError::Api`             |
///
/// `ANTHROPIC_BASE_URL` points the client at any Messages-compatible server
/// (default `https://api.anthropic.com`); see [`AnthropicClient::configured_base_url`].
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
}

impl AnthropicClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), MESSAGES_PATH);
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve the base URL from `ANTHROPIC_BASE_URL` via `lookup`; unset or
    /// empty falls back to [`DEFAULT_BASE_URL`].
    pub fn configured_base_url(lookup: impl Fn(&str) -> Option<String>) -> String {
        lookup(BASE_URL_ENV)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Pull `error.message` out of an API error body, falling back to the raw text.
    fn error_message(status: StatusCode, body: &str) -> String {
        let detail = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        if detail.is_empty() {
            format!("API returned {status}")
        } else {
            format!("API returned {status}: {detail}")
        }
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn create_message(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionReply, DomainError> {
        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "POST {}",
            self.url
        );

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::network(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("AnthropicClient: API returned {status}: {body}");
            let message = Self::error_message(status, &body);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    DomainError::authentication(message)
                }
                StatusCode::TOO_MANY_REQUESTS => DomainError::rate_limit(message),
                _ => DomainError::api(message),
            });
        }

        let raw: Value = response
            .json()
            .await
            .map_err(|e| DomainError::parse(format!("failed to decode reply body: {e}")))?;

        CompletionReply::from_value(raw)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}
