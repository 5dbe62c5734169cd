use serde::{Deserialize, Serialize};

use super::Message;
use crate::domain::DomainError;

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Messages plus generation parameters for a single completion call.
///
/// Every constructor that accepts caller-supplied parameters validates them:
/// `temperature` must lie in `[0, 1]`, `max_tokens` must be positive and
/// `model` must not be empty. Deserialization goes through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawQuery")]
pub struct Query {
    messages: Vec<Message>,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl Query {
    /// A query with default model, token limit and temperature.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_params(
        messages: Vec<Message>,
        model: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> Result<Self, DomainError> {
        let query = Self {
            messages,
            model: model.into(),
            max_tokens,
            temperature,
        };
        query.validate()?;
        Ok(query)
    }

    /// Replace each field present in `overrides` and re-validate the result.
    pub fn apply(mut self, overrides: &QueryOverrides) -> Result<Self, DomainError> {
        if let Some(messages) = &overrides.messages {
            self.messages = messages.clone();
        }
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(DomainError::validation(format!(
                "temperature must be between 0 and 1, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(DomainError::validation(
                "max_tokens must be a positive integer",
            ));
        }
        if self.model.trim().is_empty() {
            return Err(DomainError::validation("model must not be empty"));
        }
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn summary(&self) -> String {
        format!(
            "model={}, max_tokens={}, temperature={:.2}, messages={}",
            self.model,
            self.max_tokens,
            self.temperature,
            self.messages.len()
        )
    }
}

#[derive(Deserialize)]
struct RawQuery {
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default = "default_model")]
    model: String,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_temperature")]
    temperature: f64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl TryFrom<RawQuery> for Query {
    type Error = DomainError;

    fn try_from(raw: RawQuery) -> Result<Self, Self::Error> {
        Query::with_params(raw.messages, raw.model, raw.max_tokens, raw.temperature)
    }
}

/// Sparse per-call replacements for [`Query`] fields.
///
/// Built either with the `with_*` methods or from a JSON object, in which
/// case keys that do not name a query field are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryOverrides {
    pub messages: Option<Vec<Message>>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl QueryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("invalid query override: {e}")))
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_none()
            && self.model.is_none()
            && self.max_tokens.is_none()
            && self.temperature.is_none()
    }
}
