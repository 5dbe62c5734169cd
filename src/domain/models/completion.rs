use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Message, Query};
use crate::domain::DomainError;

/// Messages API request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub messages: Vec<Message>,
}

impl From<&Query> for CompletionRequest {
    fn from(query: &Query) -> Self {
        Self {
            model: query.model().to_string(),
            max_tokens: query.max_tokens(),
            temperature: query.temperature(),
            messages: query.messages().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Deserialize)]
struct ReplyBody {
    content: Vec<ContentBlock>,
}

/// A decoded Messages API reply. The original JSON is kept verbatim so it
/// can be handed back to callers untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReply {
    content: Vec<ContentBlock>,
    raw: Value,
}

impl CompletionReply {
    /// Decode a reply; fails when `content` is missing or not a list of blocks.
    pub fn from_value(raw: Value) -> Result<Self, DomainError> {
        let body = ReplyBody::deserialize(&raw)
            .map_err(|e| DomainError::parse(format!("malformed completion reply: {e}")))?;
        Ok(Self {
            content: body.content,
            raw,
        })
    }

    pub fn content(&self) -> &[ContentBlock] {
        &self.content
    }

    /// Text of the first block that carries any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| block.text.as_deref())
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}
