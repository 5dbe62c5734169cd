use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{DomainError, ErrorKind};

/// How a [`Response`] came about.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Answered,
    Failed { kind: ErrorKind, message: String },
}

/// The extracted answer plus the full reply (or the error detail).
///
/// Failed calls still produce a printable `answer` prefixed with `"Error: "`;
/// [`Response::outcome`] tells the two cases apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    answer: String,
    #[serde(default)]
    raw_response: Option<Value>,
    #[serde(skip)]
    outcome: Outcome,
}

impl Response {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            raw_response: None,
            outcome: Outcome::Answered,
        }
    }

    pub fn answered(answer: impl Into<String>, raw_response: Value) -> Self {
        Self::new(answer).with_raw_response(raw_response)
    }

    pub fn from_error(error: &DomainError) -> Self {
        let message = error.to_string();
        Self {
            answer: format!("Error: {message}"),
            raw_response: Some(json!({ "error": message })),
            outcome: Outcome::Failed {
                kind: error.kind(),
                message,
            },
        }
    }

    pub fn with_raw_response(mut self, raw_response: Value) -> Self {
        self.raw_response = Some(raw_response);
        self
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn raw_response(&self) -> Option<&Value> {
        self.raw_response.as_ref()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self.outcome {
            Outcome::Failed { kind, .. } => Some(kind),
            Outcome::Answered => None,
        }
    }
}
