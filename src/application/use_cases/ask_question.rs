use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::application::CompletionClient;
use crate::domain::{CompletionRequest, DomainError, Message, Query, QueryOverrides, Response};

pub struct AskQuestionUseCase {
    client: Arc<dyn CompletionClient>,
}

impl AskQuestionUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Single user message, default parameters, then any overrides.
    pub fn build_query(
        question: &str,
        overrides: Option<&QueryOverrides>,
    ) -> Result<Query, DomainError> {
        let query = Query::new(vec![Message::user(question)]);
        match overrides {
            Some(overrides) => query.apply(overrides),
            None => Ok(query),
        }
    }

    /// Ask once. Call failures come back as an error [`Response`]; only an
    /// invalid query is returned as `Err`, and in that case nothing is sent.
    pub async fn execute(
        &self,
        question: &str,
        overrides: Option<&QueryOverrides>,
    ) -> Result<Response, DomainError> {
        let query = Self::build_query(question, overrides)?;

        match self.send(&query).await {
            Ok(response) => Ok(response),
            Err(e) => {
                warn!("{} call failed: {}", self.client.provider_name(), e);
                Ok(Response::from_error(&e))
            }
        }
    }

    /// Like [`execute`](Self::execute) but call failures are returned as `Err`.
    pub async fn try_execute(
        &self,
        question: &str,
        overrides: Option<&QueryOverrides>,
    ) -> Result<Response, DomainError> {
        let query = Self::build_query(question, overrides)?;
        self.send(&query).await
    }

    async fn send(&self, query: &Query) -> Result<Response, DomainError> {
        debug!("Sending query ({})", query.summary());
        let start_time = Instant::now();

        let request = CompletionRequest::from(query);
        let reply = self.client.create_message(&request).await?;

        let answer = reply
            .first_text()
            .ok_or_else(|| DomainError::parse("completion reply contained no text content"))?
            .to_string();

        debug!(
            "Received {} chars from {} in {:?}",
            answer.len(),
            self.client.provider_name(),
            start_time.elapsed()
        );

        Ok(Response::answered(answer, reply.into_raw()))
    }
}
