use anyhow::Result;

use crate::{ClaudeAgent, QueryOverrides, Response};

const SEPARATOR_WIDTH: usize = 50;

pub struct AskController<'a> {
    agent: &'a ClaudeAgent,
}

impl<'a> AskController<'a> {
    pub fn new(agent: &'a ClaudeAgent) -> Self {
        Self { agent }
    }

    pub fn asking_line(question: &str) -> String {
        format!("Asking Claude: {}", question)
    }

    /// Ask and render the answer block; with `raw` the reply JSON follows it.
    pub async fn ask(
        &self,
        question: &str,
        overrides: Option<&QueryOverrides>,
        raw: bool,
    ) -> Result<String> {
        let response = self.agent.ask(question, overrides).await?;
        self.format_response(&response, raw)
    }

    fn format_response(&self, response: &Response, raw: bool) -> Result<String> {
        let separator = "-".repeat(SEPARATOR_WIDTH);

        let mut output = String::from("\nClaude's response:\n");
        output.push_str(&format!("{}\n", separator));
        output.push_str(&format!("{}\n", response.answer()));
        output.push_str(&separator);

        if raw {
            if let Some(raw_response) = response.raw_response() {
                output.push_str("\n\nRaw response:\n");
                output.push_str(&serde_json::to_string_pretty(raw_response)?);
            }
        }

        Ok(output)
    }
}
