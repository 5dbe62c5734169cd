use std::io::Write;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{AskController, ClaudeAgent, DomainError, QueryOverrides};

pub const DEFAULT_QUESTION: &str = "What is the capital of Italy?";

#[derive(Parser, Debug)]
#[command(name = "claude-ask")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Question to send
    #[arg(default_value = DEFAULT_QUESTION)]
    pub question: String,

    #[arg(short, long)]
    pub verbose: bool,

    /// Model identifier to use instead of the default
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature between 0 and 1
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Also print the raw API response as JSON
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    /// Flags that replace query defaults, or `None` when no flag was given.
    pub fn overrides(&self) -> Option<QueryOverrides> {
        let mut overrides = QueryOverrides::new();

        if let Some(model) = &self.model {
            overrides = overrides.with_model(model.clone());
        }
        if let Some(max_tokens) = self.max_tokens {
            overrides = overrides.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            overrides = overrides.with_temperature(temperature);
        }

        (!overrides.is_empty()).then_some(overrides)
    }
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the one-shot demonstration, writing everything to `out`.
///
/// Any failure, including a missing credential from `build_agent`, is
/// written as `An error occurred: <message>`; only write errors on `out`
/// are returned.
pub async fn run<W, F>(cli: &Cli, build_agent: F, out: &mut W) -> std::io::Result<()>
where
    W: Write,
    F: FnOnce() -> Result<ClaudeAgent, DomainError>,
{
    if let Err(e) = ask_and_print(cli, build_agent, out).await {
        writeln!(out, "An error occurred: {}", e)?;
    }
    Ok(())
}

async fn ask_and_print<W, F>(cli: &Cli, build_agent: F, out: &mut W) -> anyhow::Result<()>
where
    W: Write,
    F: FnOnce() -> Result<ClaudeAgent, DomainError>,
{
    let agent = build_agent()?;
    debug!("Agent ready: {:?}", agent);

    writeln!(out, "{}", AskController::asking_line(&cli.question))?;
    out.flush()?;

    let overrides = cli.overrides();
    let output = AskController::new(&agent)
        .ask(&cli.question, overrides.as_ref(), cli.raw)
        .await?;
    writeln!(out, "{}", output)?;

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use std::sync::Arc;

    use crate::{AgentConfig, MockCompletionClient};

    async fn run_to_string(
        cli: &Cli,
        build_agent: impl FnOnce() -> Result<ClaudeAgent, DomainError>,
    ) -> String {
        let mut out = Vec::new();
        run(cli, build_agent, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn missing_credential_prints_error_line() {
        let cli = Cli::try_parse_from(["claude-ask"]).unwrap();
        let client = Arc::new(MockCompletionClient::replying_with_text("unused"));

        let output = run_to_string(&cli, || {
            ClaudeAgent::with_client(AgentConfig::from_lookup(None, |_| None), client.clone())
        })
        .await;

        assert_eq!(
            output,
            "An error occurred: Configuration error: ANTHROPIC_API_KEY must be provided \
             either as an argument or as an environment variable\n"
        );
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn invalid_temperature_flag_prints_error_line() {
        let cli = Cli::try_parse_from(["claude-ask", "--temperature", "1.5"]).unwrap();
        let client = Arc::new(MockCompletionClient::replying_with_text("unused"));

        let output = run_to_string(&cli, || {
            ClaudeAgent::with_client(AgentConfig::from_lookup(Some("key"), |_| None), client.clone())
        })
        .await;

        assert!(output.starts_with("Asking Claude: What is the capital of Italy?\n"));
        assert!(output.contains("An error occurred: Validation error: temperature"));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn default_run_prints_framed_answer() {
        let cli = Cli::try_parse_from(["claude-ask"]).unwrap();
        let client = Arc::new(MockCompletionClient::replying_with_text(
            "The capital of Italy is Rome.",
        ));

        let output = run_to_string(&cli, || {
            ClaudeAgent::with_client(AgentConfig::from_lookup(Some("key"), |_| None), client.clone())
        })
        .await;

        let separator = "-".repeat(50);
        assert_eq!(
            output,
            format!(
                "Asking Claude: What is the capital of Italy?\n\nClaude's response:\n\
                 {separator}\nThe capital of Italy is Rome.\n{separator}\n"
            )
        );
    }

    #[test]
    fn no_arguments_asks_default_question() {
        let cli = Cli::try_parse_from(["claude-ask"]).unwrap();
        assert_eq!(cli.question, DEFAULT_QUESTION);
        assert!(!cli.raw);
        assert!(cli.overrides().is_none());
    }

    #[test]
    fn flags_become_overrides() {
        let cli = Cli::try_parse_from([
            "claude-ask",
            "Why is the sky blue?",
            "--temperature",
            "0.2",
            "--max-tokens",
            "64",
        ])
        .unwrap();

        assert_eq!(cli.question, "Why is the sky blue?");
        let overrides = cli.overrides().unwrap();
        assert_eq!(overrides.temperature, Some(0.2));
        assert_eq!(overrides.max_tokens, Some(64));
        assert_eq!(overrides.model, None);
    }

    #[test]
    fn negative_max_tokens_rejected_by_parser() {
        let res = Cli::try_parse_from(["claude-ask", "--max-tokens", "-1"]);
        assert!(res.is_err());
    }
}
