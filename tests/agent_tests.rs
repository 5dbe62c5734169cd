//! Agent behaviour against a scripted completion client.

use std::sync::Arc;

use serde_json::json;

use claude_ask::{
    AgentConfig, AskController, ClaudeAgent, ErrorKind, Message, MockCompletionClient,
    QueryOverrides,
};

const QUESTION: &str = "What is the capital of Italy?";

fn config_with_key() -> AgentConfig {
    AgentConfig::from_lookup(Some("test-key"), |_| None)
}

fn agent_with(client: Arc<MockCompletionClient>) -> ClaudeAgent {
    ClaudeAgent::with_client(config_with_key(), client).expect("agent should build")
}

#[tokio::test]
async fn test_ask_returns_first_text_segment() {
    let client = Arc::new(MockCompletionClient::replying_with(json!({
        "content": [{"text": "Rome"}]
    })));
    let agent = agent_with(client.clone());

    let response = agent.ask(QUESTION, None).await.unwrap();

    assert_eq!(response.answer(), "Rome");
    assert_eq!(
        response.raw_response().unwrap(),
        &json!({"content": [{"text": "Rome"}]})
    );
    assert!(!response.is_error());
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_network_failure_becomes_error_response() {
    let client = Arc::new(MockCompletionClient::failing_with(
        ErrorKind::Network,
        "connection reset by peer",
    ));
    let agent = agent_with(client.clone());

    let response = agent.ask(QUESTION, None).await.unwrap();

    assert!(response.answer().starts_with("Error: "));
    assert!(response.answer().contains("connection reset by peer"));
    assert!(response.raw_response().unwrap().get("error").is_some());
    assert_eq!(response.error_kind(), Some(ErrorKind::Network));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_try_ask_surfaces_failure() {
    let client = Arc::new(MockCompletionClient::failing_with(ErrorKind::RateLimit, "429"));
    let agent = agent_with(client);

    let err = agent.try_ask(QUESTION, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimit);
}

#[test]
fn test_missing_credential_is_configuration_error() {
    let client = Arc::new(MockCompletionClient::replying_with_text("unused"));
    let config = AgentConfig::from_lookup(None, |_| None);

    let err = ClaudeAgent::with_client(config, client.clone()).unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(client.calls(), 0);
}

#[test]
fn test_construction_makes_no_calls() {
    let from_argument = Arc::new(MockCompletionClient::replying_with_text("unused"));
    ClaudeAgent::with_client(config_with_key(), from_argument.clone()).unwrap();
    assert_eq!(from_argument.calls(), 0);

    let from_env = Arc::new(MockCompletionClient::replying_with_text("unused"));
    let config = AgentConfig::from_lookup(None, |name| {
        (name == "ANTHROPIC_API_KEY").then(|| "env-key".to_string())
    });
    ClaudeAgent::with_client(config, from_env.clone()).unwrap();
    assert_eq!(from_env.calls(), 0);
}

#[test]
fn test_explicit_key_builds_http_agent_offline() {
    let agent = ClaudeAgent::new(Some("explicit-key")).unwrap();
    assert_eq!(agent.provider_name(), "anthropic");
}

#[tokio::test]
async fn test_temperature_override_only_changes_temperature() {
    let client = Arc::new(MockCompletionClient::replying_with_text("ok"));
    let agent = agent_with(client.clone());

    agent.ask("x", None).await.unwrap();
    let baseline = client.last_request().unwrap();

    let overrides = QueryOverrides::from_value(json!({"temperature": 0.2})).unwrap();
    agent.ask("x", Some(&overrides)).await.unwrap();
    let request = client.last_request().unwrap();

    assert_eq!(request.temperature, 0.2);
    assert_eq!(request.model, baseline.model);
    assert_eq!(request.max_tokens, baseline.max_tokens);
    assert_eq!(request.messages, baseline.messages);
}

#[tokio::test]
async fn test_unknown_override_is_ignored() {
    let client = Arc::new(MockCompletionClient::replying_with_text("ok"));
    let agent = agent_with(client.clone());

    agent.ask("x", None).await.unwrap();
    let baseline = client.last_request().unwrap();

    let overrides = QueryOverrides::from_value(json!({"bogus_field": 1})).unwrap();
    let response = agent.ask("x", Some(&overrides)).await.unwrap();

    assert_eq!(response.answer(), "ok");
    assert_eq!(client.last_request().unwrap(), baseline);
}

#[tokio::test]
async fn test_out_of_range_override_fails_before_sending() {
    let client = Arc::new(MockCompletionClient::replying_with_text("unused"));
    let agent = agent_with(client.clone());

    let overrides = QueryOverrides::from_value(json!({"temperature": 2.0})).unwrap();
    let err = agent.ask("x", Some(&overrides)).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn test_message_override_passes_conversation_in_order() {
    let client = Arc::new(MockCompletionClient::replying_with_text("Paris"));
    let agent = agent_with(client.clone());
    let conversation = vec![
        Message::user(QUESTION),
        Message::assistant("Rome."),
        Message::user("And of France?"),
    ];

    let overrides = QueryOverrides::new().with_messages(conversation.clone());
    agent.ask("ignored", Some(&overrides)).await.unwrap();

    assert_eq!(client.last_request().unwrap().messages, conversation);
}

#[tokio::test]
async fn test_rendered_answer_sits_between_separators() {
    let client = Arc::new(MockCompletionClient::replying_with_text(
        "The capital of Italy is Rome.",
    ));
    let agent = agent_with(client);

    let output = AskController::new(&agent).ask(QUESTION, None, false).await.unwrap();
    let separator = "-".repeat(50);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(AskController::asking_line(QUESTION), "Asking Claude: What is the capital of Italy?");
    assert_eq!(
        lines,
        vec![
            "",
            "Claude's response:",
            separator.as_str(),
            "The capital of Italy is Rome.",
            separator.as_str(),
        ]
    );
}

#[tokio::test]
async fn test_rendered_error_and_raw_output() {
    let client = Arc::new(MockCompletionClient::failing_with(
        ErrorKind::Authentication,
        "invalid x-api-key",
    ));
    let agent = agent_with(client);

    let output = AskController::new(&agent).ask(QUESTION, None, true).await.unwrap();

    assert!(output.contains("\nError: Authentication error: invalid x-api-key\n"));
    assert!(output.contains("Raw response:"));
    assert!(output.contains("\"error\": \"Authentication error: invalid x-api-key\""));
}
