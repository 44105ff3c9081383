//! End-to-end rewrite/continue flows against a mock endpoint.

use mockito::{Matcher, Server};
use redraft::{
    run_action, Action, CompletionConfig, Error, MemoryProgress, NoopProgress, StringDocument,
};

fn flow_config(base_url: &str) -> CompletionConfig {
    CompletionConfig {
        endpoint: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        max_attempts: 2,
        retry_delay_ms: 10,
        ..CompletionConfig::default()
    }
}

fn sse_content(text: &str) -> String {
    format!(
        "data: {}\ndata: [DONE]\n",
        serde_json::json!({"choices":[{"delta":{"content": text}}]})
    )
}

#[tokio::test]
async fn rewrite_replaces_the_selection() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_content("swift"))
        .create_async()
        .await;

    let config = flow_config(&server.url());
    let mut doc = StringDocument::with_selection("The quick brown fox", 4..9);
    let mut progress = MemoryProgress::new();

    let applied = run_action(Action::Rewrite, &mut doc, &config, &mut progress)
        .await
        .unwrap();

    assert_eq!(applied, "swift");
    assert_eq!(doc.text(), "The swift brown fox");
    assert!(progress.cleared);
}

#[tokio::test]
async fn continue_inserts_at_the_selection_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        // Continue primes the model with the prior text as its own output.
        .match_body(Matcher::PartialJson(serde_json::json!({
            "messages": [
                {"role": "user", "content": "Please continue."},
                {"role": "assistant", "content": "The story begins. "},
            ]
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse_content("It was a dark night."))
        .create_async()
        .await;

    let config = flow_config(&server.url());
    let mut doc = StringDocument::with_selection("The story begins. ", 18..18);
    let mut progress = NoopProgress;

    let applied = run_action(Action::Continue, &mut doc, &config, &mut progress)
        .await
        .unwrap();

    assert_eq!(applied, "It was a dark night.");
    assert_eq!(doc.text(), "The story begins. It was a dark night.");
    mock.assert_async().await;
}

#[tokio::test]
async fn rewrite_requires_a_nonblank_selection() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let config = flow_config(&server.url());
    let mut doc = StringDocument::with_selection("   surrounding   ", 0..3);
    let mut progress = NoopProgress;

    let err = run_action(Action::Rewrite, &mut doc, &config, &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(doc.text(), "   surrounding   ");
    mock.assert_async().await;
}

#[tokio::test]
async fn hosted_endpoint_without_credential_fails_before_network() {
    std::env::remove_var("OPENAI_API_KEY");

    let config = CompletionConfig::default();
    let mut doc = StringDocument::with_selection("some words here", 0..4);
    let mut progress = NoopProgress;

    let err = run_action(Action::Rewrite, &mut doc, &config, &mut progress)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration(_)));
}
