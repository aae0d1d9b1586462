//! HTTP completion client against a mock endpoint

use mockito::Matcher;
use openwiki::ai::SYSTEM_INSTRUCTION;
use openwiki::config::CompletionConfig;
use openwiki::{CompletionClient, CompletionError, HttpCompletionClient};
use serde_json::json;

fn config(api_base: String, api_key: Option<&str>) -> CompletionConfig {
    CompletionConfig {
        api_base,
        model: "test-model".to_string(),
        api_key: api_key.map(str::to_string),
        timeout_secs: 5,
        ..CompletionConfig::default()
    }
}

#[tokio::test]
async fn test_returns_first_choice_content() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "test-model",
            "max_tokens": 8192,
            "messages": [
                {"role": "system", "content": SYSTEM_INSTRUCTION},
                {"role": "user", "content": "REPOSITORY: octo/hello\nCODE FILES:\n"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"overview\": \"Hi\"}"}}
            ]
        }"#,
        )
        .create_async()
        .await;

    let client = HttpCompletionClient::new(&config(server.url(), Some("sk-test"))).unwrap();
    let text = client
        .generate_structured_docs("REPOSITORY: octo/hello\nCODE FILES:\n")
        .await
        .unwrap();

    assert_eq!(text, r#"{"overview": "Hi"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_authorization_without_key() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
        .create_async()
        .await;

    let client = HttpCompletionClient::new(&config(server.url(), None)).unwrap();
    assert_eq!(client.generate_structured_docs("ctx").await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = HttpCompletionClient::new(&config(server.url(), Some("sk-test"))).unwrap();
    let err = client.generate_structured_docs("ctx").await.unwrap_err();

    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_content_is_error() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"role": "assistant", "content": ""}}]}"#)
        .create_async()
        .await;

    let client = HttpCompletionClient::new(&config(server.url(), None)).unwrap();
    let err = client.generate_structured_docs("ctx").await.unwrap_err();
    assert!(matches!(err, CompletionError::EmptyContent));
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body("<html>proxy login</html>")
        .create_async()
        .await;

    let client = HttpCompletionClient::new(&config(server.url(), None)).unwrap();
    let err = client.generate_structured_docs("ctx").await.unwrap_err();
    assert!(matches!(err, CompletionError::MalformedBody(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client =
        HttpCompletionClient::new(&config("http://127.0.0.1:1".to_string(), None)).unwrap();
    let err = client.generate_structured_docs("ctx").await.unwrap_err();
    assert!(err.is_transport());
}
