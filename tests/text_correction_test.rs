mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use chat_translate_backend::text_correction::{
    ChatCompletionCorrector, TextCorrectionInterface, SYSTEM_PROMPT,
};
use chat_translate_backend::ProxyError;
use common::{spawn_upstream, test_config};

fn corrector_for(url: &str) -> ChatCompletionCorrector {
    let config = test_config("http://unused.invalid", url);
    ChatCompletionCorrector::new(config.text_correction_config, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_returns_first_choice_verbatim() {
    let upstream = spawn_upstream(
        StatusCode::OK,
        json!({ "choices": [{ "message": { "role": "assistant", "content": "I know, right?" } }] }),
    )
    .await;
    let corrector = corrector_for(&upstream.base_url);

    let corrected = corrector
        .correct("ikr", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(corrected, "I know, right?");
}

#[tokio::test]
async fn test_whitespace_is_not_trimmed() {
    let upstream = spawn_upstream(
        StatusCode::OK,
        json!({ "choices": [{ "message": { "content": " I know, right? \n" } }] }),
    )
    .await;
    let corrector = corrector_for(&upstream.base_url);

    let corrected = corrector
        .correct("ikr", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(corrected, " I know, right? \n");
}

#[tokio::test]
async fn test_request_shape() {
    let upstream = spawn_upstream(
        StatusCode::OK,
        json!({ "choices": [{ "message": { "content": "What do you mean?" } }] }),
    )
    .await;
    let corrector = corrector_for(&upstream.base_url);

    corrector
        .correct("wdy m", &CancellationToken::new())
        .await
        .unwrap();

    let request = upstream.last_request();
    assert_eq!(request.path, "/together/v1/chat/completions");
    assert_eq!(request.headers["authorization"], "Bearer test-hf-key");
    assert_eq!(request.body["model"], "meta-llama/Meta-Llama-3-8B-Instruct");
    assert_eq!(request.body["max_tokens"], 500);

    let messages = request.body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "wdy m");
}

#[tokio::test]
async fn test_upstream_failure_is_typed() {
    let upstream = spawn_upstream(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "model overloaded" }),
    )
    .await;
    let corrector = corrector_for(&upstream.base_url);

    let err = corrector
        .correct("ikr", &CancellationToken::new())
        .await
        .unwrap_err();
    match err {
        ProxyError::UpstreamError { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("model overloaded"));
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices_is_invalid_shape() {
    let upstream = spawn_upstream(StatusCode::OK, json!({ "choices": [] })).await;
    let corrector = corrector_for(&upstream.base_url);

    let err = corrector
        .correct("ikr", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ProxyError::InvalidResponseShape(_)));
}
