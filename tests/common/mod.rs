#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    extract::Query,
    http::{HeaderMap, Request, StatusCode, Uri},
    response::Response,
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chat_translate_backend::Config;

/// One request as seen by the stub upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Value,
}

/// A local HTTP server standing in for a third-party API.
pub struct StubUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests()
            .pop()
            .expect("stub upstream received no request")
    }
}

/// Answer every request with `status` and `body`.
pub async fn spawn_upstream(status: StatusCode, body: Value) -> StubUpstream {
    spawn_delayed_upstream(status, body, Duration::ZERO).await
}

/// Like `spawn_upstream`, but wait `delay` before answering.
pub async fn spawn_delayed_upstream(status: StatusCode, body: Value, delay: Duration) -> StubUpstream {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorder = requests.clone();

    let app = Router::new().fallback(
        move |uri: Uri,
              Query(query): Query<HashMap<String, String>>,
              headers: HeaderMap,
              raw: Bytes| {
            let recorder = recorder.clone();
            let body = body.clone();
            async move {
                recorder.lock().unwrap().push(RecordedRequest {
                    path: uri.path().to_string(),
                    query,
                    headers,
                    body: serde_json::from_slice(&raw).unwrap_or(Value::Null),
                });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (status, Json(body))
            }
        },
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubUpstream {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// Config with both upstreams pointed at local stubs and fake credentials.
pub fn test_config(translator_url: &str, correction_url: &str) -> Config {
    let mut config = Config::default();
    config.system_config.request_timeout_secs = 5;
    config.translator_config.endpoint = translator_url.to_string();
    config.translator_config.api_key = "test-azure-key".to_string();
    config.text_correction_config.base_url = correction_url.to_string();
    config.text_correction_config.api_key = "test-hf-key".to_string();
    config
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn translation_body(text: &str) -> Value {
    serde_json::json!([{ "translations": [{ "text": text, "to": "fr" }] }])
}
