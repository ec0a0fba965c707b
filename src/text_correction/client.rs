use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use super::interface::TextCorrectionInterface;
use super::prompt::SYSTEM_PROMPT;
use crate::config::TextCorrectionConfig;
use crate::error::ProxyError;

/// Grammar corrector talking to an OpenAI-style chat-completion endpoint
/// behind the Hugging Face inference router.
#[derive(Debug, Clone)]
pub struct ChatCompletionCorrector {
    client: Client,
    config: TextCorrectionConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatCompletionCorrector {
    pub fn new(config: TextCorrectionConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        info!(
            "Initialized ChatCompletionCorrector: model={}, provider={}",
            config.model, config.provider
        );
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/'),
            self.config.provider
        )
    }

    async fn send(&self, text: &str) -> Result<String, ProxyError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        debug!("Sending correction request: model={}", self.config.model);

        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Chat completion returned {}: {}", status, body);
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        first_choice_content(&body)
    }
}

fn first_choice_content(body: &str) -> Result<String, ProxyError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ProxyError::InvalidResponseShape(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProxyError::InvalidResponseShape("no completion content".to_string()))
}

#[async_trait]
impl TextCorrectionInterface for ChatCompletionCorrector {
    async fn correct(&self, text: &str, cancel: &CancellationToken) -> Result<String, ProxyError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProxyError::Cancelled),
            result = self.send(text) => result,
        }
    }
}
