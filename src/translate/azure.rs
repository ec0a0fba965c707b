use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::interface::{TargetLanguage, TranslateInterface};
use crate::config::TranslatorConfig;
use crate::error::ProxyError;

/// Client for the Azure Translator v3 REST API
#[derive(Debug, Clone)]
pub struct AzureTranslator {
    client: Client,
    config: TranslatorConfig,
}

#[derive(Debug, Serialize)]
struct TextItem<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateEntry {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

impl AzureTranslator {
    pub fn new(config: TranslatorConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        info!(
            "Initialized AzureTranslator: endpoint={}, region={}",
            config.endpoint, config.region
        );
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!("{}/translate", self.config.endpoint.trim_end_matches('/'))
    }

    async fn send(&self, text: &str, target: TargetLanguage) -> Result<String, ProxyError> {
        let trace_id = Uuid::new_v4().to_string();
        debug!("Translating to {} (trace id {})", target.code(), trace_id);

        let response = self
            .client
            .post(self.url())
            .query(&[
                ("api-version", self.config.api_version.as_str()),
                ("to", target.code()),
            ])
            .header("Ocp-Apim-Subscription-Key", &self.config.api_key)
            .header("Ocp-Apim-Subscription-Region", &self.config.region)
            .header("Content-type", "application/json")
            .header("X-ClientTraceId", &trace_id)
            .json(&[TextItem { text }])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            error!(
                "Translator returned {} (trace id {}): {}",
                status, trace_id, body
            );
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
                body,
            });
        }

        first_translation(&body)
    }
}

/// Pull `[0].translations[0].text` out of a translator response body.
fn first_translation(body: &str) -> Result<String, ProxyError> {
    let entries: Vec<TranslateEntry> = serde_json::from_str(body)
        .map_err(|e| ProxyError::InvalidResponseShape(e.to_string()))?;

    entries
        .into_iter()
        .next()
        .and_then(|entry| entry.translations.into_iter().next())
        .map(|translation| translation.text)
        .ok_or_else(|| ProxyError::InvalidResponseShape("no translations in response".to_string()))
}

#[async_trait]
impl TranslateInterface for AzureTranslator {
    async fn translate(
        &self,
        text: &str,
        lang: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProxyError> {
        let target = TargetLanguage::for_source_label(lang);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProxyError::Cancelled),
            result = self.send(text, target) => result,
        }
    }
}
