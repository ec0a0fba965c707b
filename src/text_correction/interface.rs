use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::ProxyError;
use crate::translate::interface::text_or_empty;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionRequest {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub corrected_text: String,
}

/// Interface for a grammar/spelling corrector backed by a language model
#[async_trait]
pub trait TextCorrectionInterface: Send + Sync {
    /// Return the model's corrected version of `text`, exactly as the model
    /// produced it.
    async fn correct(&self, text: &str, cancel: &CancellationToken) -> Result<String, ProxyError>;
}
