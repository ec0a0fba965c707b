//! Translate interface - the Azure-backed implementation lives in `azure.rs`

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::ProxyError;

/// Source label meaning the input is English. Anything else is taken as French.
pub const ENGLISH_LABEL: &str = "English";

/// Missing and `null` fields both fall back to `""` / `"English"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub text: String,
    #[serde(default = "default_lang", deserialize_with = "lang_or_english")]
    pub lang: String,
}

fn default_lang() -> String {
    ENGLISH_LABEL.to_string()
}

pub(crate) fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lang_or_english<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_lang))
}

impl Default for TranslationRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            lang: default_lang(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translated_text: String,
}

/// One chat message in both languages, keyed the way the chat store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilingualMessage {
    #[serde(rename = "Engtext")]
    pub eng_text: String,
    #[serde(rename = "Frenchtext")]
    pub french_text: String,
}

impl BilingualMessage {
    /// Pair the sender's `text` with its translation. The untranslated side
    /// keeps the text exactly as sent.
    pub fn pair(text: String, lang: &str, translated: String) -> Self {
        match TargetLanguage::for_source_label(lang) {
            TargetLanguage::French => Self {
                eng_text: text,
                french_text: translated,
            },
            TargetLanguage::English => Self {
                eng_text: translated,
                french_text: text,
            },
        }
    }
}

/// The only two languages the service translates into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLanguage {
    French,
    English,
}

impl TargetLanguage {
    /// English input goes to French, every other label goes to English.
    pub fn for_source_label(lang: &str) -> Self {
        if lang == ENGLISH_LABEL {
            TargetLanguage::French
        } else {
            TargetLanguage::English
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::French => "fr",
            TargetLanguage::English => "en",
        }
    }
}

#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate `text`, whose language is described by the `lang` label.
    /// Aborts with `ProxyError::Cancelled` once `cancel` fires.
    async fn translate(
        &self,
        text: &str,
        lang: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProxyError>;
}
