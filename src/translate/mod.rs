pub mod interface;
pub mod azure;

pub use interface::{
    BilingualMessage, TargetLanguage, TranslateInterface, TranslationRequest, TranslationResult,
    ENGLISH_LABEL,
};
pub use azure::AzureTranslator;
