pub mod interface;
pub mod client;
pub mod prompt;

pub use interface::{CorrectionRequest, CorrectionResult, TextCorrectionInterface};
pub use client::ChatCompletionCorrector;
pub use prompt::SYSTEM_PROMPT;
