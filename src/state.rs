use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::text_correction::{ChatCompletionCorrector, TextCorrectionInterface};
use crate::translate::{AzureTranslator, TranslateInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub translator: Arc<dyn TranslateInterface>,
    pub text_corrector: Arc<dyn TextCorrectionInterface>,
    /// Cancelled on shutdown; every outbound call races against it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: Config, shutdown: CancellationToken) -> anyhow::Result<Self> {
        let timeout = config.system_config.request_timeout();
        let translator = Arc::new(AzureTranslator::new(
            config.translator_config.clone(),
            timeout,
        )?);
        let text_corrector = Arc::new(ChatCompletionCorrector::new(
            config.text_correction_config.clone(),
            timeout,
        )?);

        Ok(Self::with_services(config, translator, text_corrector, shutdown))
    }

    /// Build state around already-constructed services.
    pub fn with_services(
        config: Config,
        translator: Arc<dyn TranslateInterface>,
        text_corrector: Arc<dyn TextCorrectionInterface>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            config,
            translator,
            text_corrector,
            shutdown,
        }
    }
}
