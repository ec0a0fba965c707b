use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Prefix for environment overrides, e.g.
/// `CHAT_TRANSLATE__SYSTEM_CONFIG__PORT=9000`.
pub const ENV_PREFIX: &str = "CHAT_TRANSLATE";

/// Variable names the credentials fall back to when neither the file nor
/// the prefixed environment set them.
pub const TRANSLATOR_KEY_VAR: &str = "Azure_Key";
pub const TEXT_CORRECTION_KEY_VAR: &str = "HUGGINGFACE_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub system_config: SystemConfig,
    pub translator_config: TranslatorConfig,
    pub text_correction_config: TextCorrectionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Keep answering `/translate` with `"Error: <status>"` and a 200 when the
    /// upstream rejects a request.
    #[serde(default = "default_true")]
    pub legacy_error_strings: bool,
    /// Empty means any origin.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
            legacy_error_strings: true,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl SystemConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Azure Translator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub endpoint: String,
    pub region: String,
    pub api_version: String,
    pub api_key: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.cognitive.microsofttranslator.com".to_string(),
            region: "westus2".to_string(),
            api_version: "3.0".to_string(),
            api_key: String::new(),
        }
    }
}

/// Chat-completion settings for the grammar corrector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextCorrectionConfig {
    pub base_url: String,
    pub provider: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_key: String,
}

impl Default for TextCorrectionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://router.huggingface.co".to_string(),
            provider: "together".to_string(),
            model: "meta-llama/Meta-Llama-3-8B-Instruct".to_string(),
            max_tokens: 500,
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Load a YAML or JSON file, layered under the prefixed environment.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let content = substitute_env_vars(&content)?;

        let path_lower = path.to_lowercase();
        let format = if path_lower.ends_with(".json") || path_lower.ends_with(".jsonld") {
            ::config::FileFormat::Json
        } else {
            ::config::FileFormat::Yaml
        };

        let mut config = Self::build(Some((&content, format)), None)?;
        config.fill_credentials(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Defaults plus the prefixed environment, for running without a file.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::build(None, None)?;
        config.fill_credentials(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Try each candidate path in order and fall back to the environment
    /// when none of them exists.
    pub fn discover() -> Result<Self> {
        for path in candidate_paths() {
            if !Path::new(&path).exists() {
                debug!("No config at {}", path);
                continue;
            }
            let config = Self::load(&path)?;
            info!("Loaded configuration from: {}", path);
            return Ok(config);
        }

        info!("No config file found, using defaults and environment");
        Self::from_env()
    }

    fn build(
        file: Option<(&str, ::config::FileFormat)>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some((content, format)) = file {
            builder = builder.add_source(::config::File::from_str(content, format));
        }

        let environment = ::config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("system_config.cors_allowed_origins")
            .source(env);

        let config: Config = builder.add_source(environment).build()?.try_deserialize()?;
        Ok(config)
    }

    fn fill_credentials(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for (key, var) in [
            (&mut self.translator_config.api_key, TRANSLATOR_KEY_VAR),
            (&mut self.text_correction_config.api_key, TEXT_CORRECTION_KEY_VAR),
        ] {
            if is_unresolved(key.as_str()) {
                *key = lookup(var).unwrap_or_default();
            }
        }
    }
}

/// Empty, or a `${VAR}` placeholder whose variable was not set.
fn is_unresolved(value: &str) -> bool {
    value.is_empty() || (value.starts_with("${") && value.ends_with('}'))
}

fn candidate_paths() -> Vec<String> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    vec![
        std::env::var("CONFIG_PATH").ok(),
        Some("conf.yaml".to_string()),
        Some("conf.json".to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Replace `${VAR_NAME}` with the variable's value. Unset variables are left
/// untouched.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    substitute_with(content, |name| std::env::var(name).ok())
}

fn substitute_with(content: &str, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
