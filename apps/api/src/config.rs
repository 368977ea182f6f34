use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
///
/// Only malformed values fail at startup. A missing API key is tolerated here
/// and surfaces as an auth error on the first completion call.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub port: u16,
    pub rust_log: String,
}

/// Everything the completion client needs. Passed explicitly into
/// `LlmClient::new`; the client never reads the environment itself.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
    /// Extra attempts after the first one. 0 means at-most-once.
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_LLM_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_LLM_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            max_retries: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = LlmConfig::default();

        let llm = LlmConfig {
            api_url: optional_env("LLM_API_URL").unwrap_or(defaults.api_url),
            api_key: optional_env("LLM_API_KEY"),
            model: optional_env("LLM_MODEL").unwrap_or(defaults.model),
            timeout: match optional_env("LLM_TIMEOUT_SECS") {
                Some(raw) => Duration::from_secs(
                    raw.parse::<u64>()
                        .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
                ),
                None => defaults.timeout,
            },
            max_retries: match optional_env("LLM_MAX_RETRIES") {
                Some(raw) => raw
                    .parse::<u32>()
                    .context("LLM_MAX_RETRIES must be a non-negative integer")?,
                None => defaults.max_retries,
            },
        };

        Ok(Config {
            llm,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
