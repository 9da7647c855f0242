use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::interview::summarize::SummarizerKind;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single model call.
    pub llm_timeout: Duration,
    /// Include backend causes in failure envelopes. Off outside local debugging.
    pub expose_backend_errors: bool,
    pub summarizer: SummarizerKind,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(
                std::env::var("LLM_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            expose_backend_errors: parse_flag(
                "EXPOSE_BACKEND_ERRORS",
                std::env::var("EXPOSE_BACKEND_ERRORS").ok(),
            )?,
            summarizer: std::env::var("SUMMARIZER")
                .ok()
                .map(|v| v.parse::<SummarizerKind>())
                .transpose()
                .map_err(|e| anyhow!(e))?
                .unwrap_or_default(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_flag(key: &str, value: Option<String>) -> Result<bool> {
    match value.as_deref().map(|v| v.trim().to_lowercase()) {
        None => Ok(false),
        Some(v) => match v.as_str() {
            "" | "0" | "false" | "no" | "off" => Ok(false),
            "1" | "true" | "yes" | "on" => Ok(true),
            other => Err(anyhow!("{key} must be a boolean, got '{other}'")),
        },
    }
}
