use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::{ADVISOR_MODEL, DEFAULT_COMPLETION_URL, GENERATION_MODEL};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub groq_api_key: String,
    pub completion_url: String,
    pub generation_model: String,
    pub advisor_model: String,
    pub wkhtmltopdf_path: PathBuf,
    pub output_dir: PathBuf,
    pub draft_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            completion_url: env_or("COMPLETION_URL", DEFAULT_COMPLETION_URL),
            generation_model: env_or("GENERATION_MODEL", GENERATION_MODEL),
            advisor_model: env_or("ADVISOR_MODEL", ADVISOR_MODEL),
            wkhtmltopdf_path: PathBuf::from(env_or("WKHTMLTOPDF_PATH", "wkhtmltopdf")),
            output_dir: PathBuf::from(env_or("OUTPUT_DIR", "outputs")),
            draft_ttl_secs: env_or("DRAFT_TTL_SECS", "86400")
                .parse::<u64>()
                .context("DRAFT_TTL_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
