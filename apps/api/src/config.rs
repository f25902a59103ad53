use anyhow::{Context, Result};

const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com";
const DEFAULT_ADZUNA_BASE_URL: &str = "https://api.adzuna.com";
const DEFAULT_ADZUNA_COUNTRY: &str = "gb";

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to the LLM client and job source constructors.
#[derive(Debug, Clone)]
pub struct Config {
    /// Checked lazily: a missing key only fails the requests that need the LLM.
    pub groq_api_key: Option<String>,
    pub llm_base_url: String,
    /// Present only when both Adzuna credentials are set; selects external mode.
    pub adzuna: Option<AdzunaConfig>,
    pub port: u16,
    pub rust_log: String,
}

#[derive(Debug, Clone)]
pub struct AdzunaConfig {
    pub app_id: String,
    pub app_key: String,
    pub country: String,
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let adzuna = match (optional_env("ADZUNA_APP_ID"), optional_env("ADZUNA_APP_KEY")) {
            (Some(app_id), Some(app_key)) => Some(AdzunaConfig {
                app_id,
                app_key,
                country: optional_env("ADZUNA_COUNTRY")
                    .unwrap_or_else(|| DEFAULT_ADZUNA_COUNTRY.to_string())
                    .to_lowercase(),
                base_url: optional_env("ADZUNA_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_ADZUNA_BASE_URL.to_string()),
            }),
            _ => None,
        };

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            llm_base_url: optional_env("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string()),
            adzuna,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Name of the active job source, reported by the health endpoint.
    pub fn job_source_mode(&self) -> &'static str {
        if self.adzuna.is_some() {
            "external"
        } else {
            "sample"
        }
    }
}

/// Reads a variable, treating unset and blank values the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
