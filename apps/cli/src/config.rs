use anyhow::{bail, Context, Result};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_API_TIMEOUT_SECS: u64 = 120;

/// Client configuration loaded from environment variables (or a `.env` file).
/// Every setting has a literal default, so nothing is required at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn new(api_base_url: impl Into<String>, api_timeout_secs: u64) -> Self {
        Config {
            api_base_url: normalize_base_url(api_base_url.into()),
            api_timeout_secs,
            rust_log: "info".to_string(),
        }
    }

    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_timeout_secs = match std::env::var("API_TIMEOUT") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_API_TIMEOUT_SECS,
        };

        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Config {
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ..Config::new(api_base_url, api_timeout_secs)
        })
    }

    /// Full URL of the analysis endpoint.
    pub fn analyze_url(&self) -> String {
        format!("{}/resume/analyze", self.api_base_url)
    }
}

fn parse_timeout(raw: &str) -> Result<u64> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .with_context(|| format!("API_TIMEOUT must be a whole number of seconds, got '{raw}'"))?;
    if secs == 0 {
        bail!("API_TIMEOUT must be greater than zero");
    }
    Ok(secs)
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
