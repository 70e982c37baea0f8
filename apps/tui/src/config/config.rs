use dotenv::dotenv;
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend, including the `/api/v1` prefix.
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub debug: bool,
}

/// Initializes the application configuration from `.env` and the
/// environment. Every value has a default; a missing backend only shows up
/// later as failed fetches in the status line.
pub fn init_app_config() -> Config {
    // Load environment variables from .env file
    dotenv().ok();

    let api_base_url = env::var("ATLAS_API_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_owned())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

    let http_timeout_secs = env::var("ATLAS_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let debug = env::var("DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    Config {
        api_base_url,
        http_timeout_secs,
        debug,
    }
}

#[cfg(test)]
mod tests {
    use super::{init_app_config, DEFAULT_API_URL};

    // The process environment is shared across test threads, so every check
    // that touches it lives in this one test and runs sequentially.
    #[test]
    fn env_defaults_and_normalization() {
        std::env::remove_var("ATLAS_API_URL");
        std::env::remove_var("ATLAS_HTTP_TIMEOUT_SECS");
        let config = init_app_config();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.http_timeout_secs, 30);

        std::env::set_var("ATLAS_API_URL", "http://example.com/api/v1/");
        let config = init_app_config();
        assert_eq!(config.api_base_url, "http://example.com/api/v1");
        std::env::remove_var("ATLAS_API_URL");
    }
}
