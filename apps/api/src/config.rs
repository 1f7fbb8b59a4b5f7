use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Origin of the job board, e.g. `https://www.linkedin.com`.
    pub job_board_base_url: String,
    /// Maximum listing stubs harvested per run.
    pub search_result_limit: usize,
    /// Results kept after ranking.
    pub ranking_top_n: usize,
    /// Detail pages fetched at once. 1 keeps one request in flight.
    pub detail_fetch_concurrency: usize,
    pub http_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            job_board_base_url: "https://www.linkedin.com".to_string(),
            search_result_limit: 12,
            ranking_top_n: 5,
            detail_fetch_concurrency: 1,
            http_timeout_secs: 30,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            job_board_base_url: std::env::var("JOB_BOARD_BASE_URL")
                .unwrap_or(defaults.job_board_base_url),
            search_result_limit: env_or("SEARCH_RESULT_LIMIT", defaults.search_result_limit)?,
            ranking_top_n: env_or("RANKING_TOP_N", defaults.ranking_top_n)?,
            detail_fetch_concurrency: env_or(
                "DETAIL_FETCH_CONCURRENCY",
                defaults.detail_fetch_concurrency,
            )?,
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.search_result_limit, 12);
        assert_eq!(config.ranking_top_n, 5);
        assert_eq!(config.detail_fetch_concurrency, 1);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert_eq!(parse_value::<usize>("SEARCH_RESULT_LIMIT", " 25 ").unwrap(), 25);
    }
}
