//! HTTP access to the job board.
//!
//! `JobBoard` is the seam between the scraping logic and the network:
//! `AppState` carries an `Arc<dyn JobBoard>`, tests plug in a canned board.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

/// Browser-like identity; the guest endpoints reject obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Board returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait JobBoard: Send + Sync {
    /// Origin that relative listing links are resolved against.
    fn base_url(&self) -> &Url;

    /// GETs one page and returns its body. Non-2xx statuses are errors.
    async fn fetch_page(&self, url: &Url) -> Result<String, BoardError>;
}

/// Live board client over reqwest.
#[derive(Clone)]
pub struct HttpJobBoard {
    client: Client,
    base_url: Url,
}

impl HttpJobBoard {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BoardError> {
        let base_url = Url::parse(base_url).map_err(|e| BoardError::InvalidUrl(e.to_string()))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl JobBoard for HttpJobBoard {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch_page(&self, url: &Url) -> Result<String, BoardError> {
        debug!(%url, "GET board page");

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(BoardError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
