use std::time::Duration;

use tracing::warn;

use crate::error::{ImporterError, Result};
use crate::traits::PageFetcher;

pub const DEFAULT_BASE_URL: &str = "https://wushujudges.ru";

const USER_AGENT: &str = "Mozilla/5.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// HTTP client for wushujudges.ru.
pub struct WushuJudgesClient {
    client: reqwest::Client,
}

impl WushuJudgesClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            // The site serves a certificate chain that fails strict validation.
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client })
    }

    async fn fetch_with_retries(&self, url: &str) -> Result<String> {
        for attempt in 1..=MAX_RETRIES {
            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!(url, attempt, error = %e, "Fetch attempt failed");
                    if attempt < MAX_RETRIES {
                        tokio::time::sleep(RETRY_DELAY).await;
                    }
                }
            }
        }

        Err(ImporterError::FetchExhausted {
            url: url.to_string(),
            attempts: MAX_RETRIES,
        })
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImporterError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait::async_trait]
impl PageFetcher for WushuJudgesClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetch_with_retries(url).await
    }
}
