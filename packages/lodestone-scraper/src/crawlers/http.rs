//! HTTP crawl engine on `reqwest`.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{CrawlError, CrawlResult};
use crate::traits::crawler::Crawler;
use crate::types::config::ScraperConfig;
use crate::types::page::CrawledPage;

/// Fetches pages over HTTP with a fixed user agent and request timeout.
///
/// # Example
///
/// ```rust,ignore
/// use lodestone_scraper::{HttpCrawler, ScraperConfig};
///
/// let crawler = HttpCrawler::from_config(&ScraperConfig::from_env()?)?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpCrawler {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpCrawler {
    /// Build a crawler with the given user agent and timeout.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> CrawlResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CrawlError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }

    /// Build a crawler from scraper configuration (desktop user agent).
    pub fn from_config(config: &ScraperConfig) -> CrawlResult<Self> {
        Self::new(config.meta.user_agent_desktop.clone(), config.request_timeout)
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The user agent sent with every request.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[async_trait]
impl Crawler for HttpCrawler {
    async fn fetch(&self, url: &Url) -> CrawlResult<CrawledPage> {
        debug!(url = %url, "HTTP fetch starting");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                if e.is_timeout() {
                    CrawlError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    CrawlError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "HTTP status not successful");
            return Err(CrawlError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP {}", status),
            ))));
        }

        // Capture final URL after redirects
        let final_url = response.url().clone();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                CrawlError::Timeout {
                    url: url.to_string(),
                }
            } else {
                CrawlError::Http(Box::new(e))
            }
        })?;

        debug!(url = %final_url, status = status.as_u16(), bytes = html.len(), "HTTP fetch complete");

        Ok(CrawledPage {
            url: final_url,
            html,
            status_code: status.as_u16(),
            headers,
        })
    }
}
