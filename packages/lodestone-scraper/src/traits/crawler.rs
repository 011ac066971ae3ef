//! Crawler trait: the crawl-engine boundary.

use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

use crate::error::CrawlResult;
use crate::types::page::CrawledPage;

/// Fetches listing pages.
///
/// Implementations own transport concerns (user agent, timeouts, cookies).
/// A collector issues one `fetch` at a time and never retries a failed one.
#[async_trait]
pub trait Crawler: Send + Sync {
    /// Fetch a single page by URL.
    async fn fetch(&self, url: &Url) -> CrawlResult<CrawledPage>;
}

#[async_trait]
impl<C: Crawler + ?Sized> Crawler for Arc<C> {
    async fn fetch(&self, url: &Url) -> CrawlResult<CrawledPage> {
        (**self).fetch(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;

    struct EchoCrawler;

    #[async_trait]
    impl Crawler for EchoCrawler {
        async fn fetch(&self, url: &Url) -> CrawlResult<CrawledPage> {
            if url.path() == "/down" {
                return Err(CrawlError::Timeout {
                    url: url.to_string(),
                });
            }
            Ok(CrawledPage::new(url.clone(), format!("<p>{}</p>", url.path())))
        }
    }

    #[tokio::test]
    async fn test_shared_crawler_delegates() {
        let crawler: Arc<dyn Crawler> = Arc::new(EchoCrawler);
        let page = crawler
            .fetch(&Url::parse("https://example.com/a").unwrap())
            .await
            .unwrap();
        assert_eq!(page.html, "<p>/a</p>");
    }

    #[tokio::test]
    async fn test_errors_pass_through() {
        let crawler = Arc::new(EchoCrawler);
        let err = crawler
            .fetch(&Url::parse("https://example.com/down").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CrawlError::Timeout { .. }));
    }
}
