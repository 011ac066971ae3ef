//! Page types - fetched pages and page-scoped context.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

use crate::selectors::FieldValues;

/// A page returned by the crawl engine.
#[derive(Debug, Clone)]
pub struct CrawledPage {
    /// Final URL after redirects; relative next-page links resolve against it
    pub url: Url,

    /// Raw HTML
    pub html: String,

    /// HTTP status code
    pub status_code: u16,

    /// HTTP headers
    pub headers: HashMap<String, String>,
}

impl CrawledPage {
    /// Create a new crawled page.
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
            status_code: 200,
            headers: HashMap::new(),
        }
    }

    /// Set the status code.
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Position of a page within a search listing.
///
/// Zero means the listing did not render a page counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
}

impl PageInfo {
    /// Build from a page-counter selector's values (`[current, total]`).
    ///
    /// Fewer than two values leaves both counters at zero.
    pub fn from_values(values: &[String]) -> Self {
        if values.len() < 2 {
            return Self::default();
        }
        Self {
            current_page: values.number(0),
            total_pages: values.number(1),
        }
    }

    /// Whether this is known to be the final page.
    pub fn is_last(&self) -> bool {
        self.total_pages != 0 && self.current_page >= self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_from_values() {
        let info = PageInfo::from_values(&["3".to_string(), "20".to_string()]);
        assert_eq!(info.current_page, 3);
        assert_eq!(info.total_pages, 20);
        assert!(!info.is_last());
    }

    #[test]
    fn test_page_info_needs_both_values() {
        assert_eq!(PageInfo::from_values(&["3".to_string()]), PageInfo::default());
        assert_eq!(PageInfo::from_values(&[]), PageInfo::default());
    }

    #[test]
    fn test_page_info_tolerates_bad_numbers() {
        let info = PageInfo::from_values(&["x".to_string(), "4".to_string()]);
        assert_eq!(info.current_page, 0);
        assert_eq!(info.total_pages, 4);
    }

    #[test]
    fn test_crawled_page_builder() {
        let page = CrawledPage::new(Url::parse("https://example.com/").unwrap(), "<p></p>")
            .with_status(203)
            .with_header("content-type", "text/html");
        assert_eq!(page.status_code, 203);
        assert_eq!(page.headers["content-type"], "text/html");
    }
}
