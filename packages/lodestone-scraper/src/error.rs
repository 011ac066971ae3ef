//! Typed errors for the scraper.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can reach the caller of a collector or the scraper facade.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Fetching a listing page failed
    #[error("crawl failed: {0}")]
    Crawl(#[from] CrawlError),

    /// Selector assets or environment configuration failed to load
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A lookup table blob failed verification
    #[error("lookup table error: {0}")]
    Table(#[from] TableError),

    /// The next-page locator could not be resolved against the current page
    #[error("invalid next-page locator {locator:?}: {reason}")]
    InvalidLocator { locator: String, reason: String },
}

/// Errors raised at the crawl-engine boundary.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Connection timeout
    #[error("timeout crawling: {url}")]
    Timeout { url: String },

    /// Page ceiling reached before the listing signalled its end
    #[error("max pages reached: {count}")]
    MaxPagesReached { count: usize },
}

/// Errors loading selector assets or configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A selector asset is not valid JSON for its schema
    #[error("selector asset {asset}: {source}")]
    Json {
        asset: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A CSS selector did not compile
    #[error("invalid CSS selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    /// A field regex did not compile
    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),

    /// An environment variable held an unusable value
    #[error("environment variable {key}: {reason}")]
    Env { key: &'static str, reason: String },
}

/// Errors decoding a packed lookup table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The buffer is not a well-formed table
    #[error("invalid table buffer: {0}")]
    Invalid(#[from] flatbuffers::InvalidFlatbuffer),
}

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for crawl operations.
pub type CrawlResult<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_error_converts_into_scrape_error() {
        let err: ScrapeError = CrawlError::MaxPagesReached { count: 3 }.into();
        assert!(matches!(
            err,
            ScrapeError::Crawl(CrawlError::MaxPagesReached { count: 3 })
        ));
        assert_eq!(err.to_string(), "crawl failed: max pages reached: 3");
    }

    #[test]
    fn test_config_error_names_the_asset() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::Json {
            asset: "search/linkshell.json",
            source,
        };
        assert!(err.to_string().starts_with("selector asset search/linkshell.json"));
    }
}
