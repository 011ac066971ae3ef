//! Crawl engine implementations.

pub mod http;

pub use http::HttpCrawler;
