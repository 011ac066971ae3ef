//! Trait seams of the scraper.
//!
//! The crawl engine is the only pluggable boundary: collectors fetch through
//! a [`Crawler`], so tests swap in canned pages and applications can bring
//! their own transport.

pub mod crawler;

pub use crawler::Crawler;
