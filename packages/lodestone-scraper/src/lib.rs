//! Lodestone Listing Scraper
//!
//! Walks the paginated listings of the Final Fantasy XIV Lodestone
//! (character achievements, and the character, free company, linkshell,
//! cross-world linkshell and PVP team searches) and streams one typed record
//! per entry.
//!
//! # Design
//!
//! - Selector-driven: every field is read by a declarative selector loaded
//!   from JSON assets compiled into the crate
//! - One page at a time: all entries of a page are streamed before the next
//!   page is requested
//! - Best-effort fields: a field that is missing or does not parse is left at
//!   its zero value; the record is still emitted
//! - Loud transport failures: a failed fetch ends the stream with one `Err`
//!
//! # Usage
//!
//! ```rust,ignore
//! use futures::StreamExt;
//! use lodestone_scraper::{FreeCompanyOptions, Lodestone, ScraperConfig};
//!
//! let lodestone = Lodestone::with_http(ScraperConfig::from_env()?)?;
//!
//! let (mut results, pages) = lodestone.search_free_companies(
//!     &FreeCompanyOptions::new("heaven").with_data_center("Aether"),
//! )?;
//! while let Some(fc) = results.next().await {
//!     let fc = fc?;
//!     println!("{} [{}] page {:?}", fc.name, fc.world, *pages.borrow());
//! }
//! ```
//!
//! # Modules
//!
//! - [`client`] - The [`Lodestone`] facade
//! - [`collectors`] - Per-listing extraction and the shared traversal loop
//! - [`selectors`] - Declarative field selectors and their packed assets
//! - [`tables`] - Packed multilingual lookup tables
//! - [`traits`] - The crawl-engine boundary
//! - [`crawlers`] - Crawl engine implementations (HttpCrawler)
//! - [`types`] - Records, options and configuration
//! - [`testing`] - Mock crawl engine and page fixtures

pub mod client;
pub mod collectors;
pub mod crawlers;
pub mod error;
pub mod selectors;
pub mod tables;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use client::{Lodestone, SearchStream};
pub use collectors::{
    AchievementListing, CharacterListing, Collector, CwlsListing, FreeCompanyListing,
    LinkshellListing, Listing, ListingPage, PvpTeamListing, RecordStream, Termination,
    TraversalSummary, SENTINEL,
};
pub use error::{ConfigError, ConfigResult, CrawlError, CrawlResult, Result, ScrapeError, TableError};
pub use selectors::{FieldValues, ProfileSelectors, SearchSelectors, SelectorInfo};
pub use tables::{LookupTable, NamedEntity, NamedRowArgs};
pub use traits::Crawler;
pub use types::{
    config::{Locale, Meta, PageLimits, ScraperConfig},
    page::{CrawledPage, PageInfo},
    records::{
        AchievementInfo, AchievementTotals, CharacterSearchResult, CrestLayers, CwlsSearchResult,
        FreeCompanySearchResult, LinkshellSearchResult, PvpTeamSearchResult,
    },
    search::{
        CharacterOptions, CwlsOptions, FreeCompanyOptions, GrandCompanyFilter, LinkshellOptions,
        MemberCount, PvpTeamOptions, SearchOrder, SearchQuery,
    },
};

// Re-export crawlers
pub use crawlers::HttpCrawler;

// Re-export testing utilities
pub use testing::MockCrawler;
