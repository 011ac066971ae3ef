//! The `Lodestone` facade: selectors, tables and a crawl engine in one place.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

use crate::collectors::{
    AchievementListing, CharacterListing, Collector, CwlsListing, FreeCompanyListing,
    LinkshellListing, Listing, PvpTeamListing, RecordStream, Termination,
};
use crate::crawlers::HttpCrawler;
use crate::error::Result;
use crate::selectors::{AchievementSelectors, ProfileSelectors, SearchSelectors};
use crate::tables::LookupTable;
use crate::traits::crawler::Crawler;
use crate::types::config::ScraperConfig;
use crate::types::page::PageInfo;
use crate::types::records::{
    AchievementInfo, CharacterSearchResult, CwlsSearchResult, FreeCompanySearchResult,
    LinkshellSearchResult, PvpTeamSearchResult,
};
use crate::types::search::{
    CharacterOptions, CwlsOptions, FreeCompanyOptions, LinkshellOptions, PvpTeamOptions,
    SearchQuery,
};

/// A search stream plus the slot its page counter is published to.
pub type SearchStream<T> = (RecordStream<T>, watch::Receiver<PageInfo>);

/// Entry point for scraping listings.
///
/// Cheap to clone; every collector it spawns shares the loaded selectors and
/// tables.
///
/// # Example
///
/// ```rust,ignore
/// use futures::StreamExt;
/// use lodestone_scraper::{Lodestone, ScraperConfig};
///
/// let lodestone = Lodestone::with_http(ScraperConfig::from_env()?)?;
/// let mut achievements = lodestone.fetch_character_achievements(9575452)?;
/// while let Some(achievement) = achievements.next().await {
///     println!("{:?}", achievement?);
/// }
/// ```
#[derive(Clone)]
pub struct Lodestone {
    config: ScraperConfig,
    crawler: Arc<dyn Crawler>,
    achievements: Arc<AchievementSelectors>,
    search: SearchSelectors,
    grand_companies: LookupTable,
}

impl Lodestone {
    /// Load the packed selectors and grand company table and bind them to
    /// `crawler`.
    pub fn new(config: ScraperConfig, crawler: Arc<dyn Crawler>) -> Result<Self> {
        let profile = ProfileSelectors::load()?;
        let search = SearchSelectors::load()?;
        let grand_companies = LookupTable::grand_companies()?;
        debug!(
            locale = %config.locale,
            grand_companies = grand_companies.len(),
            "Selectors and tables loaded"
        );

        Ok(Self {
            config,
            crawler,
            achievements: profile.achievements,
            search,
            grand_companies,
        })
    }

    /// Like [`Lodestone::new`] with an [`HttpCrawler`] built from `config`.
    pub fn with_http(config: ScraperConfig) -> Result<Self> {
        let crawler = HttpCrawler::from_config(&config)?;
        Self::new(config, Arc::new(crawler))
    }

    /// Resolve free company grand companies through `table` instead of the
    /// packed one.
    pub fn with_grand_company_table(mut self, table: LookupTable) -> Self {
        self.grand_companies = table;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Stream every unlocked achievement of a character.
    pub fn fetch_character_achievements(&self, character_id: u32) -> Result<RecordStream<AchievementInfo>> {
        let url = self
            .config
            .locale
            .url(&format!("character/{character_id}/achievement/"))?;
        let listing = AchievementListing::new(Arc::clone(&self.achievements));
        let termination = Termination::sentinel_only(self.config.achievement_limits);

        Ok(Collector::new(listing, Arc::clone(&self.crawler), url, termination).spawn())
    }

    /// Stream character search results.
    pub fn search_characters(&self, options: &CharacterOptions) -> Result<SearchStream<CharacterSearchResult>> {
        let listing = CharacterListing::new(Arc::clone(&self.search.character));
        self.search_listing(listing, options.to_url(self.config.locale)?)
    }

    /// Stream free company search results.
    pub fn search_free_companies(
        &self,
        options: &FreeCompanyOptions,
    ) -> Result<SearchStream<FreeCompanySearchResult>> {
        let listing = FreeCompanyListing::new(Arc::clone(&self.search.free_company))
            .with_grand_company_table(self.grand_companies.clone());
        self.search_listing(listing, options.to_url(self.config.locale)?)
    }

    /// Stream linkshell search results.
    pub fn search_linkshells(&self, options: &LinkshellOptions) -> Result<SearchStream<LinkshellSearchResult>> {
        let listing = LinkshellListing::new(Arc::clone(&self.search.linkshell));
        self.search_listing(listing, options.to_url(self.config.locale)?)
    }

    /// Stream cross-world linkshell search results.
    pub fn search_cwls(&self, options: &CwlsOptions) -> Result<SearchStream<CwlsSearchResult>> {
        let listing = CwlsListing::new(Arc::clone(&self.search.cwls));
        self.search_listing(listing, options.to_url(self.config.locale)?)
    }

    /// Stream PVP team search results.
    pub fn search_pvp_teams(&self, options: &PvpTeamOptions) -> Result<SearchStream<PvpTeamSearchResult>> {
        let listing = PvpTeamListing::new(Arc::clone(&self.search.pvp_team));
        self.search_listing(listing, options.to_url(self.config.locale)?)
    }

    fn search_listing<L: Listing>(&self, listing: L, url: Url) -> Result<SearchStream<L::Record>> {
        debug!(kind = L::KIND, url = %url, "Starting search");
        let termination = Termination::with_revisit(self.config.search_limits);
        let mut collector = Collector::new(listing, Arc::clone(&self.crawler), url, termination);
        let pages = collector.page_slot();
        Ok((collector.spawn(), pages))
    }
}
