//! Data types shared by the collectors, the crawl engine and the facade.

pub mod config;
pub mod page;
pub mod records;
pub mod search;

pub use config::{Locale, Meta, PageLimits, ScraperConfig};
pub use page::{CrawledPage, PageInfo};
pub use records::{
    AchievementInfo, AchievementTotals, CharacterSearchResult, CrestLayers, CwlsSearchResult,
    FreeCompanySearchResult, LinkshellSearchResult, PvpTeamSearchResult,
};
pub use search::{
    CharacterOptions, CwlsOptions, FreeCompanyOptions, GrandCompanyFilter, LinkshellOptions,
    MemberCount, PvpTeamOptions, SearchOrder, SearchQuery,
};
