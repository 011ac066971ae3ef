//! Configuration for the scraper and its crawl engine.

use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::{ConfigError, ConfigResult, CrawlError, CrawlResult};

/// Regional Lodestone site to scrape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Na,
    Eu,
    Fr,
    De,
    Jp,
}

impl Locale {
    /// Subdomain serving this locale.
    pub fn subdomain(&self) -> &'static str {
        match self {
            Locale::Na => "na",
            Locale::Eu => "eu",
            Locale::Fr => "fr",
            Locale::De => "de",
            Locale::Jp => "jp",
        }
    }

    /// Root of the Lodestone for this locale, with a trailing slash.
    pub fn base_url(&self) -> &'static str {
        match self {
            Locale::Na => "https://na.finalfantasyxiv.com/lodestone/",
            Locale::Eu => "https://eu.finalfantasyxiv.com/lodestone/",
            Locale::Fr => "https://fr.finalfantasyxiv.com/lodestone/",
            Locale::De => "https://de.finalfantasyxiv.com/lodestone/",
            Locale::Jp => "https://jp.finalfantasyxiv.com/lodestone/",
        }
    }

    /// Resolve a path below the Lodestone root.
    pub fn url(&self, path: &str) -> CrawlResult<Url> {
        let invalid = || CrawlError::InvalidUrl {
            url: format!("{}{}", self.base_url(), path),
        };
        Url::parse(self.base_url())
            .and_then(|base| base.join(path))
            .map_err(|_| invalid())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdomain())
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" => Ok(Locale::Na),
            "eu" => Ok(Locale::Eu),
            "fr" => Ok(Locale::Fr),
            "de" => Ok(Locale::De),
            "jp" | "ja" => Ok(Locale::Jp),
            other => Err(ConfigError::Env {
                key: "LODESTONE_LOCALE",
                reason: format!("unknown locale {other:?}"),
            }),
        }
    }
}

/// Request identity sent to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// User agent for desktop page layouts (every listing uses these)
    pub user_agent_desktop: String,

    /// User agent for mobile page layouts
    pub user_agent_mobile: String,
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            user_agent_desktop: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            user_agent_mobile: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) \
                                AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 \
                                Mobile/15E148 Safari/604.1"
                .to_string(),
        }
    }
}

/// Bounds on how far a listing traversal may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    /// Most entries the listing will ever show
    pub max_entries: u32,

    /// Entries per page
    pub per_page: u32,
}

impl PageLimits {
    pub const fn new(max_entries: u32, per_page: u32) -> Self {
        Self {
            max_entries,
            per_page,
        }
    }

    /// Achievement lists: 5000 entries, 50 per page.
    pub const ACHIEVEMENTS: PageLimits = PageLimits::new(5000, 50);

    /// Search listings cap out at 1000 results, 50 per page.
    pub const SEARCH: PageLimits = PageLimits::new(1000, 50);

    /// Hard ceiling on fetches: every full page plus one.
    pub fn max_pages(&self) -> usize {
        let per_page = self.per_page.max(1);
        self.max_entries.div_ceil(per_page) as usize + 1
    }
}

/// Scraper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Regional site to scrape.
    pub locale: Locale,

    /// Request identity.
    pub meta: Meta,

    /// Per-request timeout for the HTTP crawl engine.
    ///
    /// Default: 30 seconds.
    pub request_timeout: Duration,

    /// Page ceiling for achievement lists.
    pub achievement_limits: PageLimits,

    /// Page ceiling for search listings.
    pub search_limits: PageLimits,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            meta: Meta::default(),
            request_timeout: Duration::from_secs(30),
            achievement_limits: PageLimits::ACHIEVEMENTS,
            search_limits: PageLimits::SEARCH,
        }
    }
}

impl ScraperConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from the environment (and `.env` if present).
    ///
    /// Reads `LODESTONE_LOCALE`, `LODESTONE_USER_AGENT` and
    /// `LODESTONE_TIMEOUT_SECS`; unset variables keep their defaults.
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let mut config = Self::default();

        if let Ok(locale) = env::var("LODESTONE_LOCALE") {
            config.locale = locale.parse()?;
        }

        if let Ok(agent) = env::var("LODESTONE_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.meta.user_agent_desktop = agent;
            }
        }

        if let Ok(secs) = env::var("LODESTONE_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|e| ConfigError::Env {
                key: "LODESTONE_TIMEOUT_SECS",
                reason: format!("{e}"),
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set the locale.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the request identity.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the achievement page ceiling.
    pub fn with_achievement_limits(mut self, limits: PageLimits) -> Self {
        self.achievement_limits = limits;
        self
    }

    /// Set the search page ceiling.
    pub fn with_search_limits(mut self, limits: PageLimits) -> Self {
        self.search_limits = limits;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScraperConfig::default();
        assert_eq!(config.locale, Locale::Na);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.achievement_limits, PageLimits::ACHIEVEMENTS);
    }

    #[test]
    fn test_config_builder() {
        let config = ScraperConfig::new()
            .with_locale(Locale::De)
            .with_request_timeout(Duration::from_secs(5))
            .with_search_limits(PageLimits::new(100, 20));

        assert_eq!(config.locale, Locale::De);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.search_limits.max_pages(), 6);
    }

    #[test]
    fn test_max_pages_rounds_up_plus_one() {
        assert_eq!(PageLimits::ACHIEVEMENTS.max_pages(), 101);
        assert_eq!(PageLimits::SEARCH.max_pages(), 21);
        assert_eq!(PageLimits::new(60, 50).max_pages(), 3);
        assert_eq!(PageLimits::new(0, 50).max_pages(), 1);
    }

    #[test]
    fn test_locale_hosts() {
        assert_eq!(
            Locale::Jp.url("character/1/achievement/").unwrap().as_str(),
            "https://jp.finalfantasyxiv.com/lodestone/character/1/achievement/"
        );
        assert_eq!("EU".parse::<Locale>().unwrap(), Locale::Eu);
        assert!("xx".parse::<Locale>().is_err());
    }
}
