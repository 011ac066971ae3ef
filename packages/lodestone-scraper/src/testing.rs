//! Testing utilities: a canned crawl engine and listing page fixtures.
//!
//! Useful for testing code built on the scraper without network calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use url::Url;

use crate::error::{CrawlError, CrawlResult};
use crate::traits::crawler::Crawler;
use crate::types::page::CrawledPage;

/// A mock crawl engine serving canned pages by URL.
///
/// Clones share their pages and call history.
#[derive(Debug, Clone, Default)]
pub struct MockCrawler {
    /// Predefined pages by URL
    pages: Arc<RwLock<HashMap<String, CrawledPage>>>,

    /// URLs that should fail
    fail_urls: Arc<RwLock<Vec<String>>>,

    /// Call tracking
    calls: Arc<RwLock<Vec<MockCrawlerCall>>>,
}

/// Record of a call made to the mock crawler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCrawlerCall {
    Fetch { url: String },
}

impl MockCrawler {
    /// Create a new mock crawler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predefined page, served for its own URL.
    pub fn with_page(self, page: CrawledPage) -> Self {
        self.pages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page.url.to_string(), page);
        self
    }

    /// Serve `html` for `url`.
    pub fn with_html(self, url: &Url, html: impl Into<String>) -> Self {
        self.with_page(CrawledPage::new(url.clone(), html))
    }

    /// Mark a URL as failing.
    pub fn fail_url(self, url: &Url) -> Self {
        self.fail_urls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_string());
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<MockCrawlerCall> {
        self.calls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// URLs fetched so far, in order.
    pub fn fetched_urls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| match call {
                MockCrawlerCall::Fetch { url } => url,
            })
            .collect()
    }

    /// Number of fetches so far.
    pub fn fetch_count(&self) -> usize {
        self.calls.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl Crawler for MockCrawler {
    async fn fetch(&self, url: &Url) -> CrawlResult<CrawledPage> {
        let key = url.to_string();
        self.calls
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MockCrawlerCall::Fetch { url: key.clone() });

        // Check if should fail
        if self
            .fail_urls
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&key)
        {
            return Err(CrawlError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "Mock connection refused",
            ))));
        }

        // Return predefined page or error
        self.pages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
            .ok_or(CrawlError::InvalidUrl { url: key })
    }
}

/// HTML fixtures shaped like the live listing pages.
pub mod fixtures {
    use std::fmt::Write;

    /// Achievement list page. `entries` are `(id, unix_seconds)`; `None`
    /// renders a malformed timestamp.
    pub fn achievement_page(entries: &[(u32, Option<i64>)], next: Option<&str>) -> String {
        let mut items = String::new();
        for (id, time) in entries {
            let time = time.map(|t| t.to_string()).unwrap_or_else(|| "NaN".to_string());
            let _ = write!(
                items,
                r#"<li class="entry">
                    <a class="entry__achievement" href="/lodestone/character/1/achievement/detail/{id}/">
                        <p class="entry__activity__txt">Achievement {id}</p>
                    </a>
                    <div class="entry__activity">
                        <time class="entry__activity__time"><script>document.write(ldst_strftime({time}, 'YMD'));</script></time>
                    </div>
                </li>"#
            );
        }

        format!(
            r#"<html><body><div class="ldst__achievement">
                <p class="parts__total">1,234 Achievements Unlocked</p>
                <p class="achievement__point">12,345</p>
                <ul>{items}</ul>
                {pager}
            </div></body></html>"#,
            pager = pager(None, next)
        )
    }

    /// A free company entry with sensible defaults.
    #[derive(Debug, Clone)]
    pub struct FreeCompanyFixture {
        id: String,
        name: String,
        grand_company: String,
        formed: i64,
        members: u32,
    }

    impl FreeCompanyFixture {
        pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
            Self {
                id: id.into(),
                name: name.into(),
                grand_company: "Maelstrom".to_string(),
                formed: 1371163811,
                members: 10,
            }
        }

        pub fn grand_company(mut self, name: impl Into<String>) -> Self {
            self.grand_company = name.into();
            self
        }

        pub fn formed(mut self, unix_seconds: i64) -> Self {
            self.formed = unix_seconds;
            self
        }

        pub fn members(mut self, members: u32) -> Self {
            self.members = members;
            self
        }

        fn render(&self) -> String {
            let Self {
                id,
                name,
                grand_company,
                formed,
                members,
            } = self;
            format!(
                r#"<div class="entry">
                    <a class="entry__block" href="/lodestone/freecompany/{id}/">
                        <div class="entry__freecompany__inner">
                            <div class="entry__freecompany__crest">
                                <div class="entry__freecompany__crest__image"><img src="https://img.example.com/crest/bottom.png"><img src="https://img.example.com/crest/middle.png"><img src="https://img.example.com/crest/top.png"></div>
                            </div>
                            <div class="entry__freecompany__box">
                                <p class="entry__world">{grand_company}</p>
                                <p class="entry__name">{name}</p>
                                <p class="entry__world">Gilgamesh [Aether]</p>
                            </div>
                        </div>
                        <ul class="entry__freecompany__fc-data">
                            <li class="entry__freecompany__fc-member">{members}</li>
                            <li class="entry__freecompany__fc-housing">Lavender Beds, Ward 1, Plot 1</li>
                            <li class="entry__freecompany__fc-day"><span id="datetime-{id}">-</span><script>document.getElementById('datetime-{id}').innerHTML = ldst_strftime({formed}, 'YMD');</script></li>
                        </ul>
                        <ul class="entry__freecompany__fc-active-list">
                            <li><p class="entry__freecompany__fc-active">Active: Always</p></li>
                            <li><p class="entry__freecompany__fc-active">Recruitment: Open</p></li>
                        </ul>
                    </a>
                </div>"#
            )
        }
    }

    /// Free company search page.
    pub fn free_company_page(
        entries: &[FreeCompanyFixture],
        page: Option<(u32, u32)>,
        next: Option<&str>,
    ) -> String {
        let rendered: String = entries.iter().map(FreeCompanyFixture::render).collect();
        search_page(&rendered, page, next)
    }

    /// Character search page. `entries` are `(id, name)`.
    pub fn character_page(entries: &[(u32, &str)], page: Option<(u32, u32)>, next: Option<&str>) -> String {
        let mut rendered = String::new();
        for (id, name) in entries {
            let _ = write!(
                rendered,
                r#"<div class="entry">
                    <a class="entry__link" href="/lodestone/character/{id}/">
                        <div class="entry__chara__face"><img src="https://img.example.com/face/{id}.jpg" alt=""></div>
                        <div class="entry__box entry__box--world">
                            <p class="entry__name">{name}</p>
                            <p class="entry__world">Gilgamesh [Aether]</p>
                            <ul class="entry__chara_info">
                                <li><img src="https://img.example.com/rank/member.png"><span>Member</span></li>
                            </ul>
                            <div class="entry__chara__lang">EN</div>
                        </div>
                    </a>
                </div>"#
            );
        }
        search_page(&rendered, page, next)
    }

    /// Linkshell search page. `entries` are `(id, name, active_members)`.
    pub fn linkshell_page(entries: &[(&str, &str, u32)], page: Option<(u32, u32)>, next: Option<&str>) -> String {
        linkshell_like("linkshell", "Gilgamesh [Aether]", entries, page, next)
    }

    /// Cross-world linkshell search page. `entries` are `(id, name, active_members)`.
    pub fn cwls_page(entries: &[(&str, &str, u32)], page: Option<(u32, u32)>, next: Option<&str>) -> String {
        linkshell_like("crossworld_linkshell", "Aether", entries, page, next)
    }

    fn linkshell_like(
        path: &str,
        world: &str,
        entries: &[(&str, &str, u32)],
        page: Option<(u32, u32)>,
        next: Option<&str>,
    ) -> String {
        let mut rendered = String::new();
        for (id, name, members) in entries {
            let _ = write!(
                rendered,
                r#"<div class="entry">
                    <a class="entry__link--line" href="/lodestone/{path}/{id}/">
                        <div class="entry__linkshell__inner">
                            <p class="entry__name">{name}</p>
                            <p class="entry__world">{world}</p>
                        </div>
                        <div class="entry__linkshell__member"><div><i class="icon-list__ic__member"></i><span>{members}</span></div></div>
                    </a>
                </div>"#
            );
        }
        search_page(&rendered, page, next)
    }

    /// PVP team search page. `entries` are `(id, name)`.
    pub fn pvp_team_page(entries: &[(&str, &str)], page: Option<(u32, u32)>, next: Option<&str>) -> String {
        let mut rendered = String::new();
        for (id, name) in entries {
            let _ = write!(
                rendered,
                r#"<div class="entry">
                    <a class="entry__block" href="/lodestone/pvpteam/{id}/">
                        <div class="entry__pvpteam__crest">
                            <div class="entry__pvpteam__crest__image"><img src="https://img.example.com/crest/bottom.png"><img src="https://img.example.com/crest/middle.png"><img src="https://img.example.com/crest/top.png"></div>
                        </div>
                        <div class="entry__freecompany__box">
                            <p class="entry__name">{name}</p>
                            <p class="entry__world">Aether</p>
                        </div>
                    </a>
                </div>"#
            );
        }
        search_page(&rendered, page, next)
    }

    fn search_page(entries: &str, page: Option<(u32, u32)>, next: Option<&str>) -> String {
        format!(
            r#"<html><body><div class="ldst__main"><div class="ldst__window">
                <h2 class="heading--lead">Search Results</h2>
                {entries}
                {pager}
            </div></div></body></html>"#,
            pager = pager(page, next)
        )
    }

    fn pager(page: Option<(u32, u32)>, next: Option<&str>) -> String {
        let current = page
            .map(|(current, total)| format!(r#"<li class="btn__pager__current">Page {current} of {total}</li>"#))
            .unwrap_or_default();
        let next = next
            .map(|href| format!(r#"<li><a class="btn__pager__next" href="{href}">Next</a></li>"#))
            .unwrap_or_default();
        format!(r#"<ul class="btn__pager">{current}{next}</ul>"#)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_crawler_serves_pages_and_records_calls() {
        let url = Url::parse("https://na.example.com/lodestone/character/1/achievement/").unwrap();
        let crawler = MockCrawler::new().with_html(&url, "<p>hello</p>");

        let page = crawler.fetch(&url).await.unwrap();
        assert_eq!(page.html, "<p>hello</p>");
        assert_eq!(crawler.fetch_count(), 1);
        assert_eq!(crawler.fetched_urls(), vec![url.to_string()]);
    }

    #[tokio::test]
    async fn test_mock_crawler_failures() {
        let url = Url::parse("https://na.example.com/down").unwrap();
        let crawler = MockCrawler::new().fail_url(&url);
        assert!(matches!(crawler.fetch(&url).await, Err(CrawlError::Http(_))));

        let unknown = Url::parse("https://na.example.com/unknown").unwrap();
        assert!(matches!(
            crawler.fetch(&unknown).await,
            Err(CrawlError::InvalidUrl { .. })
        ));
        assert_eq!(crawler.fetch_count(), 2);
    }
}
