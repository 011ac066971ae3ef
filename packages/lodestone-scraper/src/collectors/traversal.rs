//! Next-page decisions for a listing traversal.
//!
//! A traversal walks a paginated listing one page at a time. After each page
//! it looks at the next-page locator the page rendered and decides whether to
//! fetch another page or stop:
//!
//! - the sentinel locator (`javascript:void(0);`) ends the traversal;
//! - an absent or empty locator re-fetches the same URL once, if the listing
//!   allows it, and otherwise ends the traversal;
//! - anything else is resolved against the page URL and fetched.
//!
//! Every traversal is bounded by a page ceiling derived from the listing's
//! maximum size.

use serde::Serialize;
use std::fmt;
use tracing::debug;
use url::Url;

use crate::error::{CrawlError, ScrapeError};
use crate::types::config::PageLimits;

/// Locator the listing renders on its last page.
pub const SENTINEL: &str = "javascript:void(0);";

/// How a listing signals its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// Re-fetch the same URL once when the locator is missing
    pub revisit_on_empty: bool,

    /// Hard ceiling on fetches
    pub max_pages: usize,
}

impl Termination {
    /// Stop only on the sentinel (or a missing locator).
    pub fn sentinel_only(limits: PageLimits) -> Self {
        Self {
            revisit_on_empty: false,
            max_pages: limits.max_pages(),
        }
    }

    /// Stop on the sentinel; a missing locator earns one revisit first.
    pub fn with_revisit(limits: PageLimits) -> Self {
        Self {
            revisit_on_empty: true,
            max_pages: limits.max_pages(),
        }
    }

    /// Override the page ceiling.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Where a traversal is in its page cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    Idle,
    FetchingPage,
    ExtractingEntries,
    DecidingNext,
    Done,
}

impl fmt::Display for TraversalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalState::Idle => "idle",
            TraversalState::FetchingPage => "fetching_page",
            TraversalState::ExtractingEntries => "extracting_entries",
            TraversalState::DecidingNext => "deciding_next",
            TraversalState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of a next-page decision.
#[derive(Debug)]
pub enum NextStep {
    /// Fetch this URL next
    Fetch(Url),
    /// The listing is exhausted
    Done,
    /// Stop with this terminal error
    Fail(ScrapeError),
}

/// Counters reported when a traversal ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TraversalSummary {
    pub pages_fetched: usize,
    pub entries: usize,
    pub revisited: bool,
}

/// State machine for one traversal.
#[derive(Debug)]
pub struct Traversal {
    kind: &'static str,
    termination: Termination,
    state: TraversalState,
    pages_fetched: usize,
    revisited: bool,
}

impl Traversal {
    pub fn new(kind: &'static str, termination: Termination) -> Self {
        Self {
            kind,
            termination,
            state: TraversalState::Idle,
            pages_fetched: 0,
            revisited: false,
        }
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn revisited(&self) -> bool {
        self.revisited
    }

    /// Move to `next`, logging the transition.
    pub fn advance(&mut self, next: TraversalState) {
        debug!(
            kind = self.kind,
            from = %self.state,
            to = %next,
            page = self.pages_fetched,
            "Traversal transition"
        );
        self.state = next;
    }

    /// Count a completed fetch.
    pub fn record_fetch(&mut self) {
        self.pages_fetched += 1;
    }

    /// Decide what follows the page fetched from `requested`, which the
    /// crawl engine finally served from `served`.
    ///
    /// Relative locators resolve against `served`; a revisit re-requests
    /// `requested`.
    pub fn decide(&mut self, requested: &Url, served: &Url, locator: Option<&str>) -> NextStep {
        let locator = locator.map(str::trim).unwrap_or_default();

        if locator == SENTINEL {
            return NextStep::Done;
        }

        let next = if locator.is_empty() {
            if !self.termination.revisit_on_empty || self.revisited {
                return NextStep::Done;
            }
            debug!(kind = self.kind, url = %requested, "No next-page locator, revisiting once");
            self.revisited = true;
            requested.clone()
        } else {
            match served.join(locator) {
                Ok(url) => url,
                Err(e) => {
                    return NextStep::Fail(ScrapeError::InvalidLocator {
                        locator: locator.to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        };

        if self.pages_fetched >= self.termination.max_pages {
            return NextStep::Fail(
                CrawlError::MaxPagesReached {
                    count: self.pages_fetched,
                }
                .into(),
            );
        }

        NextStep::Fetch(next)
    }

    pub fn summary(&self, entries: usize) -> TraversalSummary {
        TraversalSummary {
            pages_fetched: self.pages_fetched,
            entries,
            revisited: self.revisited,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn search() -> Traversal {
        let mut t = Traversal::new("test", Termination::with_revisit(PageLimits::SEARCH));
        t.record_fetch();
        t
    }

    #[test]
    fn test_sentinel_is_done() {
        let page = url("https://na.example.com/lodestone/linkshell/?q=a");
        let mut t = search();
        assert!(matches!(t.decide(&page, &page, Some(SENTINEL)), NextStep::Done));
        assert!(matches!(
            t.decide(&page, &page, Some("  javascript:void(0);  ")),
            NextStep::Done
        ));
    }

    #[test]
    fn test_relative_locator_resolves_against_served_url() {
        let requested = url("http://na.example.com/lodestone/character/1/achievement/");
        let served = url("https://na.example.com/lodestone/character/1/achievement/");
        let mut t = search();
        match t.decide(&requested, &served, Some("?page=2")) {
            NextStep::Fetch(next) => assert_eq!(
                next.as_str(),
                "https://na.example.com/lodestone/character/1/achievement/?page=2"
            ),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_locator_revisits_once() {
        let page = url("https://na.example.com/lodestone/freecompany/?q=a");
        let mut t = search();

        match t.decide(&page, &page, None) {
            NextStep::Fetch(next) => assert_eq!(next, page),
            other => panic!("expected revisit, got {other:?}"),
        }
        assert!(t.revisited());

        t.record_fetch();
        assert!(matches!(t.decide(&page, &page, Some("")), NextStep::Done));
    }

    #[test]
    fn test_sentinel_only_ends_on_missing_locator() {
        let page = url("https://na.example.com/lodestone/character/1/achievement/");
        let mut t = Traversal::new("test", Termination::sentinel_only(PageLimits::ACHIEVEMENTS));
        t.record_fetch();
        assert!(matches!(t.decide(&page, &page, None), NextStep::Done));
        assert!(!t.revisited());
    }

    #[test]
    fn test_ceiling_fails_instead_of_fetching() {
        let page = url("https://na.example.com/lodestone/pvpteam/");
        let mut t = Traversal::new(
            "test",
            Termination::sentinel_only(PageLimits::ACHIEVEMENTS).with_max_pages(2),
        );
        t.record_fetch();
        assert!(matches!(t.decide(&page, &page, Some("?page=2")), NextStep::Fetch(_)));
        t.record_fetch();
        match t.decide(&page, &page, Some("?page=3")) {
            NextStep::Fail(ScrapeError::Crawl(CrawlError::MaxPagesReached { count })) => {
                assert_eq!(count, 2)
            }
            other => panic!("expected ceiling, got {other:?}"),
        }
        // The sentinel still ends cleanly at the ceiling
        assert!(matches!(t.decide(&page, &page, Some(SENTINEL)), NextStep::Done));
    }

    #[test]
    fn test_unresolvable_locator_fails() {
        let page = url("https://na.example.com/lodestone/");
        let mut t = search();
        assert!(matches!(
            t.decide(&page, &page, Some("http://[::1")),
            NextStep::Fail(ScrapeError::InvalidLocator { .. })
        ));
    }
}
