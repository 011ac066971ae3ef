//! Listing collectors.
//!
//! A [`Collector`] walks one paginated listing and pushes every entry it
//! finds into an unbounded channel, in page order then document order. The
//! per-kind logic lives behind the [`Listing`] trait: given a parsed page it
//! returns the page context, the next-page locator and the entries, in that
//! order. Everything else (fetching, termination, the page ceiling, failure
//! reporting) is shared.
//!
//! ```text
//! fetch(url) -> parse -> context -> locator -> entries -> push -> decide
//!      ^                                                              |
//!      +------------------------- next url ---------------------------+
//! ```

pub mod achievement;
pub mod character;
pub mod cwls;
pub mod free_company;
pub mod linkshell;
pub mod pvp_team;
pub mod traversal;

use futures::Stream;
use scraper::{ElementRef, Html};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::Result;
use crate::selectors::SelectorInfo;
use crate::traits::crawler::Crawler;
use crate::types::page::PageInfo;

pub use achievement::AchievementListing;
pub use character::CharacterListing;
pub use cwls::CwlsListing;
pub use free_company::FreeCompanyListing;
pub use linkshell::LinkshellListing;
pub use pvp_team::PvpTeamListing;
pub use traversal::{NextStep, Termination, Traversal, TraversalState, TraversalSummary, SENTINEL};

/// What one parsed page yielded.
#[derive(Debug)]
pub struct ListingPage<T> {
    /// Page counter, for listings that render one
    pub page_info: Option<PageInfo>,

    /// Raw next-page locator; `None` when the page rendered none
    pub next: Option<String>,

    /// Entries in document order
    pub entries: Vec<T>,
}

/// One kind of paginated listing.
pub trait Listing: Send + Sync + 'static {
    /// Record emitted per entry.
    type Record: Send + 'static;

    /// Short name for logs.
    const KIND: &'static str;

    /// Extract everything from one parsed page.
    ///
    /// Must build the page context before the entries so every record can
    /// share it.
    fn extract(&self, document: &Html) -> ListingPage<Self::Record>;
}

/// Drives a [`Listing`] across its pages.
pub struct Collector<L: Listing> {
    listing: L,
    crawler: Arc<dyn Crawler>,
    start: Url,
    termination: Termination,
    page_slot: Option<watch::Sender<PageInfo>>,
}

impl<L: Listing> Collector<L> {
    pub fn new(listing: L, crawler: Arc<dyn Crawler>, start: Url, termination: Termination) -> Self {
        Self {
            listing,
            crawler,
            start,
            termination,
            page_slot: None,
        }
    }

    /// Publish each page's counter to `slot`.
    pub fn with_page_slot(mut self, slot: watch::Sender<PageInfo>) -> Self {
        self.page_slot = Some(slot);
        self
    }

    /// Publish each page's counter to a fresh slot and return its receiver.
    pub fn page_slot(&mut self) -> watch::Receiver<PageInfo> {
        let (tx, rx) = watch::channel(PageInfo::default());
        self.page_slot = Some(tx);
        rx
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Run the traversal to completion, pushing records into `output`.
    ///
    /// A transport failure, an unresolvable locator or the page ceiling
    /// pushes a single `Err` and ends the run. A closed `output` ends the run
    /// quietly.
    pub async fn run(self, output: mpsc::UnboundedSender<Result<L::Record>>) -> TraversalSummary {
        let mut traversal = Traversal::new(L::KIND, self.termination);
        let mut url = self.start.clone();
        let mut entries = 0usize;

        loop {
            traversal.advance(TraversalState::FetchingPage);
            let page = match self.crawler.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(kind = L::KIND, url = %url, error = %e, "Listing fetch failed");
                    let _ = output.send(Err(e.into()));
                    break;
                }
            };
            traversal.record_fetch();

            traversal.advance(TraversalState::ExtractingEntries);
            let extracted = {
                let document = Html::parse_document(&page.html);
                self.listing.extract(&document)
            };

            if let (Some(slot), Some(info)) = (&self.page_slot, extracted.page_info) {
                slot.send_replace(info);
            }

            let count = extracted.entries.len();
            for record in extracted.entries {
                if output.send(Ok(record)).is_err() {
                    debug!(kind = L::KIND, "Record receiver dropped, stopping");
                    traversal.advance(TraversalState::Done);
                    return traversal.summary(entries);
                }
                entries += 1;
            }
            debug!(
                kind = L::KIND,
                url = %page.url,
                page = traversal.pages_fetched(),
                entries = count,
                "Listing page extracted"
            );

            traversal.advance(TraversalState::DecidingNext);
            match traversal.decide(&url, &page.url, extracted.next.as_deref()) {
                NextStep::Fetch(next) => url = next,
                NextStep::Done => break,
                NextStep::Fail(e) => {
                    warn!(kind = L::KIND, url = %page.url, error = %e, "Listing traversal aborted");
                    let _ = output.send(Err(e));
                    break;
                }
            }
        }

        traversal.advance(TraversalState::Done);
        info!(
            kind = L::KIND,
            pages = traversal.pages_fetched(),
            entries,
            "Listing traversal complete"
        );
        traversal.summary(entries)
    }

    /// Run the traversal on its own task.
    pub fn spawn(self) -> RecordStream<L::Record> {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(self.run(tx));
        RecordStream {
            receiver: rx,
            handle,
        }
    }
}

/// Records of one traversal, in order.
///
/// Ends when the traversal ends. An `Err` item is always the last item.
/// Dropping the stream stops the traversal at its next push.
pub struct RecordStream<T> {
    receiver: mpsc::UnboundedReceiver<Result<T>>,
    handle: JoinHandle<TraversalSummary>,
}

impl<T> RecordStream<T> {
    /// Receive the next record.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        self.receiver.recv().await
    }

    /// Drain the rest of the stream.
    pub async fn collect_all(mut self) -> Vec<Result<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.receiver.recv().await {
            items.push(item);
        }
        items
    }

    /// Wait for the traversal to finish and report its counters.
    pub async fn summary(self) -> std::result::Result<TraversalSummary, JoinError> {
        drop(self.receiver);
        self.handle.await
    }
}

impl<T> Stream for RecordStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().receiver.poll_recv(cx)
    }
}

/// Page chrome shared by the search listings.
pub(crate) struct SearchFrame<'s> {
    pub container: &'s SelectorInfo,
    pub entry_root: &'s SelectorInfo,
    pub next: &'s SelectorInfo,
    pub page_info: &'s SelectorInfo,
}

impl SearchFrame<'_> {
    /// Read the first entries container: page counter, then locator, then
    /// every entry root inside it.
    pub(crate) fn extract<T>(
        &self,
        document: &Html,
        mut build: impl FnMut(ElementRef<'_>, &Arc<PageInfo>) -> T,
    ) -> ListingPage<T> {
        let Some(container) = self.container.select(document).next() else {
            return ListingPage {
                page_info: None,
                next: None,
                entries: Vec::new(),
            };
        };

        let page_info = PageInfo::from_values(&self.page_info.parse_through_children(container));
        let shared = Arc::new(page_info);

        let next = self
            .next
            .parse_through_children(container)
            .into_iter()
            .next();

        let entries = container
            .select(self.entry_root.selector())
            .map(|entry| build(entry, &shared))
            .collect();

        ListingPage {
            page_info: Some(page_info),
            next,
            entries,
        }
    }
}
