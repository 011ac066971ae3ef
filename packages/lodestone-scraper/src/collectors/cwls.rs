//! Cross-world linkshell search listing.

use scraper::{ElementRef, Html};
use std::sync::Arc;

use super::{Listing, ListingPage, SearchFrame};
use crate::selectors::{CwlsSearchSelectors, FieldValues};
use crate::types::page::PageInfo;
use crate::types::records::CwlsSearchResult;

/// Reads one page of cross-world linkshell search results.
#[derive(Debug, Clone)]
pub struct CwlsListing {
    selectors: Arc<CwlsSearchSelectors>,
}

impl CwlsListing {
    pub fn new(selectors: Arc<CwlsSearchSelectors>) -> Self {
        Self { selectors }
    }

    fn entry(&self, e: ElementRef<'_>, page: &Arc<PageInfo>) -> CwlsSearchResult {
        let s = &self.selectors.entry;
        CwlsSearchResult {
            id: s.id.parse_through_children(e).text(0),
            name: s.name.parse_through_children(e).text(0),
            dc: s.dc.parse_through_children(e).text(0),
            active_members: s.active_members.parse_through_children(e).number(0),
            page: Arc::clone(page),
        }
    }
}

impl Listing for CwlsListing {
    type Record = CwlsSearchResult;

    const KIND: &'static str = "cwls_search";

    fn extract(&self, document: &Html) -> ListingPage<CwlsSearchResult> {
        let s = &self.selectors;
        SearchFrame {
            container: &s.entries_container,
            entry_root: &s.entry.root,
            next: &s.list_next_button,
            page_info: &s.page_info,
        }
        .extract(document, |e, page| self.entry(e, page))
    }
}
