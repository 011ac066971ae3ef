//! Linkshell search listing.

use scraper::{ElementRef, Html};
use std::sync::Arc;

use super::{Listing, ListingPage, SearchFrame};
use crate::selectors::{FieldValues, LinkshellSearchSelectors};
use crate::types::page::PageInfo;
use crate::types::records::LinkshellSearchResult;

/// Reads one page of linkshell search results.
#[derive(Debug, Clone)]
pub struct LinkshellListing {
    selectors: Arc<LinkshellSearchSelectors>,
}

impl LinkshellListing {
    pub fn new(selectors: Arc<LinkshellSearchSelectors>) -> Self {
        Self { selectors }
    }

    fn entry(&self, e: ElementRef<'_>, page: &Arc<PageInfo>) -> LinkshellSearchResult {
        let s = &self.selectors.entry;
        let server = s.server.parse_through_children(e);

        LinkshellSearchResult {
            id: s.id.parse_through_children(e).text(0),
            name: s.name.parse_through_children(e).text(0),
            world: server.text(0),
            dc: server.text(1),
            active_members: s.active_members.parse_through_children(e).number(0),
            page: Arc::clone(page),
        }
    }
}

impl Listing for LinkshellListing {
    type Record = LinkshellSearchResult;

    const KIND: &'static str = "linkshell_search";

    fn extract(&self, document: &Html) -> ListingPage<LinkshellSearchResult> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::SearchSelectors;
    use crate::testing::fixtures;

    #[test]
    fn test_extracts_linkshells() {
        let listing = LinkshellListing::new(SearchSelectors::load().unwrap().linkshell);
        let html = fixtures::linkshell_page(&[("abc123", "Night Owls", 12)], Some((1, 1)), None);
        let page = listing.extract(&Html::parse_document(&html));

        let ls = &page.entries[0];
        assert_eq!(ls.id, "abc123");
        assert_eq!(ls.name, "Night Owls");
        assert_eq!(ls.world, "Gilgamesh");
        assert_eq!(ls.dc, "Aether");
        assert_eq!(ls.active_members, 12);
        assert!(ls.page.is_last());
        assert!(page.next.is_none());
    }
}
