//! Character search listing.

use scraper::{ElementRef, Html};
use std::sync::Arc;

use super::{Listing, ListingPage, SearchFrame};
use crate::selectors::{CharacterSearchSelectors, FieldValues};
use crate::types::page::PageInfo;
use crate::types::records::CharacterSearchResult;

/// Reads one page of character search results.
#[derive(Debug, Clone)]
pub struct CharacterListing {
    selectors: Arc<CharacterSearchSelectors>,
}

impl CharacterListing {
    pub fn new(selectors: Arc<CharacterSearchSelectors>) -> Self {
        Self { selectors }
    }

    fn entry(&self, e: ElementRef<'_>, page: &Arc<PageInfo>) -> CharacterSearchResult {
        let s = &self.selectors.entry;
        let server = s.server.parse_through_children(e);

        CharacterSearchResult {
            id: s.id.parse_through_children(e).number(0),
            name: s.name.parse_through_children(e).text(0),
            avatar: s.avatar.parse_through_children(e).text(0),
            lang: s.lang.parse_through_children(e).text(0),
            rank: s.rank.parse_through_children(e).text(0),
            rank_icon: s.rank_icon.parse_through_children(e).text(0),
            world: server.text(0),
            dc: server.text(1),
            page: Arc::clone(page),
        }
    }
}

impl Listing for CharacterListing {
    type Record = CharacterSearchResult;

    const KIND: &'static str = "character_search";

    fn extract(&self, document: &Html) -> ListingPage<CharacterSearchResult> {
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

    fn listing() -> CharacterListing {
        CharacterListing::new(SearchSelectors::load().unwrap().character)
    }

    #[test]
    fn test_extracts_characters_in_order() {
        let html = fixtures::character_page(&[(8, "Alpha Beta"), (9, "Gamma Delta")], Some((2, 5)), Some("?page=3"));
        let page = listing().extract(&Html::parse_document(&html));

        assert_eq!(page.entries.len(), 2);
        let first = &page.entries[0];
        assert_eq!(first.id, 8);
        assert_eq!(first.name, "Alpha Beta");
        assert_eq!(first.world, "Gilgamesh");
        assert_eq!(first.dc, "Aether");
        assert_eq!(first.lang, "EN");
        assert_eq!(first.rank, "Member");
        assert_eq!(first.avatar, "https://img.example.com/face/8.jpg");
        assert_eq!(first.rank_icon, "https://img.example.com/rank/member.png");
        assert_eq!(page.entries[1].id, 9);
        assert_eq!(first.page.current_page, 2);
        assert!(Arc::ptr_eq(&first.page, &page.entries[1].page));
    }

    #[test]
    fn test_missing_container_yields_empty_page() {
        let page = listing().extract(&Html::parse_document("<html><body><p>maintenance</p></body></html>"));
        assert!(page.entries.is_empty());
        assert!(page.next.is_none());
        assert!(page.page_info.is_none());
    }
}
