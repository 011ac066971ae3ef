//! PVP team search listing.

use scraper::{ElementRef, Html};
use std::sync::Arc;

use super::{Listing, ListingPage, SearchFrame};
use crate::selectors::{FieldValues, PvpTeamSearchSelectors};
use crate::types::page::PageInfo;
use crate::types::records::{CrestLayers, PvpTeamSearchResult};

/// Reads one page of PVP team search results.
#[derive(Debug, Clone)]
pub struct PvpTeamListing {
    selectors: Arc<PvpTeamSearchSelectors>,
}

impl PvpTeamListing {
    pub fn new(selectors: Arc<PvpTeamSearchSelectors>) -> Self {
        Self { selectors }
    }

    fn entry(&self, e: ElementRef<'_>, page: &Arc<PageInfo>) -> PvpTeamSearchResult {
        let s = &self.selectors.entry;
        PvpTeamSearchResult {
            id: s.id.parse_through_children(e).text(0),
            name: s.name.parse_through_children(e).text(0),
            dc: s.dc.parse_through_children(e).text(0),
            crest_layers: CrestLayers {
                bottom: s.crest_layers.bottom.parse_through_children(e).text(0),
                middle: s.crest_layers.middle.parse_through_children(e).text(0),
                top: s.crest_layers.top.parse_through_children(e).text(0),
            },
            page: Arc::clone(page),
        }
    }
}

impl Listing for PvpTeamListing {
    type Record = PvpTeamSearchResult;

    const KIND: &'static str = "pvp_team_search";

    fn extract(&self, document: &Html) -> ListingPage<PvpTeamSearchResult> {
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
    fn test_extracts_pvp_teams() {
        let listing = PvpTeamListing::new(SearchSelectors::load().unwrap().pvp_team);
        let html = fixtures::pvp_team_page(&[("c0ffee", "Wolves")], None, Some(crate::collectors::SENTINEL));
        let page = listing.extract(&Html::parse_document(&html));

        let team = &page.entries[0];
        assert_eq!(team.id, "c0ffee");
        assert_eq!(team.name, "Wolves");
        assert_eq!(team.dc, "Aether");
        assert_eq!(team.crest_layers.middle, "https://img.example.com/crest/middle.png");
        assert_eq!(*team.page, PageInfo::default());
    }
}
