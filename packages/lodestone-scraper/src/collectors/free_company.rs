//! Free company search listing.

use scraper::{ElementRef, Html};
use std::sync::Arc;

use super::{Listing, ListingPage, SearchFrame};
use crate::selectors::{FieldValues, FreeCompanySearchSelectors};
use crate::tables::{LookupTable, NamedEntity};
use crate::types::page::PageInfo;
use crate::types::records::{CrestLayers, FreeCompanySearchResult};

/// Reads one page of free company search results.
///
/// The grand company name on each entry is resolved through the lookup
/// table when one is attached. A name the table does not know resolves to
/// the zero entity, which still carries the in-page name.
#[derive(Debug, Clone)]
pub struct FreeCompanyListing {
    selectors: Arc<FreeCompanySearchSelectors>,
    grand_companies: Option<LookupTable>,
}

impl FreeCompanyListing {
    pub fn new(selectors: Arc<FreeCompanySearchSelectors>) -> Self {
        Self {
            selectors,
            grand_companies: None,
        }
    }

    /// Resolve grand company names through `table`.
    pub fn with_grand_company_table(mut self, table: LookupTable) -> Self {
        self.grand_companies = Some(table);
        self
    }

    fn grand_company(&self, name: String) -> NamedEntity {
        match &self.grand_companies {
            Some(table) => {
                let resolved = table.lookup(&name);
                NamedEntity { name, ..resolved }
            }
            None => NamedEntity::unresolved(name),
        }
    }

    fn entry(&self, e: ElementRef<'_>, page: &Arc<PageInfo>) -> FreeCompanySearchResult {
        let s = &self.selectors.entry;
        let server = s.server.parse_through_children(e);

        FreeCompanySearchResult {
            id: s.id.parse_through_children(e).text(0),
            name: s.name.parse_through_children(e).text(0),
            active: s.active.parse_through_children(e).text(0),
            recruitment: s.recruitment_open.parse_through_children(e).text(0),
            estate: s.estate_built.parse_through_children(e).text(0),
            crest_layers: CrestLayers {
                bottom: s.crest_layers.bottom.parse_through_children(e).text(0),
                middle: s.crest_layers.middle.parse_through_children(e).text(0),
                top: s.crest_layers.top.parse_through_children(e).text(0),
            },
            grand_company: self.grand_company(s.grand_company.parse_through_children(e).text(0)),
            world: server.text(0),
            dc: server.text(1),
            formed: s.formed.parse(e).timestamp(0),
            active_members: s.active_members.parse_through_children(e).number(0),
            page: Arc::clone(page),
        }
    }
}

impl Listing for FreeCompanyListing {
    type Record = FreeCompanySearchResult;

    const KIND: &'static str = "free_company_search";

    fn extract(&self, document: &Html) -> ListingPage<FreeCompanySearchResult> {
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
    use crate::tables::NamedRowArgs;
    use crate::testing::fixtures::{self, FreeCompanyFixture};

    fn listing() -> FreeCompanyListing {
        FreeCompanyListing::new(SearchSelectors::load().unwrap().free_company)
    }

    fn table() -> LookupTable {
        LookupTable::from_rows(&[
            NamedRowArgs {
                id: 1,
                name_en: "Maelstrom",
                ..Default::default()
            },
            NamedRowArgs {
                id: 2,
                name_en: "Twin Adder",
                name_de: "Bruderschaft der Morgenviper",
                ..Default::default()
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_extracts_every_field() {
        let fc = FreeCompanyFixture::new("9231253336202687179", "Seventh Heaven")
            .grand_company("Twin Adder")
            .formed(1371163811)
            .members(42);
        let html = fixtures::free_company_page(&[fc], Some((1, 3)), Some("?page=2"));
        let page = listing()
            .with_grand_company_table(table())
            .extract(&Html::parse_document(&html));

        assert_eq!(page.page_info, Some(PageInfo { current_page: 1, total_pages: 3 }));
        assert_eq!(page.next.as_deref(), Some("?page=2"));
        let fc = &page.entries[0];
        assert_eq!(fc.id, "9231253336202687179");
        assert_eq!(fc.name, "Seventh Heaven");
        assert_eq!(fc.active, "Always");
        assert_eq!(fc.recruitment, "Open");
        assert_eq!(fc.estate, "Lavender Beds, Ward 1, Plot 1");
        assert_eq!(fc.world, "Gilgamesh");
        assert_eq!(fc.dc, "Aether");
        assert_eq!(fc.formed.unwrap().timestamp(), 1371163811);
        assert_eq!(fc.active_members, 42);
        assert_eq!(fc.crest_layers.bottom, "https://img.example.com/crest/bottom.png");
        assert_eq!(fc.crest_layers.top, "https://img.example.com/crest/top.png");
        assert_eq!(fc.grand_company.id, 2);
        assert_eq!(fc.grand_company.name, "Twin Adder");
        assert_eq!(fc.grand_company.name_de, "Bruderschaft der Morgenviper");
        assert_eq!(fc.page.total_pages, 3);
    }

    #[test]
    fn test_unknown_grand_company_is_zero_entity_with_page_name() {
        let fc = FreeCompanyFixture::new("1", "A").grand_company("Immortal Flames");
        let html = fixtures::free_company_page(&[fc.clone(), fc], Some((1, 1)), None);
        let page = listing()
            .with_grand_company_table(table())
            .extract(&Html::parse_document(&html));

        assert_eq!(page.entries.len(), 2);
        for entry in &page.entries {
            assert_eq!(entry.grand_company.id, 0);
            assert_eq!(entry.grand_company.name, "Immortal Flames");
            assert_eq!(entry.grand_company.name_en, "");
        }
    }

    #[test]
    fn test_without_table_keeps_page_name() {
        let fc = FreeCompanyFixture::new("1", "A").grand_company("Maelstrom");
        let html = fixtures::free_company_page(&[fc], None, None);
        let page = listing().extract(&Html::parse_document(&html));
        assert_eq!(page.entries[0].grand_company, NamedEntity::unresolved("Maelstrom"));
    }
}
