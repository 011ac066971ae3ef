//! Achievement list of a character profile.

use scraper::Html;
use std::sync::Arc;

use super::{Listing, ListingPage};
use crate::selectors::{AchievementSelectors, FieldValues};
use crate::types::records::{AchievementInfo, AchievementTotals};

/// Reads one page of a character's unlocked achievements.
///
/// The list ends on the sentinel locator; it never needs a revisit.
#[derive(Debug, Clone)]
pub struct AchievementListing {
    selectors: Arc<AchievementSelectors>,
}

impl AchievementListing {
    pub fn new(selectors: Arc<AchievementSelectors>) -> Self {
        Self { selectors }
    }

    fn totals(&self, document: &Html) -> AchievementTotals {
        let s = &self.selectors;
        AchievementTotals {
            total_achievements: s.total_achievements.parse_document(document).number(0),
            total_achievement_points: s.achievement_points.parse_document(document).number(0),
        }
    }
}

impl Listing for AchievementListing {
    type Record = AchievementInfo;

    const KIND: &'static str = "achievements";

    fn extract(&self, document: &Html) -> ListingPage<AchievementInfo> {
        let s = &self.selectors;
        let totals = Arc::new(self.totals(document));

        let next = s.list_next_button.parse_document(document).into_iter().next();

        let entries = match s.list.select(document).next() {
            Some(list) => list
                .select(s.entry.selector())
                .map(|entry| AchievementInfo {
                    id: s.id.parse_through_children(entry).number(0),
                    date: s.time.parse_through_children(entry).timestamp(0),
                    totals: Arc::clone(&totals),
                })
                .collect(),
            None => Vec::new(),
        };

        ListingPage {
            page_info: None,
            next,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::SENTINEL;
    use crate::selectors::ProfileSelectors;
    use crate::testing::fixtures;

    fn listing() -> AchievementListing {
        AchievementListing::new(ProfileSelectors::load().unwrap().achievements)
    }

    #[test]
    fn test_extracts_totals_and_entries() {
        let html = fixtures::achievement_page(
            &[(2, Some(1596045323)), (17, Some(1596045400))],
            Some(SENTINEL),
        );
        let page = listing().extract(&Html::parse_document(&html));

        assert_eq!(page.next.as_deref(), Some(SENTINEL));
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].id, 2);
        assert_eq!(page.entries[1].date.unwrap().timestamp(), 1596045400);
        assert_eq!(page.entries[0].totals.total_achievements, 1234);
        assert_eq!(page.entries[0].totals.total_achievement_points, 12345);
        assert!(Arc::ptr_eq(&page.entries[0].totals, &page.entries[1].totals));
    }

    #[test]
    fn test_malformed_timestamp_keeps_the_entry() {
        let html = fixtures::achievement_page(&[(1, Some(100)), (2, None), (3, Some(300))], None);
        let page = listing().extract(&Html::parse_document(&html));

        let dates: Vec<_> = page.entries.iter().map(|a| a.date.map(|d| d.timestamp())).collect();
        assert_eq!(dates, vec![Some(100), None, Some(300)]);
        assert!(page.next.is_none());
    }

    #[test]
    fn test_page_without_list_yields_nothing() {
        let page = listing().extract(&Html::parse_document("<html><body></body></html>"));
        assert!(page.entries.is_empty());
        assert!(page.next.is_none());
    }
}
