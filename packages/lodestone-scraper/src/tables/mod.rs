//! Packed multilingual lookup tables.
//!
//! A [`LookupTable`] maps a display name as it appears on a page (in any
//! locale) to a canonical entity with a stable numeric id. Tables are
//! FlatBuffers blobs; decoding is zero-copy, the buffer is verified once when
//! the table is opened and rows are read straight out of it on each lookup.

mod layout;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::TableError;

pub use layout::{build_named_table, NamedRow, NamedRowArgs, NamedTable};

/// Grand companies in every client locale, ids 1 (Maelstrom), 2 (Twin Adder)
/// and 3 (Immortal Flames).
const GRAND_COMPANIES: &[u8] = include_bytes!("../../assets/tables/grand_companies.bin");

/// A canonical entity resolved from a lookup table.
///
/// `name` is the name as it appeared on the page; the per-locale names come
/// from the table. The default value (id 0, empty names) stands for "not in
/// the table".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: u32,
    pub name: String,
    pub name_en: String,
    pub name_fr: String,
    pub name_de: String,
    pub name_ja: String,
}

impl NamedEntity {
    /// An unresolved entity that only carries the in-page name.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether this entity was found in a table.
    pub fn is_resolved(&self) -> bool {
        self.id != 0
    }

    fn from_row(row: NamedRow<'_>) -> Self {
        Self {
            id: row.id(),
            name: String::new(),
            name_en: row.name_en().unwrap_or_default().to_string(),
            name_fr: row.name_fr().unwrap_or_default().to_string(),
            name_de: row.name_de().unwrap_or_default().to_string(),
            name_ja: row.name_ja().unwrap_or_default().to_string(),
        }
    }
}

/// An immutable, shareable name table.
///
/// Cloning shares the underlying buffer.
#[derive(Debug, Clone)]
pub struct LookupTable {
    buf: Arc<[u8]>,
}

impl LookupTable {
    /// Open a packed table, verifying the buffer.
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, TableError> {
        let buf = bytes.into();
        flatbuffers::root::<NamedTable>(&buf)?;
        Ok(Self { buf })
    }

    /// The grand company table packed into the crate.
    pub fn grand_companies() -> Result<Self, TableError> {
        Self::from_bytes(GRAND_COMPANIES)
    }

    /// Build a table from rows.
    pub fn from_rows(rows: &[NamedRowArgs<'_>]) -> Result<Self, TableError> {
        Self::from_bytes(build_named_table(rows))
    }

    /// The raw packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.view()
            .rows()
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the first row, in table order, with any locale name equal to
    /// `name`.
    pub fn find(&self, name: &str) -> Option<NamedEntity> {
        let rows = self.view().rows()?;
        rows.iter()
            .find(|row| {
                [row.name_en(), row.name_fr(), row.name_de(), row.name_ja()]
                    .into_iter()
                    .flatten()
                    .any(|n| !n.is_empty() && n == name)
            })
            .map(NamedEntity::from_row)
    }

    /// Resolve a name; a miss yields the zero entity.
    pub fn lookup(&self, name: &str) -> NamedEntity {
        self.find(name).unwrap_or_else(|| {
            tracing::trace!(name = %name, "Name not found in lookup table");
            NamedEntity::default()
        })
    }

    /// All rows as owned entities, in table order.
    pub fn entities(&self) -> Vec<NamedEntity> {
        self.view()
            .rows()
            .map(|rows| rows.iter().map(NamedEntity::from_row).collect())
            .unwrap_or_default()
    }

    fn view(&self) -> NamedTable<'_> {
        // SAFETY: `buf` is immutable and passed `flatbuffers::root` in `from_bytes`.
        unsafe { flatbuffers::root_unchecked::<NamedTable>(&self.buf) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grand_companies() -> LookupTable {
        LookupTable::from_rows(&[
            NamedRowArgs {
                id: 1,
                name_en: "Maelstrom",
                name_fr: "Le Maelstrom",
                name_de: "Mahlstrom",
                name_ja: "黒渦団",
            },
            NamedRowArgs {
                id: 2,
                name_en: "Twin Adder",
                name_fr: "L'ordre des Deux Vipères",
                name_de: "Bruderschaft der Morgenviper",
                name_ja: "双蛇党",
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_english_name() {
        let table = grand_companies();
        let gc = table.lookup("Twin Adder");
        assert_eq!(gc.id, 2);
        assert_eq!(gc.name_de, "Bruderschaft der Morgenviper");
        assert!(gc.is_resolved());
    }

    #[test]
    fn test_lookup_matches_any_locale() {
        let table = grand_companies();
        assert_eq!(table.lookup("黒渦団").id, 1);
        assert_eq!(table.lookup("Le Maelstrom").id, 1);
    }

    #[test]
    fn test_missing_name_yields_zero_entity() {
        let table = grand_companies();
        let gc = table.lookup("Immortal Flames");
        assert_eq!(gc, NamedEntity::default());
        assert!(!gc.is_resolved());
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let table = LookupTable::from_rows(&[
            NamedRowArgs {
                id: 7,
                name_en: "Twin",
                ..Default::default()
            },
            NamedRowArgs {
                id: 8,
                name_en: "Twin",
                ..Default::default()
            },
        ])
        .unwrap();
        assert_eq!(table.lookup("Twin").id, 7);
    }

    #[test]
    fn test_empty_query_does_not_match_empty_names() {
        let table = LookupTable::from_rows(&[NamedRowArgs {
            id: 3,
            name_en: "Immortal Flames",
            ..Default::default()
        }])
        .unwrap();
        assert_eq!(table.lookup("").id, 0);
    }

    #[test]
    fn test_entities_in_table_order() {
        let table = grand_companies();
        assert_eq!(table.len(), 2);
        let ids: Vec<u32> = table.entities().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_garbage_buffer_is_rejected() {
        assert!(LookupTable::from_bytes(vec![0xffu8, 0xff, 0xff, 0xff, 0x01]).is_err());
    }

    #[test]
    fn test_reopening_bytes_round_trips() {
        let table = grand_companies();
        let reopened = LookupTable::from_bytes(table.as_bytes().to_vec()).unwrap();
        assert_eq!(reopened.entities(), table.entities());
    }

    #[test]
    fn test_packed_grand_companies_cover_every_locale() {
        let table = LookupTable::grand_companies().unwrap();
        assert_eq!(table.len(), 3);

        let twin_adder = table.lookup("Twin Adder");
        assert_eq!(twin_adder.id, 2);
        assert_eq!(twin_adder.name_fr, "L'ordre des Deux Vipères");
        assert_eq!(table.lookup("Mahlstrom").id, 1);
        assert_eq!(table.lookup("不滅隊").id, 3);
        assert_eq!(table.lookup("Les Immortels").name_en, "Immortal Flames");
    }

    #[test]
    fn test_packed_grand_companies_match_built_table() {
        let packed = LookupTable::grand_companies().unwrap();
        let built = LookupTable::from_rows(&[
            NamedRowArgs {
                id: 1,
                name_en: "Maelstrom",
                name_fr: "Le Maelstrom",
                name_de: "Mahlstrom",
                name_ja: "黒渦団",
            },
            NamedRowArgs {
                id: 2,
                name_en: "Twin Adder",
                name_fr: "L'ordre des Deux Vipères",
                name_de: "Bruderschaft der Morgenviper",
                name_ja: "双蛇党",
            },
            NamedRowArgs {
                id: 3,
                name_en: "Immortal Flames",
                name_fr: "Les Immortels",
                name_de: "Legion der Unsterblichen",
                name_ja: "不滅隊",
            },
        ])
        .unwrap();
        assert_eq!(packed.entities(), built.entities());
    }

    #[test]
    fn test_repeated_lookups_read_the_same_buffer() {
        let table = grand_companies();
        for _ in 0..3 {
            assert_eq!(table.lookup("双蛇党").id, 2);
            assert_eq!(table.len(), 2);
        }
    }

    proptest! {
        #[test]
        fn test_unknown_names_always_resolve_to_zero(name in "[a-z ]{1,24}") {
            let table = grand_companies();
            let first = table.lookup(&name);
            let second = table.lookup(&name);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first, NamedEntity::default());
        }
    }
}
