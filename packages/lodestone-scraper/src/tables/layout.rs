//! FlatBuffers accessors for packed name tables.
//!
//! Every exported table (grand companies, deities, ...) shares one layout: a
//! root table whose first field is a vector of rows, each row carrying a
//! `u32` id and one name per locale.
//!
//! ```text
//! table NamedTable { rows: [NamedRow]; }
//! table NamedRow   { id: uint; name_en: string; name_fr: string;
//!                    name_de: string; name_ja: string; }
//! root_type NamedTable;
//! ```

use flatbuffers::{FlatBufferBuilder, ForwardsUOffset, Vector, VOffsetT, WIPOffset};

#[derive(Copy, Clone, PartialEq)]
pub struct NamedTable<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for NamedTable<'a> {
    type Inner = NamedTable<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: flatbuffers::Table::new(buf, loc),
        }
    }
}

impl<'a> NamedTable<'a> {
    pub const VT_ROWS: VOffsetT = 4;

    #[inline]
    pub fn rows(&self) -> Option<Vector<'a, ForwardsUOffset<NamedRow<'a>>>> {
        // SAFETY: the buffer was verified when the table was opened.
        unsafe {
            self._tab
                .get::<ForwardsUOffset<Vector<'a, ForwardsUOffset<NamedRow>>>>(
                    NamedTable::VT_ROWS,
                    None,
                )
        }
    }
}

impl flatbuffers::Verifiable for NamedTable<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<ForwardsUOffset<Vector<'_, ForwardsUOffset<NamedRow>>>>(
                "rows",
                Self::VT_ROWS,
                false,
            )?
            .finish();
        Ok(())
    }
}

#[derive(Copy, Clone, PartialEq)]
pub struct NamedRow<'a> {
    pub _tab: flatbuffers::Table<'a>,
}

impl<'a> flatbuffers::Follow<'a> for NamedRow<'a> {
    type Inner = NamedRow<'a>;

    #[inline]
    unsafe fn follow(buf: &'a [u8], loc: usize) -> Self::Inner {
        Self {
            _tab: flatbuffers::Table::new(buf, loc),
        }
    }
}

impl<'a> NamedRow<'a> {
    pub const VT_ID: VOffsetT = 4;
    pub const VT_NAME_EN: VOffsetT = 6;
    pub const VT_NAME_FR: VOffsetT = 8;
    pub const VT_NAME_DE: VOffsetT = 10;
    pub const VT_NAME_JA: VOffsetT = 12;

    #[inline]
    pub fn id(&self) -> u32 {
        // SAFETY: verified buffer.
        unsafe { self._tab.get::<u32>(NamedRow::VT_ID, Some(0)).unwrap_or(0) }
    }

    #[inline]
    pub fn name_en(&self) -> Option<&'a str> {
        self.string(NamedRow::VT_NAME_EN)
    }

    #[inline]
    pub fn name_fr(&self) -> Option<&'a str> {
        self.string(NamedRow::VT_NAME_FR)
    }

    #[inline]
    pub fn name_de(&self) -> Option<&'a str> {
        self.string(NamedRow::VT_NAME_DE)
    }

    #[inline]
    pub fn name_ja(&self) -> Option<&'a str> {
        self.string(NamedRow::VT_NAME_JA)
    }

    #[inline]
    fn string(&self, slot: VOffsetT) -> Option<&'a str> {
        // SAFETY: verified buffer.
        unsafe { self._tab.get::<ForwardsUOffset<&str>>(slot, None) }
    }
}

impl flatbuffers::Verifiable for NamedRow<'_> {
    #[inline]
    fn run_verifier(
        v: &mut flatbuffers::Verifier,
        pos: usize,
    ) -> Result<(), flatbuffers::InvalidFlatbuffer> {
        v.visit_table(pos)?
            .visit_field::<u32>("id", Self::VT_ID, false)?
            .visit_field::<ForwardsUOffset<&str>>("name_en", Self::VT_NAME_EN, false)?
            .visit_field::<ForwardsUOffset<&str>>("name_fr", Self::VT_NAME_FR, false)?
            .visit_field::<ForwardsUOffset<&str>>("name_de", Self::VT_NAME_DE, false)?
            .visit_field::<ForwardsUOffset<&str>>("name_ja", Self::VT_NAME_JA, false)?
            .finish();
        Ok(())
    }
}

/// Row contents for [`build_named_table`].
#[derive(Debug, Clone, Default)]
pub struct NamedRowArgs<'s> {
    pub id: u32,
    pub name_en: &'s str,
    pub name_fr: &'s str,
    pub name_de: &'s str,
    pub name_ja: &'s str,
}

/// Serialize rows into a finished table buffer.
pub fn build_named_table(rows: &[NamedRowArgs<'_>]) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::new();

    let mut offsets: Vec<WIPOffset<NamedRow>> = Vec::with_capacity(rows.len());
    for row in rows {
        let name_en = fbb.create_string(row.name_en);
        let name_fr = fbb.create_string(row.name_fr);
        let name_de = fbb.create_string(row.name_de);
        let name_ja = fbb.create_string(row.name_ja);

        let start = fbb.start_table();
        fbb.push_slot::<u32>(NamedRow::VT_ID, row.id, 0);
        fbb.push_slot_always::<WIPOffset<_>>(NamedRow::VT_NAME_EN, name_en);
        fbb.push_slot_always::<WIPOffset<_>>(NamedRow::VT_NAME_FR, name_fr);
        fbb.push_slot_always::<WIPOffset<_>>(NamedRow::VT_NAME_DE, name_de);
        fbb.push_slot_always::<WIPOffset<_>>(NamedRow::VT_NAME_JA, name_ja);
        let end = fbb.end_table(start);
        offsets.push(WIPOffset::new(end.value()));
    }

    let rows_vec = fbb.create_vector(&offsets);
    let start = fbb.start_table();
    fbb.push_slot_always::<WIPOffset<_>>(NamedTable::VT_ROWS, rows_vec);
    let root: WIPOffset<NamedTable> = WIPOffset::new(fbb.end_table(start).value());
    fbb.finish(root, None);

    fbb.finished_data().to_vec()
}
