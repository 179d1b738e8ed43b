//! Tag id to field name mappings.
//!
//! Every directory is loaded through a table that names the tag ids it knows
//! about. Tag ids are only unique within a directory, so each logical
//! directory (IFD0, thumbnail, GPS, a vendor's maker note) has its own table.
//! Ids missing from the table are dropped, or kept under
//! `UnknownTag_<hex id>` when unknown tags are requested.

pub mod standard;

pub use standard::{
    names, EXIF_FIELDS, GPS_FIELDS, INTEROP_FIELDS, THUMBNAIL_FIELDS,
};

/// Prefix of the synthesized name for ids missing from a table.
pub const UNKNOWN_PREFIX: &str = "UnknownTag_";

/// Resolve a tag id to a field name.
pub trait FieldLookup {
    fn field_name(&self, id: u16) -> Option<&str>;
}

/// A static id to name table.
#[derive(Debug, Clone, Copy)]
pub struct FieldTable {
    entries: &'static [(u16, &'static str)],
}

impl FieldTable {
    pub const fn new(entries: &'static [(u16, &'static str)]) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reverse lookup, used by tests and callers that build tags by name.
    pub fn id_of(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(id, _)| *id)
    }
}

impl FieldLookup for FieldTable {
    fn field_name(&self, id: u16) -> Option<&str> {
        self.entries
            .iter()
            .find(|(tag, _)| *tag == id)
            .map(|(_, name)| *name)
    }
}

/// Name used for a tag id that no table knows.
pub fn unknown_field_name(id: u16) -> String {
    format!("{}{:x}", UNKNOWN_PREFIX, id)
}
