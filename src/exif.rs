//! The decoded EXIF result.
//!
//! An [`Exif`] owns the raw TIFF buffer, the top-level directory chain and
//! the field mapping built by the parser chain. Parsers read fields that
//! earlier parsers bound and add their own; the last write to a name wins.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

use crate::config::DecodeOptions;
use crate::error::{FieldError, TagError};
use crate::fields::{unknown_field_name, FieldLookup};
use crate::format::tiff::{ByteOrder, Directory, Tag, TiffFile};

/// Decoded EXIF metadata: semantic field names mapped to tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Exif {
    tiff: TiffFile,
    fields: BTreeMap<String, Tag>,
    raw: Bytes,
    options: DecodeOptions,
}

impl Exif {
    /// Wrap a decoded TIFF structure with an empty field mapping.
    pub fn new(tiff: TiffFile, raw: Bytes, options: DecodeOptions) -> Self {
        Self {
            tiff,
            fields: BTreeMap::new(),
            raw,
            options,
        }
    }

    // -------------------------------------------------------------------------
    // Field mapping
    // -------------------------------------------------------------------------

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Result<&Tag, FieldError> {
        self.fields
            .get(name)
            .ok_or_else(|| FieldError::NotPresent(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Bind a tag to a field name, replacing any previous binding.
    pub fn set(&mut self, name: impl Into<String>, tag: Tag) {
        self.fields.insert(name.into(), tag);
    }

    /// Merge every tag of `dir` into the mapping.
    ///
    /// Tags whose id `lookup` does not know are dropped, or stored under
    /// `UnknownTag_<hex id>` when `keep_unknown` is set. Returns the number of
    /// fields written.
    pub fn load_tags<L>(&mut self, dir: &Directory, lookup: &L, keep_unknown: bool) -> usize
    where
        L: FieldLookup + ?Sized,
    {
        let mut loaded = 0;
        for tag in &dir.tags {
            let name = match lookup.field_name(tag.id()) {
                Some(name) => name.to_string(),
                None if keep_unknown => unknown_field_name(tag.id()),
                None => continue,
            };
            self.fields.insert(name, tag.clone());
            loaded += 1;
        }
        loaded
    }

    /// Iterate over all fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.fields.iter().map(|(name, tag)| (name.as_str(), tag))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Visit every field in name order, stopping at the first error.
    pub fn walk<E, F>(&self, mut visit: F) -> Result<(), E>
    where
        F: FnMut(&str, &Tag) -> Result<(), E>,
    {
        for (name, tag) in &self.fields {
            visit(name, tag)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Decode state
    // -------------------------------------------------------------------------

    /// The raw TIFF buffer all value offsets refer to.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    pub fn tiff(&self) -> &TiffFile {
        &self.tiff
    }

    /// Top-level directories (IFD0, IFD1, ...).
    pub fn directories(&self) -> &[Directory] {
        &self.tiff.dirs
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.tiff.byte_order
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    // -------------------------------------------------------------------------
    // Typed helpers
    // -------------------------------------------------------------------------

    /// Integer element `index` of a field.
    pub(crate) fn int_field(&self, name: &str, index: usize) -> Result<i64, FieldError> {
        self.get(name)?
            .int(index)
            .map_err(|e| FieldError::value(name, e))
    }

    /// Rational element `index` of a field.
    pub(crate) fn rational_field(&self, name: &str, index: usize) -> Result<(i64, i64), FieldError> {
        self.get(name)?
            .rational(index)
            .map_err(|e| FieldError::value(name, e))
    }

    /// ASCII value of a field, cut at the first NUL.
    pub(crate) fn string_field(&self, name: &str) -> Result<String, FieldError> {
        self.get(name)?
            .string_val()
            .map_err(|e: TagError| FieldError::value(name, e))
    }
}

impl fmt::Display for Exif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, tag) in &self.fields {
            writeln!(f, "{}: {}", name, tag)?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
