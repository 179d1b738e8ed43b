//! Vendor maker-note parsers.
//!
//! Each parser looks at the fields bound by the standard parser, checks a
//! vendor gate (a signature at the start of `MakerNote`, or the `Make`
//! string) and, when the gate matches, decodes the vendor directory into
//! vendor-prefixed fields. A gate that does not match is a silent no-op.
//! A note that passes its gate but cannot be decoded is an error.

pub mod apple;
pub mod canon;
pub mod dng;
pub mod nikon;
pub mod sony;

pub use apple::AppleParser;
pub use canon::{CanonParser, CanonRaw};
pub use dng::AdobeDngParser;
pub use nikon::NikonV3Parser;
pub use sony::SonyParser;

use bytes::{Bytes, BytesMut};

use crate::error::{ParseError, TiffError};
use crate::exif::Exif;
use crate::fields::names;
use crate::format::tiff::{decode_directory, ByteOrder, Directory, Tag};

/// The `MakerNote` tag, if the standard parser bound one.
pub(crate) fn maker_note(exif: &Exif) -> Option<Tag> {
    exif.get(names::MAKER_NOTE).ok().cloned()
}

/// Wrap a TIFF failure inside a vendor note.
pub(crate) fn note_error(vendor: &'static str) -> impl FnOnce(TiffError) -> ParseError {
    move |source| ParseError::MakerNote { vendor, source }
}

/// Decode a maker-note directory whose offsets are relative to the TIFF
/// header rather than the note.
///
/// The note bytes are placed at their original position in an otherwise
/// zeroed buffer, so offsets inside the note resolve exactly as they would
/// in the file while nothing outside the note is readable.
pub(crate) fn decode_in_place(
    note: &Tag,
    skip: usize,
    byte_order: ByteOrder,
) -> Result<Directory, TiffError> {
    let start = note.value_offset() as usize;
    let mut buf = BytesMut::zeroed(start);
    buf.extend_from_slice(note.raw());
    let buf: Bytes = buf.freeze();
    let (dir, _) = decode_directory(&buf, start + skip, byte_order)?;
    Ok(dir)
}
