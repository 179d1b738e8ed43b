//! Adobe DNG sub-IFDs.
//!
//! DNG files list their full-resolution raw image and previews as sub-IFDs
//! of IFD0 through the `SubIfdsPointer` (0x014A) tag. The first three are
//! loaded under `SubIfd0.*`, `SubIfd1.*` and `SubIfd2.*`; the third one
//! usually holds the full-size JPEG rendered from the raw data.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::exif::Exif;
use crate::fields::{names, FieldTable};
use crate::format::tiff::decode_directory;
use crate::parser::Parser;

use super::note_error;

pub const SUB_IFD0_FIELDS: FieldTable = FieldTable::new(&[
    (0x00fe, "SubIfd0.SubfileType"),
    (0x0100, "SubIfd0.Width"),
    (0x0101, "SubIfd0.ImageLength"),
    (0x0103, "SubIfd0.Compression"),
    (0x0111, "SubIfd0.PreviewImageStart"),
    (0x0117, "SubIfd0.PreviewImageLength"),
    (0xc71a, "SubIfd0.PreviewColorSpace"),
    (0xc71b, "SubIfd0.PreviewDateTime"),
]);

pub const SUB_IFD1_FIELDS: FieldTable = FieldTable::new(&[
    (0x00fe, "SubIfd1.SubfileType"),
    (0x0100, "SubIfd1.Width"),
    (0x0101, "SubIfd1.ImageLength"),
    (0x0103, "SubIfd1.Compression"),
    (0x0111, "SubIfd1.PreviewImageStart"),
    (0x0117, "SubIfd1.PreviewImageLength"),
    (0xc71a, "SubIfd1.PreviewColorSpace"),
    (0xc71b, "SubIfd1.PreviewDateTime"),
]);

pub const SUB_IFD2_FIELDS: FieldTable = FieldTable::new(&[
    (0x00fe, "SubIfd2.SubfileType"),
    (0x0100, "SubIfd2.Width"),
    (0x0101, "SubIfd2.ImageLength"),
    (0x0103, "SubIfd2.Compression"),
    (0x0111, "SubIfd2.JpgFromRawStart"),
    (0x0117, "SubIfd2.JpgFromRawLength"),
    (0xc71a, "SubIfd2.PreviewColorSpace"),
    (0xc71b, "SubIfd2.PreviewDateTime"),
]);

const SUB_IFD_TABLES: [FieldTable; 3] = [SUB_IFD0_FIELDS, SUB_IFD1_FIELDS, SUB_IFD2_FIELDS];

/// Parser for the sub-IFDs of DNG files.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdobeDngParser;

impl Parser for AdobeDngParser {
    fn name(&self) -> &'static str {
        "AdobeDNG"
    }

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError> {
        let pointer = match exif.get(names::SUB_IFDS_POINTER) {
            Ok(tag) => tag.clone(),
            Err(_) => {
                trace!("No SubIFDs pointer");
                return Ok(());
            }
        };

        let raw = exif.raw().clone();
        let order = exif.byte_order();
        for (index, table) in SUB_IFD_TABLES.iter().enumerate() {
            let offset = match pointer.int(index) {
                Ok(offset) => offset,
                Err(_) => break,
            };
            let (dir, _) =
                decode_directory(&raw, offset as usize, order).map_err(note_error("AdobeDNG"))?;
            let loaded = exif.load_tags(&dir, table, false);
            debug!(index, offset, loaded, "Loaded DNG sub-IFD");
        }
        Ok(())
    }
}
