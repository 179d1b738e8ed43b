//! Standard EXIF parser: IFD0, IFD1 and the Exif, GPS and Interoperability
//! sub-IFDs.

use tracing::{debug, warn};

use crate::error::{ParseError, SubIfd, SubIfdErrors, TiffError};
use crate::exif::Exif;
use crate::fields::{names, FieldTable, EXIF_FIELDS, GPS_FIELDS, INTEROP_FIELDS, THUMBNAIL_FIELDS};
use crate::format::tiff::decode_directory;

use super::Parser;

/// Sub-IFD pointers followed by the standard parser, in traversal order.
const SUB_IFDS: [(SubIfd, &str, FieldTable); 3] = [
    (SubIfd::Exif, names::EXIF_IFD_POINTER, EXIF_FIELDS),
    (SubIfd::Gps, names::GPS_INFO_IFD_POINTER, GPS_FIELDS),
    (
        SubIfd::Interoperability,
        names::INTEROPERABILITY_IFD_POINTER,
        INTEROP_FIELDS,
    ),
];

/// Loads the standard directories. Always the first parser in the chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardParser;

impl Parser for StandardParser {
    fn name(&self) -> &'static str {
        "Standard"
    }

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError> {
        let keep_unknown = exif.options().keep_unknown_tags;
        let dirs = exif.directories().to_vec();

        let ifd0 = dirs.first().ok_or(ParseError::NoDirectories)?;
        let loaded = exif.load_tags(ifd0, &EXIF_FIELDS, keep_unknown);
        debug!(loaded, "Loaded IFD0");

        if let Some(ifd1) = dirs.get(1) {
            let loaded = exif.load_tags(ifd1, &THUMBNAIL_FIELDS, keep_unknown);
            debug!(loaded, "Loaded thumbnail IFD");
        }

        let mut errors = SubIfdErrors::new();
        for (stage, pointer, table) in SUB_IFDS {
            if let Err(err) = load_sub_ifd(exif, pointer, &table, keep_unknown) {
                warn!(stage = stage.stage(), error = %err, "Sub-IFD failed to load");
                errors.record(stage, err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ParseError::SubIfds(errors))
        }
    }
}

/// Follow a pointer field and merge the directory it points at.
///
/// A missing pointer or one that is not an integer is not an error.
fn load_sub_ifd(
    exif: &mut Exif,
    pointer: &str,
    table: &FieldTable,
    keep_unknown: bool,
) -> Result<(), TiffError> {
    let offset = match exif.get(pointer).map(|tag| tag.int(0)) {
        Ok(Ok(offset)) => offset,
        _ => return Ok(()),
    };

    if offset < 0 || offset as u64 >= exif.raw().len() as u64 {
        return Err(TiffError::InvalidIfdOffset(offset as u64));
    }

    let raw = exif.raw().clone();
    let (dir, _) = decode_directory(&raw, offset as usize, exif.byte_order())?;
    let loaded = exif.load_tags(&dir, table, keep_unknown);
    debug!(pointer, offset, loaded, "Loaded sub-IFD");
    Ok(())
}
