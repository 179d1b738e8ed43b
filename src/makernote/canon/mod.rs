//! Canon maker notes.
//!
//! A Canon note is a bare IFD whose value offsets are relative to the TIFF
//! header of the enclosing file, not to the note. Several entries are
//! index-addressed arrays; [`CanonRaw`] decodes them.

mod raw;
pub mod tables;

pub use raw::{CanonAfInfo, CanonCameraSettings, CanonRaw, CanonShotInfo};

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::exif::Exif;
use crate::fields::{names, FieldTable};
use crate::parser::Parser;

use super::{decode_in_place, maker_note, note_error};

pub const CAMERA_SETTINGS: &str = "Canon.CameraSettings";
pub const SHOT_INFO: &str = "Canon.ShotInfo";
pub const AF_INFO: &str = "Canon.AFInfo";
pub const TIME_INFO: &str = "Canon.TimeInfo";
pub const IMAGE_TYPE: &str = "Canon.ImageType";
pub const FIRMWARE_VERSION: &str = "Canon.FirmwareVersion";
pub const OWNER_NAME: &str = "Canon.OwnerName";
pub const SERIAL_NUMBER: &str = "Canon.SerialNumber";
pub const MODEL_ID: &str = "Canon.ModelID";

/// Canon maker-note tags. `FocalLength` and `ColorSpace` deliberately
/// overwrite the standard fields of the same name.
pub const CANON_FIELDS: FieldTable = FieldTable::new(&[
    (0x0000, "Canon.0x0000"),
    (0x0001, CAMERA_SETTINGS),
    (0x0002, "FocalLength"),
    (0x0003, "Canon.0x0003"),
    (0x0004, SHOT_INFO),
    (0x0005, "Canon.Panorama"),
    (0x0006, IMAGE_TYPE),
    (0x0007, FIRMWARE_VERSION),
    (0x0008, "Canon.FileNumber"),
    (0x0009, OWNER_NAME),
    (0x000c, SERIAL_NUMBER),
    (0x000d, "Canon.CameraInfo"),
    (0x000f, "Canon.CustomFunctions"),
    (0x0010, MODEL_ID),
    (0x0012, "Canon.PictureInfo"),
    (0x0013, "Canon.ThumbnailImageValidArea"),
    (0x0015, "Canon.SerialNumberFormat"),
    (0x001a, "Canon.SuperMacro"),
    (0x0026, AF_INFO),
    (0x0028, "Canon.ImageUniqueID"),
    (0x0035, TIME_INFO),
    (0x0083, "Canon.OriginalDecisionDataOffset"),
    (0x0093, "Canon.FileInfo"),
    (0x0095, "Canon.LensModel"),
    (0x0096, "Canon.InternalSerialNumber"),
    (0x0097, "Canon.DustRemovalData"),
    (0x0099, "Canon.CustomFunctions2"),
    (0x00a0, "Canon.ProcessingInfo"),
    (0x00a4, "Canon.WhiteBalanceTable"),
    (0x00aa, "Canon.MeasuredColor"),
    (0x00b4, "ColorSpace"),
    (0x00b5, "Canon.0x00b5"),
    (0x00b6, "Canon.PreviewImageInfo"),
    (0x00c0, "Canon.0x00c0"),
    (0x00c1, "Canon.0x00c1"),
    (0x00d0, "Canon.VRDOffset"),
    (0x00e0, "Canon.SensorInfo"),
    (0x4001, "Canon.ColorData"),
]);

/// Parser for Canon maker notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonParser;

impl Parser for CanonParser {
    fn name(&self) -> &'static str {
        "Canon"
    }

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError> {
        let note = match maker_note(exif) {
            Some(note) => note,
            None => return Ok(()),
        };
        let make = exif.get(names::MAKE)?.string_val();
        if make.as_deref() != Ok("Canon") {
            trace!("Maker note is not a Canon note");
            return Ok(());
        }

        let dir =
            decode_in_place(&note, 0, exif.byte_order()).map_err(note_error("Canon"))?;
        let loaded = exif.load_tags(&dir, &CANON_FIELDS, false);
        debug!(loaded, "Loaded Canon maker note");
        Ok(())
    }
}
