//! Nikon type 3 maker notes.
//!
//! Layout: `"Nikon\0"`, a four-byte version, then a complete TIFF structure
//! with its own header and byte order. Offsets inside the note are relative
//! to that embedded header.

use tracing::{debug, trace};

use crate::error::{ParseError, TiffError};
use crate::exif::Exif;
use crate::fields::FieldTable;
use crate::format::tiff::{decode_directory, TiffFile, TIFF_HEADER_SIZE};
use crate::parser::Parser;

use super::{maker_note, note_error};

pub const NIKON_SIGNATURE: &[u8; 6] = b"Nikon\0";

/// Offset of the embedded TIFF header inside the note.
const TIFF_OFFSET: usize = 10;

pub const NIKON_FIELDS: FieldTable = FieldTable::new(&[
    (0x0001, "Nikon.MakerNoteVersion"),
    (0x0002, "Nikon.ISO"),
    (0x0003, "Nikon.ColorMode"),
    (0x0004, "Nikon.Quality"),
    (0x0005, "Nikon.WhiteBalance"),
    (0x0006, "Nikon.Sharpness"),
    (0x0007, "Nikon.FocusMode"),
    (0x0008, "Nikon.FlashSetting"),
    (0x0009, "Nikon.FlashType"),
    (0x000b, "Nikon.WhiteBalanceFineTune"),
    (0x000c, "Nikon.WB_RBLevels"),
    (0x000d, "Nikon.ProgramShift"),
    (0x000e, "Nikon.ExposureDifference"),
    (0x0011, "Nikon.PreviewIFD"),
    (0x0012, "Nikon.FlashExposureComp"),
    (0x0013, "Nikon.ISOSetting"),
    (0x0016, "Nikon.ImageBoundary"),
    (0x0017, "Nikon.ExternalFlashExposureComp"),
    (0x0018, "Nikon.FlashExposureBracketValue"),
    (0x0019, "Nikon.ExposureBracketValue"),
    (0x001b, "Nikon.CropHiSpeed"),
    (0x001d, "Nikon.SerialNumber"),
    (0x001e, "Nikon.ColorSpace"),
    (0x001f, "Nikon.VRInfo"),
    (0x0022, "Nikon.ActiveD-Lighting"),
    (0x0023, "Nikon.PictureControlData"),
    (0x0024, "Nikon.WorldTime"),
    (0x0025, "Nikon.ISOInfo"),
    (0x002a, "Nikon.VignetteControl"),
    (0x002b, "Nikon.DistortInfo"),
    (0x0080, "Nikon.ImageAdjustment"),
    (0x0081, "Nikon.ToneComp"),
    (0x0082, "Nikon.AuxiliaryLens"),
    (0x0083, "Nikon.LensType"),
    (0x0084, "Nikon.Lens"),
    (0x0085, "Nikon.ManualFocusDistance"),
    (0x0086, "Nikon.DigitalZoom"),
    (0x0087, "Nikon.FlashMode"),
    (0x0088, "Nikon.AFInfo"),
    (0x0089, "Nikon.ShootingMode"),
    (0x008b, "Nikon.LensFStops"),
    (0x008c, "Nikon.ContrastCurve"),
    (0x008d, "Nikon.ColorHue"),
    (0x008f, "Nikon.SceneMode"),
    (0x0090, "Nikon.LightSource"),
    (0x0092, "Nikon.HueAdjustment"),
    (0x0093, "Nikon.NEFCompression"),
    (0x0095, "Nikon.NoiseReduction"),
    (0x0097, "Nikon.ColorBalance"),
    (0x0098, "Nikon.LensData"),
    (0x0099, "Nikon.RawImageCenter"),
    (0x009a, "Nikon.SensorPixelSize"),
    (0x00a2, "Nikon.ImageDataSize"),
    (0x00a5, "Nikon.ImageCount"),
    (0x00a6, "Nikon.DeletedImageCount"),
    (0x00a7, "Nikon.ShutterCount"),
    (0x00a8, "Nikon.FlashInfo"),
    (0x00a9, "Nikon.ImageOptimization"),
    (0x00aa, "Nikon.Saturation"),
    (0x00ab, "Nikon.VariProgram"),
    (0x00b1, "Nikon.HighISONoiseReduction"),
    (0x00b6, "Nikon.PowerUpTime"),
    (0x00b7, "Nikon.AFInfo2"),
    (0x00b8, "Nikon.FileInfo"),
    (0x00bb, "Nikon.RetouchInfo"),
    (0x0e00, "Nikon.PrintIM"),
    (0x0e01, "Nikon.NikonCaptureData"),
]);

/// Tags of the preview directory referenced by `Nikon.PreviewIFD`.
pub const NIKON_PREVIEW_FIELDS: FieldTable = FieldTable::new(&[
    (0x00fe, "NikonPreview.SubfileType"),
    (0x0103, "NikonPreview.Compression"),
    (0x011a, "NikonPreview.XResolution"),
    (0x011b, "NikonPreview.YResolution"),
    (0x0128, "NikonPreview.ResolutionUnit"),
    (0x0201, "NikonPreview.PreviewImageStart"),
    (0x0202, "NikonPreview.PreviewImageLength"),
    (0x0213, "NikonPreview.YCbCrPositioning"),
]);

/// Parser for Nikon type 3 maker notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NikonV3Parser;

impl Parser for NikonV3Parser {
    fn name(&self) -> &'static str {
        "NikonV3"
    }

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError> {
        let note = match maker_note(exif) {
            Some(note) => note,
            None => return Ok(()),
        };
        if note.raw().len() < TIFF_OFFSET + TIFF_HEADER_SIZE
            || !note.raw().starts_with(NIKON_SIGNATURE)
        {
            trace!("Maker note is not a Nikon type 3 note");
            return Ok(());
        }

        let embedded = note.raw_bytes().slice(TIFF_OFFSET..);
        let tiff = TiffFile::decode(&embedded).map_err(note_error("Nikon"))?;
        let ifd0 = tiff
            .dirs
            .first()
            .ok_or(TiffError::InvalidIfdOffset(0))
            .map_err(note_error("Nikon"))?;
        let loaded = exif.load_tags(ifd0, &NIKON_FIELDS, false);
        debug!(loaded, "Loaded Nikon maker note");

        if let Ok(Ok(offset)) = exif.get("Nikon.PreviewIFD").map(|tag| tag.int(0)) {
            let (dir, _) = decode_directory(&embedded, offset as usize, tiff.byte_order)
                .map_err(note_error("Nikon"))?;
            let loaded = exif.load_tags(&dir, &NIKON_PREVIEW_FIELDS, false);
            debug!(offset, loaded, "Loaded Nikon preview IFD");
        }
        Ok(())
    }
}
