//! Apple iOS maker notes.
//!
//! The note is a bare IFD with no TIFF header, preceded by a 12-byte
//! signature and two bytes of padding. Value offsets inside it are relative
//! to the start of the note; the byte order is the one of the enclosing
//! TIFF.

use tracing::{debug, trace};

use crate::error::ParseError;
use crate::exif::Exif;
use crate::fields::FieldTable;
use crate::format::tiff::decode_directory;
use crate::parser::Parser;

use super::{maker_note, note_error};

/// Signature at the start of every Apple maker note.
pub const APPLE_SIGNATURE: &[u8; 12] = b"Apple iOS\0\0\x01";

/// Offset of the directory inside the note.
const DIRECTORY_OFFSET: usize = 14;

/// Apple maker-note tags.
pub const APPLE_FIELDS: FieldTable = FieldTable::new(&[
    (0x0001, "Apple.MakerNoteVersion"),
    (0x0002, "Apple.AEMatrix"),
    (0x0003, "Apple.RunTime"),
    (0x0004, "Apple.AEStable"),
    (0x0005, "Apple.AETarget"),
    (0x0006, "Apple.AEAverage"),
    (0x0007, "Apple.AFStable"),
    (0x0008, "Apple.AccelerationVector"),
    (0x0009, "Apple.SISMethod"),
    (0x000a, "Apple.HDRImageType"),
    (0x000b, "Apple.BurstUUID"),
    (0x000c, "Apple.FocusDistanceRange"),
    (0x000d, "Apple.SphereHealthAverageCurrent"),
    (0x000e, "Apple.Orientation"),
    (0x000f, "Apple.OISMode"),
    (0x0010, "Apple.SphereStatus"),
    (0x0011, "Apple.ContentIdentifier"),
    (0x0012, "Apple.QRMOutputType"),
    (0x0013, "Apple.SphereExternalForceOffset"),
    (0x0014, "Apple.ImageCaptureType"),
    (0x0015, "Apple.ImageUniqueID"),
    (0x0016, "Apple.PhotosOriginatingSignature"),
    (0x0017, "Apple.LivePhotoVideoIndex"),
    (0x0018, "Apple.PhotosRenderOriginatingSignature"),
    (0x0019, "Apple.ImageProcessingFlags"),
    (0x001a, "Apple.QualityHint"),
    (0x001b, "Apple.PhotosRenderEffect"),
    (0x001c, "Apple.BracketedCaptureSequenceNumber"),
    (0x001d, "Apple.LuminanceNoiseAmplitude"),
    (0x001e, "Apple.OriginatingAppID"),
    (0x001f, "Apple.PhotosAppFeatureFlags"),
    (0x0020, "Apple.ImageCaptureRequestID"),
    (0x0021, "Apple.HDRHeadroom"),
    (0x0023, "Apple.AFPerformance"),
    (0x0025, "Apple.SceneFlags"),
    (0x0026, "Apple.SignalToNoiseRatioType"),
    (0x0027, "Apple.SignalToNoiseRatio"),
    (0x002b, "Apple.PhotoIdentifier"),
    (0x002d, "Apple.ColorTemperature"),
    (0x002e, "Apple.CameraType"),
    (0x002f, "Apple.FocusPosition"),
    (0x0030, "Apple.HDRGain"),
    (0x0038, "Apple.AFMeasuredDepth"),
    (0x003d, "Apple.AFConfidence"),
    (0x003e, "Apple.ColorCorrectionMatrix"),
    (0x003f, "Apple.GreenGhostMitigationStatus"),
    (0x0040, "Apple.SemanticStyle"),
    (0x0041, "Apple.SemanticStyleRenderingVer"),
    (0x0042, "Apple.SemanticStylePreset"),
    (0x004e, "Apple.Apple_0x004e"),
    (0x004f, "Apple.Apple_0x004f"),
]);

/// Parser for Apple iOS maker notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleParser;

impl Parser for AppleParser {
    fn name(&self) -> &'static str {
        "Apple"
    }

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError> {
        let note = match maker_note(exif) {
            Some(note) => note,
            None => return Ok(()),
        };
        if !note.raw().starts_with(APPLE_SIGNATURE) {
            trace!("Maker note has no Apple signature");
            return Ok(());
        }

        let (dir, _) = decode_directory(&note.raw_bytes(), DIRECTORY_OFFSET, exif.byte_order())
            .map_err(note_error("Apple"))?;
        let loaded = exif.load_tags(&dir, &APPLE_FIELDS, false);
        debug!(loaded, "Loaded Apple maker note");
        Ok(())
    }
}
