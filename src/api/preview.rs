//! Embedded thumbnail and preview images.
//!
//! Offsets are relative to the start of the TIFF buffer ([`Exif::raw`]).

use serde::Serialize;
use tracing::trace;

use crate::error::FieldError;
use crate::exif::Exif;
use crate::fields::names;

/// Compression values whose payload is a self-contained image file.
const IMAGE_COMPRESSIONS: &[i64] = &[
    6,     // JPEG (old-style)
    7,     // JPEG
    99,    // JPEG
    34712, // JPEG 2000
    34892, // lossy JPEG
    34927, // WebP
    34933, // PNG
    34934, // JPEG XR
];

/// Location of an embedded image inside the TIFF buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImageRange {
    pub start: u64,
    pub length: u64,
}

impl ImageRange {
    /// The image bytes, or `None` when the range runs past the buffer.
    pub fn slice<'a>(&self, raw: &'a [u8]) -> Option<&'a [u8]> {
        let start = usize::try_from(self.start).ok()?;
        let end = start.checked_add(usize::try_from(self.length).ok()?)?;
        raw.get(start..end)
    }
}

/// Field names describing one candidate preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSource {
    pub start: &'static str,
    pub length: &'static str,
    /// When set and present, the candidate is only used if this field
    /// names an image compression.
    pub compression: Option<&'static str>,
}

impl PreviewSource {
    pub const fn new(
        start: &'static str,
        length: &'static str,
        compression: Option<&'static str>,
    ) -> Self {
        Self {
            start,
            length,
            compression,
        }
    }
}

/// Candidates checked by [`Exif::preview_image`] after any caller-supplied
/// ones.
pub const DEFAULT_PREVIEW_SOURCES: &[PreviewSource] = &[
    PreviewSource::new(
        "SubIfd0.PreviewImageStart",
        "SubIfd0.PreviewImageLength",
        Some("SubIfd0.Compression"),
    ),
    PreviewSource::new(
        "SubIfd1.PreviewImageStart",
        "SubIfd1.PreviewImageLength",
        Some("SubIfd1.Compression"),
    ),
    PreviewSource::new(
        "SubIfd2.JpgFromRawStart",
        "SubIfd2.JpgFromRawLength",
        Some("SubIfd2.Compression"),
    ),
    PreviewSource::new(
        names::STRIP_OFFSETS,
        names::STRIP_BYTE_COUNTS,
        Some(names::COMPRESSION),
    ),
    PreviewSource::new(
        names::THUMB_JPEG_INTERCHANGE_FORMAT,
        names::THUMB_JPEG_INTERCHANGE_FORMAT_LENGTH,
        None,
    ),
];

impl Exif {
    /// Offset and length of the IFD1 JPEG thumbnail.
    pub fn jpeg_thumbnail(&self) -> Result<ImageRange, FieldError> {
        let start = self.int_field(names::THUMB_JPEG_INTERCHANGE_FORMAT, 0)?;
        let length = self.int_field(names::THUMB_JPEG_INTERCHANGE_FORMAT_LENGTH, 0)?;
        Ok(ImageRange {
            start: non_negative(names::THUMB_JPEG_INTERCHANGE_FORMAT, start)?,
            length: non_negative(names::THUMB_JPEG_INTERCHANGE_FORMAT_LENGTH, length)?,
        })
    }

    /// The largest embedded preview image.
    ///
    /// `extra` candidates are checked before [`DEFAULT_PREVIEW_SOURCES`].
    /// Candidates with missing or non-integer fields, or whose compression
    /// is not an image format, are skipped.
    pub fn preview_image(&self, extra: &[PreviewSource]) -> Result<ImageRange, FieldError> {
        let mut best: Option<ImageRange> = None;
        for source in extra.iter().chain(DEFAULT_PREVIEW_SOURCES) {
            let range = match self.preview_candidate(source) {
                Some(range) => range,
                None => continue,
            };
            if best.map_or(true, |b| range.length > b.length) {
                best = Some(range);
            }
        }
        best.filter(|range| range.length > 0).ok_or_else(|| {
            FieldError::NotPresent(names::THUMB_JPEG_INTERCHANGE_FORMAT.to_string())
        })
    }

    fn preview_candidate(&self, source: &PreviewSource) -> Option<ImageRange> {
        if let Some(field) = source.compression {
            if let Ok(tag) = self.get(field) {
                let compression = tag.int(0).ok()?;
                if !IMAGE_COMPRESSIONS.contains(&compression) {
                    trace!(field, compression, "Skipping non-image preview");
                    return None;
                }
            }
        }
        let start = self.int_field(source.start, 0).ok()?;
        let length = self.int_field(source.length, 0).ok()?;
        Some(ImageRange {
            start: u64::try_from(start).ok()?,
            length: u64::try_from(length).ok()?,
        })
    }
}

fn non_negative(field: &str, value: i64) -> Result<u64, FieldError> {
    u64::try_from(value)
        .map_err(|_| FieldError::unparsable(field, format!("negative value {value}")))
}
