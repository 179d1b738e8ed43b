//! Container detection.
//!
//! The first eight bytes of the input decide how the TIFF block is reached:
//!
//! - **TIFF**: `II*\0` or `MM\0*`, decoded as is
//! - **Raw EXIF**: a bare `Exif\0\0` block followed by TIFF
//! - **HEIF/HEIC**: an ISO-BMFF file whose first box is `ftyp`
//! - **JPEG**: anything else; the EXIF APP1 segment is searched for

use crate::error::FormatError;

/// Number of bytes inspected by [`detect_container`].
pub const DETECT_HEADER_SIZE: usize = 8;

/// Marker preceding the TIFF block in JPEG APP1 segments and raw EXIF blocks.
pub const EXIF_MARKER: &[u8; 6] = b"Exif\0\0";

// =============================================================================
// ContainerKind
// =============================================================================

/// Detected container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Tiff,
    RawExif,
    Heif,
    Jpeg,
}

impl ContainerKind {
    /// Get a human-readable name for the container.
    pub const fn name(&self) -> &'static str {
        match self {
            ContainerKind::Tiff => "TIFF",
            ContainerKind::RawExif => "raw EXIF",
            ContainerKind::Heif => "HEIF",
            ContainerKind::Jpeg => "JPEG",
        }
    }
}

/// Classify the input from its first eight bytes.
///
/// Fewer than eight bytes cannot be classified.
pub fn detect_container(header: &[u8]) -> Result<ContainerKind, FormatError> {
    if header.len() < DETECT_HEADER_SIZE {
        return Err(FormatError::ShortHeader {
            required: DETECT_HEADER_SIZE,
            actual: header.len(),
        });
    }

    let kind = match &header[0..4] {
        b"II*\0" | b"MM\0*" => ContainerKind::Tiff,
        b"Exif" => ContainerKind::RawExif,
        _ if &header[4..8] == b"ftyp" => ContainerKind::Heif,
        _ => ContainerKind::Jpeg,
    };
    Ok(kind)
}

/// Check the `Exif\0\0` marker and return the bytes that follow it.
pub fn strip_exif_marker(data: &[u8]) -> Result<&[u8], FormatError> {
    match data.strip_prefix(EXIF_MARKER.as_slice()) {
        Some(rest) => Ok(rest),
        None => Err(FormatError::InvalidExifMarker(
            data[..data.len().min(EXIF_MARKER.len())].to_vec(),
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================
