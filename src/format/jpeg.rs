//! EXIF extraction from JPEG streams.
//!
//! A JPEG file is a sequence of marker segments. EXIF data lives in an APP1
//! segment whose body starts with `Exif\0\0`:
//!
//! ```text
//! FF D8                SOI
//! FF E1 LL LL          APP1, 16-bit big-endian length (including itself)
//! 45 78 69 66 00 00    "Exif\0\0"
//! ...                  TIFF block
//! ```
//!
//! Other APP1 segments (XMP) share the marker and are skipped.

use std::io::{self, BufRead, BufReader, Read};

use crate::error::{DecodeError, FormatError};
use crate::io::read_u16_be;

use super::detect::{strip_exif_marker, EXIF_MARKER};

// =============================================================================
// JPEG Markers
// =============================================================================

/// First byte of every marker
pub const MARKER_PREFIX: u8 = 0xFF;

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 1 (EXIF/XMP) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

// Marker codes that stand alone without a length field.
const STUFFING: u8 = 0x00;
const TEM: u8 = 0x01;
const RST0: u8 = 0xD0;
const RST7: u8 = 0xD7;

// =============================================================================
// Extraction
// =============================================================================

/// Read marker segments until the EXIF APP1 segment and return its TIFF block.
///
/// The walk stops at EOI, at the start of scan data or at end of stream;
/// each of those means the file has no EXIF segment.
pub fn extract_exif<R: Read>(reader: R) -> Result<Vec<u8>, DecodeError> {
    let mut reader = BufReader::new(reader);

    loop {
        let code = match next_marker(&mut reader)? {
            Some(code) => code,
            None => return Err(FormatError::NoExif.into()),
        };

        match code {
            STUFFING | TEM | RST0..=RST7 => continue,
            c if c == SOI[1] => continue,
            c if c == EOI[1] || c == SOS[1] => return Err(FormatError::NoExif.into()),
            _ => {}
        }

        let mut len_bytes = [0u8; 2];
        read_segment_bytes(&mut reader, &mut len_bytes)?;
        let len = read_u16_be(&len_bytes) as usize;
        if len < 2 {
            return Err(FormatError::InvalidJpeg(format!(
                "segment 0x{:02X} has invalid length {}",
                code, len
            ))
            .into());
        }

        let mut body = vec![0u8; len - 2];
        read_segment_bytes(&mut reader, &mut body)?;

        if code == APP1[1] && body.starts_with(EXIF_MARKER) {
            return Ok(strip_exif_marker(&body)?.to_vec());
        }
    }
}

/// Advance to the next marker and return its code, or `None` at end of stream.
///
/// Bytes that are not part of a marker are discarded, as are fill bytes
/// (repeated `0xFF`).
fn next_marker<R: BufRead>(reader: &mut R) -> Result<Option<u8>, DecodeError> {
    let mut skipped = Vec::new();
    if reader.read_until(MARKER_PREFIX, &mut skipped)? == 0
        || skipped.last() != Some(&MARKER_PREFIX)
    {
        return Ok(None);
    }

    let mut byte = [0u8; 1];
    loop {
        if reader.read(&mut byte)? == 0 {
            return Ok(None);
        }
        if byte[0] != MARKER_PREFIX {
            return Ok(Some(byte[0]));
        }
    }
}

fn read_segment_bytes<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), DecodeError> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            FormatError::InvalidJpeg("truncated marker segment".to_string()).into()
        }
        _ => DecodeError::Io(e),
    })
}

// =============================================================================
// Tests
// =============================================================================
