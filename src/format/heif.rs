//! EXIF extraction from HEIF/HEIC files.
//!
//! HEIF is an ISO base media file: a sequence of boxes, each introduced by a
//! 32-bit big-endian size and a four-character type. The EXIF block is an
//! item of type `Exif`:
//!
//! ```text
//! ftyp    compatible brands must include mif1 or msf1
//! meta    (full box)
//!   iinf  item info entries; the `infe` with item_type "Exif" names the item id
//!   iloc  item locations; extents of that item id
//!   idat  item data, used by construction method 1
//! ```
//!
//! The item payload starts with a 4-byte big-endian offset to the TIFF
//! header (usually 6, skipping `Exif\0\0`).

use std::io::{self, Read, Seek, SeekFrom};

use tracing::debug;

use crate::error::{DecodeError, FormatError};
use crate::io::{read_u16_be, read_u32_be, read_u64_be};

/// Brands that mark an ISO-BMFF file as HEIF (image or image sequence).
const HEIF_BRANDS: &[&[u8; 4]] = &[b"mif1", b"msf1"];

/// Size of a box header without the 64-bit large size.
const BOX_HEADER_SIZE: u64 = 8;

// =============================================================================
// HeifExtractor
// =============================================================================

/// Any readable and seekable source.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// Capability that locates the EXIF item of a HEIF file.
///
/// Implementations return the TIFF block with the item's offset prefix
/// already removed, reading at most `limit` bytes of item data.
pub trait HeifExtractor: Send + Sync {
    fn extract(&self, reader: &mut dyn ReadSeek, limit: usize) -> Result<Vec<u8>, DecodeError>;
}

/// Default extractor walking the ISO-BMFF box tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoBmffExtractor;

impl HeifExtractor for IsoBmffExtractor {
    fn extract(&self, reader: &mut dyn ReadSeek, limit: usize) -> Result<Vec<u8>, DecodeError> {
        let item = match read_exif_item(reader, limit) {
            Err(DecodeError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(invalid("truncated HEIF file").into());
            }
            other => other?,
        };

        if item.len() < 4 {
            return Err(invalid("Exif item is shorter than its header offset").into());
        }
        let offset = read_u32_be(&item[0..4]) as usize;
        let start = offset
            .checked_add(4)
            .filter(|&start| start <= item.len())
            .ok_or_else(|| invalid(format!("Exif header offset {} is out of range", offset)))?;

        debug!(offset, len = item.len() - start, "Extracted HEIF Exif item");
        Ok(item[start..].to_vec())
    }
}

fn invalid(msg: impl Into<String>) -> FormatError {
    FormatError::InvalidHeif(msg.into())
}

// =============================================================================
// Top-level walk
// =============================================================================

fn read_exif_item(reader: &mut dyn ReadSeek, limit: usize) -> Result<Vec<u8>, DecodeError> {
    let mut ftyp_checked = false;

    while let Some((boxtype, size)) = read_box_header(reader)? {
        match &boxtype {
            b"ftyp" => {
                let body = read_box_body(reader, size, limit)?;
                check_ftyp(&body)?;
                ftyp_checked = true;
            }
            b"meta" => {
                if !ftyp_checked {
                    return Err(invalid("meta box found before ftyp").into());
                }
                let body = read_box_body(reader, size, limit)?;
                return read_meta(reader, &body, limit);
            }
            _ => skip_box_body(reader, size)?,
        }
    }

    Err(FormatError::NoHeifExif.into())
}

/// Read a box header and return its type and body size.
///
/// `None` at a clean end of stream; a body size of `None` extends to the end
/// of the file.
fn read_box_header(
    reader: &mut dyn ReadSeek,
) -> Result<Option<([u8; 4], Option<u64>)>, DecodeError> {
    let mut header = [0u8; BOX_HEADER_SIZE as usize];
    let mut filled = 0;
    while filled < header.len() {
        let n = reader.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    match filled {
        0 => return Ok(None),
        n if n < header.len() => {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        _ => {}
    }

    let boxtype = [header[4], header[5], header[6], header[7]];
    let size = match read_u32_be(&header[0..4]) {
        0 => None,
        1 => {
            let mut large = [0u8; 8];
            reader.read_exact(&mut large)?;
            Some(
                read_u64_be(&large)
                    .checked_sub(BOX_HEADER_SIZE + 8)
                    .ok_or_else(|| invalid("invalid box size"))?,
            )
        }
        n => Some(
            (n as u64)
                .checked_sub(BOX_HEADER_SIZE)
                .ok_or_else(|| invalid("invalid box size"))?,
        ),
    };
    Ok(Some((boxtype, size)))
}

fn read_box_body(
    reader: &mut dyn ReadSeek,
    size: Option<u64>,
    limit: usize,
) -> Result<Vec<u8>, DecodeError> {
    let mut body = Vec::new();
    match size {
        Some(size) => {
            if size > limit as u64 {
                return Err(FormatError::TooLarge { limit }.into());
            }
            body.resize(size as usize, 0);
            reader.read_exact(&mut body)?;
        }
        None => {
            (&mut *reader).take(limit as u64 + 1).read_to_end(&mut body)?;
            if body.len() > limit {
                return Err(FormatError::TooLarge { limit }.into());
            }
        }
    }
    Ok(body)
}

fn skip_box_body(reader: &mut dyn ReadSeek, size: Option<u64>) -> Result<(), DecodeError> {
    match size {
        Some(size) => {
            let delta = i64::try_from(size).map_err(|_| invalid("box too large to skip"))?;
            reader.seek(SeekFrom::Current(delta))?;
        }
        None => {
            reader.seek(SeekFrom::End(0))?;
        }
    }
    Ok(())
}

fn check_ftyp(body: &[u8]) -> Result<(), FormatError> {
    let mut cursor = BoxCursor::new(body);
    // major brand and minor version
    cursor.take(8)?;
    while let Ok(brand) = cursor.array4() {
        if HEIF_BRANDS.contains(&&brand) {
            return Ok(());
        }
    }
    Err(invalid("no HEIF brand among the compatible brands"))
}

// =============================================================================
// meta box
// =============================================================================

/// Where an item's data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemLocation {
    construction_method: u8,
    base_offset: u64,
    /// (offset, length) pairs; a length of 0 extends to the end of the source
    extents: Vec<(u64, u64)>,
}

fn read_meta(
    reader: &mut dyn ReadSeek,
    body: &[u8],
    limit: usize,
) -> Result<Vec<u8>, DecodeError> {
    let mut cursor = BoxCursor::new(body);
    let (version, _flags) = cursor.full_box_header()?;
    if version != 0 {
        return Err(invalid(format!("unsupported meta box version {}", version)).into());
    }

    let mut item_id = None;
    let mut iloc = None;
    let mut idat = None;
    while !cursor.is_empty() {
        let (boxtype, child) = cursor.child_box()?;
        match boxtype {
            b"iinf" => item_id = find_exif_item_id(child)?.or(item_id),
            b"iloc" => iloc = Some(child),
            b"idat" => idat = Some(child),
            _ => {}
        }
    }

    let item_id = item_id.ok_or(FormatError::NoHeifExif)?;
    let iloc = iloc.ok_or_else(|| invalid("missing iloc box"))?;
    let location =
        find_item_location(iloc, item_id)?.ok_or_else(|| invalid("Exif item has no location"))?;

    let mut data = Vec::new();
    match location.construction_method {
        0 => {
            for &(offset, len) in &location.extents {
                let start = location
                    .base_offset
                    .checked_add(offset)
                    .ok_or_else(|| invalid("extent offset overflow"))?;
                reader.seek(SeekFrom::Start(start))?;
                let remaining = (limit - data.len().min(limit)) as u64;
                if len == 0 {
                    (&mut *reader).take(remaining + 1).read_to_end(&mut data)?;
                } else {
                    if len > remaining {
                        return Err(FormatError::TooLarge { limit }.into());
                    }
                    let at = data.len();
                    data.resize(at + len as usize, 0);
                    reader.read_exact(&mut data[at..])?;
                }
                if data.len() > limit {
                    return Err(FormatError::TooLarge { limit }.into());
                }
            }
        }
        1 => {
            let idat = idat.ok_or_else(|| invalid("missing idat box"))?;
            for &(offset, len) in &location.extents {
                let start = location
                    .base_offset
                    .checked_add(offset)
                    .and_then(|s| usize::try_from(s).ok())
                    .ok_or_else(|| invalid("extent offset overflow"))?;
                let extent = match len {
                    0 => idat.get(start..),
                    _ => usize::try_from(len)
                        .ok()
                        .and_then(|len| start.checked_add(len))
                        .and_then(|end| idat.get(start..end)),
                }
                .ok_or_else(|| invalid("extent lies outside idat"))?;
                data.extend_from_slice(extent);
                if data.len() > limit {
                    return Err(FormatError::TooLarge { limit }.into());
                }
            }
        }
        2 => return Err(invalid("item-offset construction is not supported").into()),
        other => {
            return Err(invalid(format!("invalid construction method {}", other)).into());
        }
    }

    Ok(data)
}

fn find_exif_item_id(body: &[u8]) -> Result<Option<u32>, FormatError> {
    let mut cursor = BoxCursor::new(body);
    let (version, _flags) = cursor.full_box_header()?;
    let entry_count = match version {
        0 => cursor.u16()? as u32,
        _ => cursor.u32()?,
    };

    let mut found = None;
    for _ in 0..entry_count {
        let (boxtype, infe) = cursor.child_box()?;
        if boxtype != b"infe" {
            continue;
        }
        let mut infe = BoxCursor::new(infe);
        let (version, _flags) = infe.full_box_header()?;
        let item_id = match version {
            2 => infe.u16()? as u32,
            3 => infe.u32()?,
            // Versions 0 and 1 carry no item type
            _ => continue,
        };
        // item_protection_index
        infe.take(2)?;
        if infe.take(4)? == b"Exif" {
            found = Some(item_id);
        }
    }
    Ok(found)
}

fn find_item_location(body: &[u8], wanted: u32) -> Result<Option<ItemLocation>, FormatError> {
    let mut cursor = BoxCursor::new(body);
    let (version, _flags) = cursor.full_box_header()?;
    if version > 2 {
        return Err(invalid(format!("unsupported iloc version {}", version)));
    }

    let sizes = cursor.u16()?;
    let offset_size = (sizes >> 12) as usize;
    let length_size = (sizes >> 8 & 0xF) as usize;
    let base_offset_size = (sizes >> 4 & 0xF) as usize;
    let index_size = match version {
        0 => 0,
        _ => (sizes & 0xF) as usize,
    };

    let item_count = match version {
        2 => cursor.u32()?,
        _ => cursor.u16()? as u32,
    };

    for _ in 0..item_count {
        let item_id = match version {
            2 => cursor.u32()?,
            _ => cursor.u16()? as u32,
        };
        let construction_method = match version {
            0 => 0,
            _ => cursor.take(2)?[1] & 0xF,
        };
        let data_reference_index = cursor.u16()?;
        if construction_method == 0 && data_reference_index != 0 {
            return Err(invalid("external data references are not supported"));
        }
        let base_offset = cursor.sized(base_offset_size)?;
        let extent_count = cursor.u16()?;

        let mut extents = Vec::with_capacity(extent_count as usize);
        for _ in 0..extent_count {
            cursor.sized(index_size)?;
            let offset = cursor.sized(offset_size)?;
            let length = cursor.sized(length_size)?;
            extents.push((offset, length));
        }

        if item_id == wanted {
            return Ok(Some(ItemLocation {
                construction_method,
                base_offset,
                extents,
            }));
        }
    }
    Ok(None)
}

// =============================================================================
// BoxCursor
// =============================================================================

/// Sequential big-endian reader over an in-memory box body.
struct BoxCursor<'a> {
    rest: &'a [u8],
}

impl<'a> BoxCursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { rest: data }
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if n > self.rest.len() {
            return Err(invalid("box too small"));
        }
        let (head, tail) = self.rest.split_at(n);
        self.rest = tail;
        Ok(head)
    }

    fn u16(&mut self) -> Result<u16, FormatError> {
        self.take(2).map(read_u16_be)
    }

    fn u32(&mut self) -> Result<u32, FormatError> {
        self.take(4).map(read_u32_be)
    }

    fn u64(&mut self) -> Result<u64, FormatError> {
        self.take(8).map(read_u64_be)
    }

    fn array4(&mut self) -> Result<[u8; 4], FormatError> {
        let b = self.take(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    /// Read a 0-, 4- or 8-byte unsigned field.
    fn sized(&mut self, size: usize) -> Result<u64, FormatError> {
        match size {
            0 => Ok(0),
            4 => self.u32().map(u64::from),
            8 => self.u64(),
            other => Err(invalid(format!("invalid field size {}", other))),
        }
    }

    /// Returns version and flags.
    fn full_box_header(&mut self) -> Result<(u8, u32), FormatError> {
        let word = self.u32()?;
        Ok(((word >> 24) as u8, word & 0x00FF_FFFF))
    }

    /// Returns the type and body of the next child box.
    fn child_box(&mut self) -> Result<(&'a [u8], &'a [u8]), FormatError> {
        let size = self.u32()?;
        let boxtype = self.take(4)?;
        let body_len = match size {
            0 => Some(self.rest.len()),
            1 => usize::try_from(self.u64()?)
                .ok()
                .and_then(|s| s.checked_sub(16)),
            n => (n as usize).checked_sub(8),
        }
        .ok_or_else(|| invalid("invalid box size"))?;
        let body = self.take(body_len)?;
        Ok((boxtype, body))
    }
}

// =============================================================================
// Tests
// =============================================================================
