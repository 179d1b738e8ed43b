//! TIFF header and directory decoding.
//!
//! An EXIF block is a classic TIFF structure:
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD
//! ```
//!
//! Each IFD is a 2-byte entry count, `count` 12-byte entries and a 4-byte
//! offset to the next IFD (0 terminates the chain). Entry values of up to
//! four bytes are stored inline; larger values live at an offset relative to
//! the start of the buffer.

use std::collections::HashSet;

use bytes::Bytes;

use crate::error::TiffError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le};

use super::tags::FieldType;
use super::values::Tag;

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Upper bound on directories followed in one IFD chain.
const MAX_IFD_CHAIN: usize = 64;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read a u64 from a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values
    pub byte_order: ByteOrder,

    /// Offset to the first IFD
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse a TIFF header from the start of `bytes`.
    ///
    /// # Errors
    /// - `BufferTooSmall` if fewer than 8 bytes are available
    /// - `InvalidMagic` if byte order bytes are not II or MM
    /// - `InvalidVersion` if version is not 42
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::BufferTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let magic = u16::from_le_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(TiffError::InvalidMagic(magic)),
        };

        let version = byte_order.read_u16(&bytes[2..4]);
        if version != VERSION_TIFF {
            return Err(TiffError::InvalidVersion(version));
        }

        Ok(TiffHeader {
            byte_order,
            first_ifd_offset: byte_order.read_u32(&bytes[4..8]),
        })
    }
}

/// Find the first offset in `data` where a TIFF header starts.
///
/// Only the byte order marker and the version are checked, so the match
/// may still fail to decode.
pub fn find_tiff_header(data: &[u8]) -> Option<usize> {
    if data.len() < TIFF_HEADER_SIZE {
        return None;
    }
    (0..=data.len() - TIFF_HEADER_SIZE).find(|&i| TiffHeader::parse(&data[i..]).is_ok())
}

// =============================================================================
// Directory
// =============================================================================

/// An ordered sequence of tags decoded from one IFD.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    pub tags: Vec<Tag>,
    pub byte_order: ByteOrder,
}

impl Directory {
    /// Find a tag by id.
    pub fn get(&self, id: u16) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Decode one IFD starting at `offset` in `buf`.
///
/// Value offsets are interpreted relative to the start of `buf`. Returns the
/// directory and the offset of the next IFD (0 when there is none).
pub fn decode_directory(
    buf: &Bytes,
    offset: usize,
    byte_order: ByteOrder,
) -> Result<(Directory, u32), TiffError> {
    let count_bytes = offset
        .checked_add(2)
        .and_then(|end| buf.get(offset..end))
        .ok_or(TiffError::InvalidIfdOffset(offset as u64))?;
    let count = byte_order.read_u16(count_bytes);

    let entries_start = offset + 2;
    let entries_end = entries_start + count as usize * IFD_ENTRY_SIZE;
    if entries_end > buf.len() {
        return Err(TiffError::TruncatedDirectory {
            offset: offset as u64,
            count,
            len: buf.len() as u64,
        });
    }

    let mut tags = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let at = entries_start + i * IFD_ENTRY_SIZE;
        tags.push(decode_entry(buf, at, byte_order)?);
    }

    // A directory that ends exactly at the buffer end has no next pointer.
    let next = match buf.get(entries_end..entries_end + 4) {
        Some(b) => byte_order.read_u32(b),
        None => 0,
    };

    Ok((Directory { tags, byte_order }, next))
}

fn decode_entry(buf: &Bytes, at: usize, byte_order: ByteOrder) -> Result<Tag, TiffError> {
    let entry = &buf[at..at + IFD_ENTRY_SIZE];
    let id = byte_order.read_u16(&entry[0..2]);
    let raw_type = byte_order.read_u16(&entry[2..4]);
    let count = byte_order.read_u32(&entry[4..8]);

    let field_type = FieldType::from_u16(raw_type).ok_or(TiffError::UnknownFieldType {
        tag: id,
        field_type: raw_type,
    })?;
    if count == 0 {
        return Err(TiffError::ZeroLengthValue(id));
    }

    let len = (count as u64) * field_type.size_in_bytes() as u64;
    let value_offset = if len <= FieldType::INLINE_THRESHOLD as u64 {
        (at + 8) as u32
    } else {
        byte_order.read_u32(&entry[8..12])
    };

    let start = value_offset as u64;
    let end = start + len;
    if end > buf.len() as u64 {
        return Err(TiffError::ValueOutOfBounds {
            tag: id,
            offset: start,
            len,
        });
    }

    let raw = buf.slice(start as usize..end as usize);
    Tag::new(id, field_type, count, byte_order, value_offset, raw)
}

// =============================================================================
// TiffFile
// =============================================================================

/// The top-level directory chain of a TIFF buffer (IFD0, IFD1, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiffFile {
    pub byte_order: ByteOrder,
    pub dirs: Vec<Directory>,
}

impl TiffFile {
    /// Decode the header and follow the IFD chain.
    pub fn decode(buf: &Bytes) -> Result<Self, TiffError> {
        let header = TiffHeader::parse(buf)?;
        let byte_order = header.byte_order;

        let mut dirs = Vec::new();
        let mut seen = HashSet::new();
        let mut offset = header.first_ifd_offset;

        while offset != 0 {
            if !seen.insert(offset) || dirs.len() >= MAX_IFD_CHAIN {
                return Err(TiffError::IfdCycle(offset as u64));
            }
            if offset as usize >= buf.len() {
                return Err(TiffError::InvalidIfdOffset(offset as u64));
            }
            let (dir, next) = decode_directory(buf, offset as usize, byte_order)?;
            dirs.push(dir);
            offset = next;
        }

        Ok(TiffFile { byte_order, dirs })
    }
}

// =============================================================================
// Tests
// =============================================================================
