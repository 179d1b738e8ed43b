//! Shared builders for unit tests.

use bytes::Bytes;

use crate::config::DecodeOptions;
use crate::exif::Exif;
use crate::format::tiff::{ByteOrder, FieldType, Tag, TiffFile};

pub fn exif_with_raw(raw: Vec<u8>, byte_order: ByteOrder) -> Exif {
    let tiff = TiffFile {
        byte_order,
        dirs: Vec::new(),
    };
    Exif::new(tiff, Bytes::from(raw), DecodeOptions::default())
}

/// Empty little-endian result to bind fields into.
pub fn empty_exif() -> Exif {
    exif_with_raw(Vec::new(), ByteOrder::LittleEndian)
}

fn le_tag(id: u16, field_type: FieldType, count: usize, raw: Vec<u8>) -> Tag {
    Tag::new(
        id,
        field_type,
        count as u32,
        ByteOrder::LittleEndian,
        0,
        Bytes::from(raw),
    )
    .unwrap()
}

pub fn ascii(id: u16, text: &str) -> Tag {
    let mut raw = text.as_bytes().to_vec();
    raw.push(0);
    let count = raw.len();
    le_tag(id, FieldType::Ascii, count, raw)
}

pub fn byte_values(id: u16, values: &[u8]) -> Tag {
    le_tag(id, FieldType::Byte, values.len(), values.to_vec())
}

pub fn shorts(id: u16, values: &[u16]) -> Tag {
    let raw = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    le_tag(id, FieldType::Short, values.len(), raw)
}

pub fn longs(id: u16, values: &[u32]) -> Tag {
    let raw = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    le_tag(id, FieldType::Long, values.len(), raw)
}

pub fn rationals(id: u16, values: &[(u32, u32)]) -> Tag {
    let raw = values
        .iter()
        .flat_map(|(n, d)| n.to_le_bytes().into_iter().chain(d.to_le_bytes()))
        .collect();
    le_tag(id, FieldType::Rational, values.len(), raw)
}

pub fn srationals(id: u16, values: &[(i32, i32)]) -> Tag {
    let raw = values
        .iter()
        .flat_map(|(n, d)| n.to_le_bytes().into_iter().chain(d.to_le_bytes()))
        .collect();
    le_tag(id, FieldType::SRational, values.len(), raw)
}

/// An undefined-typed note located at `offset` in the TIFF buffer.
pub fn note(bytes: &[u8], offset: u32, byte_order: ByteOrder) -> Tag {
    Tag::new(
        0x927C,
        FieldType::Undefined,
        bytes.len() as u32,
        byte_order,
        offset,
        Bytes::copy_from_slice(bytes),
    )
    .unwrap()
}

/// Little-endian IFD entries: (id, type, count, 4 value bytes).
pub fn ifd_le(entries: &[(u16, u16, u32, [u8; 4])], next: u32) -> Vec<u8> {
    let mut data = (entries.len() as u16).to_le_bytes().to_vec();
    for (id, ty, count, value) in entries {
        data.extend_from_slice(&id.to_le_bytes());
        data.extend_from_slice(&ty.to_le_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(value);
    }
    data.extend_from_slice(&next.to_le_bytes());
    data
}
