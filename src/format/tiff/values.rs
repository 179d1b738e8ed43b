//! Tag value model.
//!
//! A [`Tag`] keeps the raw value bytes of one directory entry together with
//! the byte order they were written in. Typed reads happen on demand, either
//! element by element ([`Tag::int`], [`Tag::rational`], [`Tag::float`]) or
//! all at once through the [`TagValue`] tagged union.

use std::fmt;

use bytes::Bytes;

use crate::error::{TagError, TiffError};

use super::parser::ByteOrder;
use super::tags::{FieldType, ValueFormat};

// =============================================================================
// Tag
// =============================================================================

/// One decoded directory entry.
///
/// Invariant: `raw().len() == count() * field_type().size_in_bytes()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: u16,
    field_type: FieldType,
    count: u32,
    byte_order: ByteOrder,
    value_offset: u32,
    raw: Bytes,
}

impl Tag {
    /// Build a tag, checking the raw length against count and type.
    pub fn new(
        id: u16,
        field_type: FieldType,
        count: u32,
        byte_order: ByteOrder,
        value_offset: u32,
        raw: Bytes,
    ) -> Result<Self, TiffError> {
        let expected = (count as usize).checked_mul(field_type.size_in_bytes());
        if expected != Some(raw.len()) {
            return Err(TiffError::LengthMismatch {
                tag: id,
                field_type,
                count,
                len: raw.len(),
            });
        }
        Ok(Self {
            id,
            field_type,
            count,
            byte_order,
            value_offset,
            raw,
        })
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Offset of the value bytes in the buffer the tag was decoded from.
    #[inline]
    pub fn value_offset(&self) -> u32 {
        self.value_offset
    }

    /// Raw value bytes, in the tag's byte order.
    #[inline]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Shared handle on the raw value bytes.
    #[inline]
    pub fn raw_bytes(&self) -> Bytes {
        self.raw.clone()
    }

    #[inline]
    pub fn format(&self) -> ValueFormat {
        self.field_type.format()
    }

    fn element(&self, expected: ValueFormat, index: usize) -> Result<&[u8], TagError> {
        if index >= self.count as usize {
            return Err(TagError::IndexOutOfRange {
                tag: self.id,
                index,
                count: self.count,
            });
        }
        let size = self.field_type.size_in_bytes();
        let start = index * size;
        self.raw
            .get(start..start + size)
            .ok_or(TagError::WrongFormat {
                tag: self.id,
                expected,
                found: self.field_type,
            })
    }

    fn wrong_format(&self, expected: ValueFormat) -> TagError {
        TagError::WrongFormat {
            tag: self.id,
            expected,
            found: self.field_type,
        }
    }

    /// Integer value at `index`. Only integer types qualify.
    pub fn int(&self, index: usize) -> Result<i64, TagError> {
        if self.format() != ValueFormat::Int {
            return Err(self.wrong_format(ValueFormat::Int));
        }
        let b = self.element(ValueFormat::Int, index)?;
        let order = self.byte_order;
        let value = match self.field_type {
            FieldType::Byte => b[0] as i64,
            FieldType::SByte => b[0] as i8 as i64,
            FieldType::Short => order.read_u16(b) as i64,
            FieldType::SShort => order.read_u16(b) as i16 as i64,
            FieldType::Long | FieldType::Ifd => order.read_u32(b) as i64,
            FieldType::SLong => order.read_u32(b) as i32 as i64,
            _ => return Err(self.wrong_format(ValueFormat::Int)),
        };
        Ok(value)
    }

    /// Numerator and denominator at `index`. Only rational types qualify.
    pub fn rational(&self, index: usize) -> Result<(i64, i64), TagError> {
        if self.format() != ValueFormat::Rational {
            return Err(self.wrong_format(ValueFormat::Rational));
        }
        let b = self.element(ValueFormat::Rational, index)?;
        let order = self.byte_order;
        let (num, den) = (order.read_u32(&b[0..4]), order.read_u32(&b[4..8]));
        Ok(match self.field_type {
            FieldType::SRational => (num as i32 as i64, den as i32 as i64),
            _ => (num as i64, den as i64),
        })
    }

    /// Floating point value at `index`.
    ///
    /// Integers and rationals are converted; a zero denominator yields the
    /// numerator.
    pub fn float(&self, index: usize) -> Result<f64, TagError> {
        match self.format() {
            ValueFormat::Int => self.int(index).map(|v| v as f64),
            ValueFormat::Rational => self
                .rational(index)
                .map(|(num, den)| rational_to_f64(num, den)),
            ValueFormat::Float => {
                let b = self.element(ValueFormat::Float, index)?;
                Ok(match self.field_type {
                    FieldType::Float => f32::from_bits(self.byte_order.read_u32(b)) as f64,
                    _ => f64::from_bits(self.byte_order.read_u64(b)),
                })
            }
            _ => Err(self.wrong_format(ValueFormat::Float)),
        }
    }

    /// ASCII value, cut at the first NUL.
    pub fn string_val(&self) -> Result<String, TagError> {
        if self.field_type != FieldType::Ascii {
            return Err(self.wrong_format(ValueFormat::String));
        }
        let end = self
            .raw
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.raw.len());
        Ok(String::from_utf8_lossy(&self.raw[..end]).into_owned())
    }

    /// Decode every element into a typed vector.
    pub fn value(&self) -> TagValue {
        let order = self.byte_order;
        let raw = &self.raw[..];
        match self.field_type {
            FieldType::Byte => TagValue::Byte(raw.to_vec()),
            FieldType::Undefined => TagValue::Undefined(raw.to_vec()),
            FieldType::SByte => TagValue::SByte(raw.iter().map(|&b| b as i8).collect()),
            FieldType::Ascii => {
                let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
                TagValue::Ascii(String::from_utf8_lossy(&raw[..end]).into_owned())
            }
            FieldType::Short => TagValue::Short(raw.chunks_exact(2).map(|c| order.read_u16(c)).collect()),
            FieldType::SShort => {
                TagValue::SShort(raw.chunks_exact(2).map(|c| order.read_u16(c) as i16).collect())
            }
            FieldType::Long | FieldType::Ifd => {
                TagValue::Long(raw.chunks_exact(4).map(|c| order.read_u32(c)).collect())
            }
            FieldType::SLong => {
                TagValue::SLong(raw.chunks_exact(4).map(|c| order.read_u32(c) as i32).collect())
            }
            FieldType::Rational => TagValue::Rational(
                raw.chunks_exact(8)
                    .map(|c| (order.read_u32(&c[0..4]), order.read_u32(&c[4..8])))
                    .collect(),
            ),
            FieldType::SRational => TagValue::SRational(
                raw.chunks_exact(8)
                    .map(|c| {
                        (
                            order.read_u32(&c[0..4]) as i32,
                            order.read_u32(&c[4..8]) as i32,
                        )
                    })
                    .collect(),
            ),
            FieldType::Float => TagValue::Float(
                raw.chunks_exact(4)
                    .map(|c| f32::from_bits(order.read_u32(c)))
                    .collect(),
            ),
            FieldType::Double => TagValue::Double(
                raw.chunks_exact(8)
                    .map(|c| f64::from_bits(order.read_u64(c)))
                    .collect(),
            ),
        }
    }
}

/// Convert a rational to `f64`, falling back to the numerator when the
/// denominator is zero.
#[inline]
pub fn rational_to_f64(num: i64, den: i64) -> f64 {
    if den == 0 {
        num as f64
    } else {
        num as f64 / den as f64
    }
}

// =============================================================================
// TagValue
// =============================================================================

/// Fully decoded tag value, one variant per TIFF type.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Byte(Vec<u8>),
    Ascii(String),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SByte(Vec<i8>),
    Undefined(Vec<u8>),
    SShort(Vec<i16>),
    SLong(Vec<i32>),
    SRational(Vec<(i32, i32)>),
    Float(Vec<f32>),
    Double(Vec<f64>),
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    if items.len() == 1 {
        return write!(f, "{}", items[0]);
    }
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

fn write_rationals<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[(T, T)]) -> fmt::Result {
    let quoted: Vec<String> = items.iter().map(|(n, d)| format!("\"{n}/{d}\"")).collect();
    if quoted.len() == 1 {
        return write!(f, "{}", quoted[0]);
    }
    write!(f, "[{}]", quoted.join(","))
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Ascii(s) => write!(f, "{s:?}"),
            TagValue::Byte(v) => write_list(f, v),
            TagValue::Short(v) => write_list(f, v),
            TagValue::Long(v) => write_list(f, v),
            TagValue::SByte(v) => write_list(f, v),
            TagValue::SShort(v) => write_list(f, v),
            TagValue::SLong(v) => write_list(f, v),
            TagValue::Float(v) => write_list(f, v),
            TagValue::Double(v) => write_list(f, v),
            TagValue::Rational(v) => write_rationals(f, v),
            TagValue::SRational(v) => write_rationals(f, v),
            TagValue::Undefined(v) => {
                let printable = v
                    .iter()
                    .all(|&b| b.is_ascii_graphic() || b == b' ' || b == 0);
                if printable {
                    let text: String = v.iter().take_while(|&&b| b != 0).map(|&b| b as char).collect();
                    write!(f, "{text:?}")
                } else {
                    write!(f, "0x{}", hex::encode(v))
                }
            }
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value(), f)
    }
}

// =============================================================================
// Tests
// =============================================================================
