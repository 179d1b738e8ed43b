//! Sony maker notes.
//!
//! The note is a bare IFD (optionally behind a 12-byte text header) whose
//! offsets are relative to the enclosing TIFF header. Only tag 0x9050 is
//! kept: a scrambled binary block with values at fixed, model-dependent
//! positions. After descrambling, a list of [`BinaryTag`] descriptors says
//! where each value lives for which camera models; every value found
//! becomes a pseudo-tag whose id is the descriptor index.

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::ParseError;
use crate::exif::Exif;
use crate::fields::{names, FieldLookup, FieldTable};
use crate::format::tiff::{ByteOrder, Directory, FieldType, Tag};
use crate::io::{read_u24_le, read_u32_le};
use crate::parser::Parser;

use super::{decode_in_place, maker_note, note_error};

/// Field name of the raw scrambled block.
pub const SONY_0X9050: &str = "Sony.0x9050";

pub const SONY_FIELDS: FieldTable = FieldTable::new(&[(0x9050, SONY_0X9050)]);

/// Text headers that shift the directory start by 12 bytes.
const HEADERS: [&[u8]; 5] = [
    b"SONY DSC \0",
    b"SONY CAM \0",
    b"SONY MOBILE \0",
    b"\0\0SONY PIC\0",
    b"VHAB     \0",
];

const HEADER_LEN: usize = 12;

/// Shortest note worth looking at.
const MIN_NOTE_LEN: usize = 13;

// =============================================================================
// Binary descriptors
// =============================================================================

/// How a value is stored in the 0x9050 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    /// Little-endian 24-bit integer
    Uint24,
    /// Little-endian 32-bit integer
    Uint32,
    /// Raw bytes rendered as lowercase hex
    Hex(usize),
}

impl BinaryKind {
    /// Bytes read from the block.
    pub const fn width(self) -> usize {
        match self {
            BinaryKind::Uint24 => 3,
            BinaryKind::Uint32 => 4,
            BinaryKind::Hex(len) => len,
        }
    }
}

/// One value at a fixed offset of the descrambled 0x9050 block.
#[derive(Debug, Clone, Copy)]
pub struct BinaryTag {
    pub field: &'static str,
    pub offset: usize,
    pub kind: BinaryKind,
    /// Model name prefixes the descriptor applies to
    pub models: &'static [&'static str],
    /// Keep the value even when every source byte is zero
    pub allow_null: bool,
}

impl BinaryTag {
    const fn new(
        field: &'static str,
        offset: usize,
        kind: BinaryKind,
        models: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            offset,
            kind,
            models,
            allow_null: false,
        }
    }

    pub fn applies_to(&self, model: &str) -> bool {
        self.models.iter().any(|prefix| model.starts_with(prefix))
    }

    /// Build the pseudo-tag for this descriptor, or `None` when the block is
    /// too short or the value is all zeros.
    fn extract(&self, id: u16, block: &[u8]) -> Option<Tag> {
        let src = block.get(self.offset..self.offset + self.kind.width())?;
        if !self.allow_null && src.iter().all(|&b| b == 0) {
            return None;
        }

        let (field_type, raw) = match self.kind {
            BinaryKind::Uint24 => (FieldType::Long, read_u24_le(src).to_le_bytes().to_vec()),
            BinaryKind::Uint32 => (FieldType::Long, read_u32_le(src).to_le_bytes().to_vec()),
            BinaryKind::Hex(_) => {
                let mut text = hex::encode(src).into_bytes();
                text.push(0);
                (FieldType::Ascii, text)
            }
        };
        let count = (raw.len() / field_type.size_in_bytes()) as u32;
        Tag::new(
            id,
            field_type,
            count,
            ByteOrder::LittleEndian,
            self.offset as u32,
            Bytes::from(raw),
        )
        .ok()
    }
}

impl FieldLookup for [BinaryTag] {
    fn field_name(&self, id: u16) -> Option<&str> {
        self.get(id as usize).map(|tag| tag.field)
    }
}

const SHUTTER_COUNT: &str = "Sony.ShutterCount";
const SHUTTER_COUNT2: &str = "Sony.ShutterCount2";
const SHUTTER_COUNT3: &str = "Sony.ShutterCount3";
const INTERNAL_SERIAL_NUMBER: &str = "Sony.InternalSerialNumber";
const INTERNAL_SERIAL_NUMBER2: &str = "Sony.InternalSerialNumber2";

/// Models using the 9050b/9050c block layout.
const MODELS_9050BC: &[&str] = &[
    "ILCA-99M2",
    "ILCE-1",
    "ILCE-6100",
    "ILCE-6300",
    "ILCE-6400",
    "ILCE-6500",
    "ILCE-6600",
    "ILCE-7C",
    "ILCE-7M3",
    "ILCE-7M4",
    "ILCE-7RM2",
    "ILCE-7RM3",
    "ILCE-7RM3A",
    "ILCE-7RM4",
    "ILCE-7RM4A",
    "ILCE-7RM5",
    "ILCE-7SM2",
    "ILCE-7SM3",
    "ILCE-9",
    "ILCE-9M2",
    "ILME-FX3",
    "ZV-E10",
];

/// Descriptors in evaluation order. When several descriptors for the same
/// field match a model, the last one with a value wins.
pub const SONY_0X9050_TAGS: &[BinaryTag] = &[
    BinaryTag::new(SHUTTER_COUNT, 0x3a, BinaryKind::Uint24, MODELS_9050BC),
    BinaryTag::new(
        SHUTTER_COUNT2,
        0x50,
        BinaryKind::Uint24,
        &[
            "ILCE-1",
            "ILCE-6100",
            "ILCE-6400",
            "ILCE-6600",
            "ILCE-7C",
            "ILCE-7M4",
            "ILCE-7RM4",
            "ILCE-7RM4A",
            "ILCE-7RM5",
            "ILCE-7SM3",
            "ILCE-9M2",
            "ILME-FX3",
            "ZV-E10",
        ],
    ),
    BinaryTag::new(
        SHUTTER_COUNT2,
        0x52,
        BinaryKind::Uint24,
        &["ILCE-7M3", "ILCE-7RM3", "ILCE-7RM3A"],
    ),
    BinaryTag::new(
        SHUTTER_COUNT2,
        0x58,
        BinaryKind::Uint24,
        &[
            "ILCE-6300",
            "ILCE-6400",
            "ILCE-6500",
            "ILCE-6600",
            "ILCE-7C",
            "ILCE-7M3",
            "ILCE-7RM2",
            "ILCE-7RM3",
            "ILCE-7RM3A",
            "ILCE-7RM4",
            "ILCE-7RM4A",
            "ILCE-7SM2",
            "ILCE-9",
            "ILCE-9M2",
            "ILCA-99M2",
            "ZV-E10",
        ],
    ),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x019f,
        BinaryKind::Uint32,
        &[
            "ILCE-6100",
            "ILCE-6400",
            "ILCE-6600",
            "ILCE-7C",
            "ILCE-7M3",
            "ILCE-7RM3",
            "ILCE-7RM3A",
            "ILCE-7RM4",
            "ILCE-7RM4A",
            "ILCE-9",
            "ILCE-9M2",
            "ZV-E10",
        ],
    ),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x01cb,
        BinaryKind::Uint32,
        &["ILCE-7RM2", "ILCE-7SM2"],
    ),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x01cd,
        BinaryKind::Uint32,
        &["ILCE-6300", "ILCE-6500", "ILCA-99M2"],
    ),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x000a,
        BinaryKind::Uint24,
        &["ILCE-6700", "ILCE-7CM2", "ILCE-7CR"],
    ),
    BinaryTag::new(
        SHUTTER_COUNT2,
        0x4c,
        BinaryKind::Uint24,
        &[
            "ILCE-7",
            "ILCE-7R",
            "ILCE-7S",
            "ILCE-7M2",
            "ILCE-5000",
            "ILCE-5100",
            "ILCE-6000",
            "ILCE-WX1",
        ],
    ),
    // 9050a layout. No model list, so this slot never matches.
    BinaryTag::new(SHUTTER_COUNT, 0x32, BinaryKind::Uint24, &[]),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x01a0,
        BinaryKind::Uint32,
        &["ILCE-5100", "ILCE-QX1", "ILCA-68", "ILCA-77M2"],
    ),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x01aa,
        BinaryKind::Uint32,
        &[
            "SLT-A58",
            "SLT-A99",
            "SLT-A99V",
            "HV",
            "NEX-3N",
            "NEX-5R",
            "NEX-5T",
            "NEX-6",
            "NEX-VG900",
            "NEX-VG30E",
            "ILCE-3000",
            "ILCE-3500",
            "ILCE-5000",
        ],
    ),
    BinaryTag::new(
        SHUTTER_COUNT3,
        0x01bd,
        BinaryKind::Uint32,
        &[
            "SLT-A37",
            "SLT-A37V",
            "SLT-A57",
            "SLT-A57V",
            "SLT-A65",
            "SLT-A65V",
            "SLT-A77",
            "SLT-A77V",
            "Lunar",
            "NEX-F3",
            "NEX-5N",
            "NEX-7",
            "NEX-VG20E",
        ],
    ),
    BinaryTag::new(
        INTERNAL_SERIAL_NUMBER,
        0x7c,
        BinaryKind::Uint32,
        &["ILCE-", "ILCA-", "Lunar", "NEX", "SLT-", "HV"],
    ),
    BinaryTag::new(
        INTERNAL_SERIAL_NUMBER,
        0x7c,
        BinaryKind::Hex(6),
        &["ILCE-1"],
    ),
    BinaryTag::new(
        INTERNAL_SERIAL_NUMBER2,
        0xf0,
        BinaryKind::Hex(5),
        &["SLT-", "HV", "ILCA-"],
    ),
    BinaryTag::new(
        INTERNAL_SERIAL_NUMBER,
        0x38,
        BinaryKind::Hex(6),
        &["ZV-E10M2"],
    ),
    BinaryTag::new(
        INTERNAL_SERIAL_NUMBER,
        0x88,
        BinaryKind::Hex(6),
        MODELS_9050BC,
    ),
];

// =============================================================================
// Descrambling
// =============================================================================

/// Inverse of the cipher `c = p^3 mod 249`; bytes from 249 up are stored
/// unchanged.
const DESCRAMBLE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        if i < 249 {
            table[i * i * i % 249] = i as u8;
        } else {
            table[i] = i as u8;
        }
        i += 1;
    }
    table
};

/// Descramble a 0x9050 block in place.
pub fn descramble(block: &mut [u8]) {
    for b in block {
        *b = DESCRAMBLE[*b as usize];
    }
}

/// Pseudo-tags for every descriptor that applies to `model` and has a
/// value in the descrambled `block`.
pub fn binary_tags(model: &str, block: &[u8]) -> Vec<Tag> {
    SONY_0X9050_TAGS
        .iter()
        .enumerate()
        .filter(|(_, desc)| desc.applies_to(model))
        .filter_map(|(id, desc)| desc.extract(id as u16, block))
        .collect()
}

// =============================================================================
// Parser
// =============================================================================

/// Parser for Sony and Hasselblad maker notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SonyParser;

impl Parser for SonyParser {
    fn name(&self) -> &'static str {
        "Sony"
    }

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError> {
        let model = match exif.get(names::MODEL) {
            Ok(tag) => tag.string_val().unwrap_or_default(),
            Err(_) => return Ok(()),
        };
        let make = match exif.get(names::MAKE) {
            Ok(tag) => tag.string_val().unwrap_or_default(),
            Err(_) => return Ok(()),
        };
        if make != "SONY" && make != "HASSELBLAD" {
            trace!(make = %make, "Maker note is not a Sony note");
            return Ok(());
        }
        let note = match maker_note(exif) {
            Some(note) if note.raw().len() >= MIN_NOTE_LEN => note,
            _ => return Ok(()),
        };

        let skip = if HEADERS.iter().any(|h| note.raw().starts_with(h)) {
            HEADER_LEN
        } else {
            0
        };
        let dir = decode_in_place(&note, skip, exif.byte_order()).map_err(note_error("Sony"))?;
        exif.load_tags(&dir, &SONY_FIELDS, false);

        let mut block = match dir.get(0x9050) {
            Some(tag) => tag.raw().to_vec(),
            None => return Ok(()),
        };
        descramble(&mut block);

        let tags = binary_tags(&model, &block);
        let pseudo = Directory {
            tags,
            byte_order: ByteOrder::LittleEndian,
        };
        let loaded = exif.load_tags(&pseudo, SONY_0X9050_TAGS, true);
        debug!(model = %model, loaded, "Loaded Sony 0x9050 values");
        Ok(())
    }
}
