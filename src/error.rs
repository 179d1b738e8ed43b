use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::exif::Exif;
use crate::format::tiff::{FieldType, ValueFormat};

/// Errors raised while decoding the TIFF structure of an EXIF block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TiffError {
    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// Invalid TIFF version number
    #[error("Invalid TIFF version: expected 42, got {0}")]
    InvalidVersion(u16),

    /// Buffer is too small to contain the requested structure
    #[error("Buffer too small: need at least {required} bytes, got {actual}")]
    BufferTooSmall { required: u64, actual: u64 },

    /// IFD offset points outside the buffer
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// IFD chain points back at a directory that was already decoded
    #[error("IFD chain loops back to offset {0}")]
    IfdCycle(u64),

    /// Directory entry count does not fit in the buffer
    #[error("IFD at offset {offset} declares {count} entries but the buffer ends at {len}")]
    TruncatedDirectory { offset: u64, count: u16, len: u64 },

    /// Unknown field type in IFD entry
    #[error("Unknown field type {field_type} for tag 0x{tag:04x}")]
    UnknownFieldType { tag: u16, field_type: u16 },

    /// Entry declares zero values
    #[error("Zero length value for tag 0x{0:04x}")]
    ZeroLengthValue(u16),

    /// Entry value lies (partly) outside the buffer
    #[error("Value of tag 0x{tag:04x} ({len} bytes at offset {offset}) is out of bounds")]
    ValueOutOfBounds { tag: u16, offset: u64, len: u64 },

    /// Raw value length does not match count × type size
    #[error("Tag 0x{tag:04x}: {len} value bytes do not match count {count} of {field_type:?}")]
    LengthMismatch {
        tag: u16,
        field_type: FieldType,
        count: u32,
        len: usize,
    },
}

/// Errors related to container detection and EXIF extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Not enough bytes to classify the input
    #[error("Input too short: need {required} header bytes, got {actual}")]
    ShortHeader { required: usize, actual: usize },

    /// The `Exif\0\0` marker is missing or wrong
    #[error("Unexpected EXIF marker: got {0:?}")]
    InvalidExifMarker(Vec<u8>),

    /// No EXIF-tagged APP1 segment before the image data
    #[error("No EXIF APP1 segment found")]
    NoExif,

    /// Malformed JPEG marker structure
    #[error("Invalid JPEG structure: {0}")]
    InvalidJpeg(String),

    /// Malformed ISO-BMFF box structure
    #[error("Invalid HEIF structure: {0}")]
    InvalidHeif(String),

    /// HEIF file lacks an Exif item
    #[error("HEIF file has no Exif item")]
    NoHeifExif,

    /// No TIFF header anywhere in the scanned window
    #[error("No TIFF header found in the first {scanned} bytes")]
    NoTiffHeader { scanned: usize },

    /// Data exceeds the configured size cap
    #[error("EXIF data exceeds the {limit} byte limit")]
    TooLarge { limit: usize },
}

/// Identity of one of the standard sub-IFD traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubIfd {
    Exif,
    Gps,
    Interoperability,
}

impl SubIfd {
    /// Stage description used when reporting a failure.
    pub const fn stage(self) -> &'static str {
        match self {
            SubIfd::Exif => "loading EXIF sub-IFD",
            SubIfd::Gps => "loading GPS sub-IFD",
            SubIfd::Interoperability => "loading Interoperability sub-IFD",
        }
    }
}

/// Failures of the standard sub-IFD traversals, keyed by stage.
///
/// A non-empty value means the decode is degraded but usable: every field
/// outside the failed stages was still loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubIfdErrors {
    errors: BTreeMap<SubIfd, TiffError>,
}

impl SubIfdErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: SubIfd, error: TiffError) {
        self.errors.insert(stage, error);
    }

    pub fn get(&self, stage: SubIfd) -> Option<&TiffError> {
        self.errors.get(&stage)
    }

    pub fn contains(&self, stage: SubIfd) -> bool {
        self.errors.contains_key(&stage)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubIfd, &TiffError)> {
        self.errors.iter().map(|(stage, err)| (*stage, err))
    }
}

impl fmt::Display for SubIfdErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (stage, err)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", stage.stage(), err)?;
        }
        Ok(())
    }
}

impl std::error::Error for SubIfdErrors {}

/// Typed value coercion failures on a tag that is present.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// Value is stored in a different format than requested
    #[error("Tag 0x{tag:04x} is {found:?}, not a {expected:?} value")]
    WrongFormat {
        tag: u16,
        expected: ValueFormat,
        found: FieldType,
    },

    /// Element index past the tag's count
    #[error("Index {index} out of range for tag 0x{tag:04x} with {count} values")]
    IndexOutOfRange { tag: u16, index: usize, count: u32 },
}

/// Errors returned by field lookups and derived-value accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The named field was never bound
    #[error("exif: tag {0:?} is not present")]
    NotPresent(String),

    /// The field exists but its value has the wrong type or arity
    #[error("exif: field {field}: {source}")]
    Value {
        field: String,
        #[source]
        source: TagError,
    },

    /// The field exists but its content cannot be interpreted
    #[error("exif: cannot parse {field}: {reason}")]
    Unparsable { field: String, reason: String },
}

impl FieldError {
    pub fn is_not_present(&self) -> bool {
        matches!(self, FieldError::NotPresent(_))
    }

    pub(crate) fn value(field: &str, source: TagError) -> Self {
        FieldError::Value {
            field: field.to_string(),
            source,
        }
    }

    pub(crate) fn unparsable(field: &str, reason: impl Into<String>) -> Self {
        FieldError::Unparsable {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Outcome of a single parser run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The TIFF structure did not contain a single directory
    #[error("invalid exif data: no image file directory")]
    NoDirectories,

    /// One or more standard sub-IFDs failed to load
    #[error("{0}")]
    SubIfds(#[from] SubIfdErrors),

    /// A maker note matched its vendor signature but is corrupt
    #[error("{vendor} maker note: {source}")]
    MakerNote {
        vendor: &'static str,
        #[source]
        source: TiffError,
    },

    /// A field required by the parser could not be read
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Top-level decode error.
///
/// `Io`, `Format` and `Tiff` are fatal and carry no result. `Partial` and
/// `Parser` carry the fields loaded before the failure.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Reading the input stream failed
    #[error("exif: I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container detection or extraction failed
    #[error("exif: decode failed ({0})")]
    Format(#[from] FormatError),

    /// Top-level TIFF structure is corrupt
    #[error("exif: decode failed ({0})")]
    Tiff(#[from] TiffError),

    /// Some standard sub-IFDs failed; the result is still usable
    #[error("{errors}")]
    Partial {
        exif: Box<Exif>,
        errors: SubIfdErrors,
    },

    /// A parser failed; decoding stopped after it
    #[error("exif: parser {parser} failed ({source})")]
    Parser {
        parser: &'static str,
        exif: Box<Exif>,
        #[source]
        source: ParseError,
    },
}

impl DecodeError {
    /// Reports whether the error leaves no usable result.
    pub fn is_critical(&self) -> bool {
        !matches!(self, DecodeError::Partial { .. })
    }

    /// Reports whether the EXIF sub-IFD failed to load.
    pub fn is_exif_error(&self) -> bool {
        self.has_stage(SubIfd::Exif)
    }

    /// Reports whether the GPS sub-IFD failed to load.
    pub fn is_gps_error(&self) -> bool {
        self.has_stage(SubIfd::Gps)
    }

    /// Reports whether the Interoperability sub-IFD failed to load.
    pub fn is_interoperability_error(&self) -> bool {
        self.has_stage(SubIfd::Interoperability)
    }

    /// Reports whether a tag value ran past the end of the buffer.
    pub fn is_short_read(&self) -> bool {
        matches!(self, DecodeError::Tiff(TiffError::ValueOutOfBounds { .. }))
    }

    fn has_stage(&self, stage: SubIfd) -> bool {
        match self {
            DecodeError::Partial { errors, .. } => errors.contains(stage),
            _ => false,
        }
    }

    /// Fields loaded before the failure, if any.
    pub fn exif(&self) -> Option<&Exif> {
        match self {
            DecodeError::Partial { exif, .. } | DecodeError::Parser { exif, .. } => Some(exif),
            _ => None,
        }
    }

    /// Takes the fields loaded before the failure, if any.
    pub fn into_exif(self) -> Option<Exif> {
        match self {
            DecodeError::Partial { exif, .. } | DecodeError::Parser { exif, .. } => Some(*exif),
            _ => None,
        }
    }

    /// Splits a partial result into the usable data and the stage errors.
    ///
    /// Any other error is returned unchanged.
    pub fn into_partial(self) -> Result<(Exif, SubIfdErrors), DecodeError> {
        match self {
            DecodeError::Partial { exif, errors } => Ok((*exif, errors)),
            other => Err(other),
        }
    }
}
