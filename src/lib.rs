//! # exif-decoder
//!
//! Decode EXIF metadata and vendor maker notes from JPEG, TIFF, HEIF/HEIC
//! and raw EXIF blocks.
//!
//! The decoder maps semantic field names (`Model`, `FNumber`,
//! `Canon.SerialNumber`, `Sony.ShutterCount`) to typed tag values. It
//! classifies the container, unwraps the embedded TIFF structure, decodes
//! the directory chain and then runs a chain of parsers. Each parser reads
//! fields bound by earlier ones and adds its own.
//!
//! ## Features
//!
//! - **Containers**: TIFF, JPEG APP1, HEIF `Exif` items, bare `Exif\0\0` blocks
//! - **Standard directories**: IFD0, thumbnail IFD, Exif, GPS and Interoperability sub-IFDs
//! - **Maker notes**: Apple, Canon, Nikon type 3, Sony (including the
//!   enciphered 0x9050 block) and Adobe DNG sub-IFDs
//! - **Accessors**: exposure, GPS position and time, capture time, focal
//!   length, preview images, Canon raw summary
//! - **Extensible**: register your own [`Parser`] in a [`ParserRegistry`]
//!
//! ## Architecture
//!
//! - [`mod@format`] - Container detection and the TIFF codec
//! - [`fields`] - Tag id to field name tables
//! - [`parser`] - Parser trait, registry and the standard parser
//! - [`makernote`] - Vendor maker-note parsers
//! - [`decode`] - The decode pipeline
//! - [`api`] - Derived-value accessors on [`Exif`]
//! - [`config`] - Decode options
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::File;
//!
//! use exif_decoder::{names, DecodeOptions, Decoder};
//!
//! let decoder = Decoder::new(DecodeOptions::default());
//! let exif = decoder.decode_seekable(File::open("photo.jpg").unwrap()).unwrap();
//!
//! println!("{}", exif.get_string(names::MODEL).unwrap_or_default());
//! if let Ok((lat, long)) = exif.lat_long() {
//!     println!("taken at {lat}, {long}");
//! }
//! ```

pub mod api;
pub mod config;
pub mod decode;
pub mod error;
pub mod exif;
pub mod fields;
pub mod format;
pub mod io;
pub mod makernote;
pub mod parser;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use api::{
    parse_degrees_string, ExposureBias, ExposureMode, FlashMode, GpsInfo, ImageRange,
    MeteringMode, Orientation, PreviewSource, ShutterSpeed,
};
pub use config::DecodeOptions;
pub use decode::{decode, Decoder};
pub use error::{
    DecodeError, FieldError, FormatError, ParseError, SubIfd, SubIfdErrors, TagError, TiffError,
};
pub use exif::Exif;
pub use fields::{names, FieldLookup, FieldTable};
pub use format::tiff::{ByteOrder, Directory, FieldType, Tag, TagValue, TiffFile};
pub use format::{ContainerKind, HeifExtractor, IsoBmffExtractor};
pub use makernote::{
    AdobeDngParser, AppleParser, CanonParser, CanonRaw, NikonV3Parser, SonyParser,
};
pub use parser::{Parser, ParserRegistry, StandardParser};
