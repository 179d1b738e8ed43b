//! TIFF codec for EXIF blocks.
//!
//! # Key Concepts
//!
//! - **Byte order**: the header declares endianness (II = little-endian,
//!   MM = big-endian). Every multi-byte value, including those inside most
//!   maker notes, is read in that order.
//!
//! - **IFD (Image File Directory)**: a counted list of 12-byte entries plus
//!   the offset of the next IFD. EXIF uses IFD0 for the primary image, IFD1
//!   for the thumbnail, and pointer tags for the Exif, GPS and
//!   Interoperability sub-IFDs.
//!
//! - **Inline vs offset values**: values of four bytes or less are stored in
//!   the entry itself; larger values are stored at an offset from the start
//!   of the TIFF buffer.

mod parser;
mod tags;
mod values;

pub use parser::{
    decode_directory, find_tiff_header, ByteOrder, Directory, TiffFile, TiffHeader,
    IFD_ENTRY_SIZE, TIFF_HEADER_SIZE,
};
pub use tags::{FieldType, ValueFormat};
pub use values::{rational_to_f64, Tag, TagValue};
