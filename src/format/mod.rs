//! Container formats and the TIFF codec.
//!
//! EXIF data is always a TIFF structure, but it reaches us wrapped in one of
//! several containers. This module classifies the input and unwraps it:
//!
//! - **TIFF**: decoded directly
//! - **Raw EXIF**: `Exif\0\0` marker followed by TIFF
//! - **JPEG**: TIFF inside the EXIF APP1 segment
//! - **HEIF/HEIC**: TIFF inside the `Exif` item of the ISO-BMFF box tree
//!
//! Use [`detect::detect_container`] to classify the first eight bytes.

pub mod detect;
pub mod heif;
pub mod jpeg;
pub mod tiff;

pub use detect::{
    detect_container, strip_exif_marker, ContainerKind, DETECT_HEADER_SIZE,
    EXIF_MARKER,
};
pub use heif::{HeifExtractor, IsoBmffExtractor, ReadSeek};
pub use jpeg::extract_exif as extract_jpeg_exif;
