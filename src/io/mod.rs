//! Byte-level readers shared by the container and TIFF decoders.

mod endian;
mod stream;

pub use endian::{
    read_u16_be, read_u16_le, read_u24_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le,
};
pub use stream::{read_capped, read_header};
