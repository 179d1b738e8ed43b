//! Decode orchestration.
//!
//! [`Decoder`] ties the pipeline together:
//!
//! 1. Read the first eight bytes and classify the container
//! 2. Unwrap the TIFF block (JPEG APP1, raw `Exif\0\0` block, HEIF item)
//! 3. Decode the top-level IFD chain
//! 4. Run the parser chain in registration order
//!
//! Failures in steps 1 to 3 are fatal. In step 4 any parser failure stops
//! the chain. Sub-IFD failures of the standard parser come back as
//! [`DecodeError::Partial`], so the fields loaded so far stay usable.

use std::io::{Cursor, Read, Seek, SeekFrom};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::config::DecodeOptions;
use crate::error::{DecodeError, FormatError, ParseError};
use crate::exif::Exif;
use crate::format::tiff::{find_tiff_header, TiffFile};
use crate::format::{
    detect_container, extract_jpeg_exif, strip_exif_marker, ContainerKind, HeifExtractor,
    IsoBmffExtractor, DETECT_HEADER_SIZE, EXIF_MARKER,
};
use crate::io::{read_capped, read_header};
use crate::parser::ParserRegistry;

/// Reusable EXIF decoder.
///
/// A decoder is immutable once built and can be shared between threads.
pub struct Decoder {
    registry: ParserRegistry,
    options: DecodeOptions,
    heif: Box<dyn HeifExtractor>,
}

impl Decoder {
    /// Decoder with every built-in parser.
    pub fn new(options: DecodeOptions) -> Self {
        Self::with_registry(ParserRegistry::default(), options)
    }

    /// Decoder running the given parser chain.
    pub fn with_registry(registry: ParserRegistry, options: DecodeOptions) -> Self {
        Self {
            registry,
            options,
            heif: Box::new(IsoBmffExtractor),
        }
    }

    /// Replace the HEIF EXIF extractor.
    pub fn with_heif_extractor<H: HeifExtractor + 'static>(mut self, extractor: H) -> Self {
        self.heif = Box::new(extractor);
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    pub fn registry(&self) -> &ParserRegistry {
        &self.registry
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Decode a TIFF, raw EXIF, JPEG or HEIF stream.
    ///
    /// HEIF needs random access, so a HEIF stream is buffered first, up to
    /// the configured size cap.
    pub fn decode<R: Read>(&self, mut reader: R) -> Result<Exif, DecodeError> {
        let limit = self.options.effective_max_size();
        let (header, kind) = read_container_header(&mut reader)?;

        let tiff = match kind {
            ContainerKind::Heif => {
                let mut data = header.to_vec();
                data.extend(read_capped(reader, limit.saturating_sub(header.len()))?);
                self.heif.extract(&mut Cursor::new(data), limit)?
            }
            _ => unwrap_stream(kind, &header, reader, limit)?,
        };
        self.decode_tiff(Bytes::from(tiff))
    }

    /// Decode from a seekable source; HEIF item data is read in place.
    pub fn decode_seekable<R: Read + Seek>(&self, mut reader: R) -> Result<Exif, DecodeError> {
        let limit = self.options.effective_max_size();
        let (header, kind) = read_container_header(&mut reader)?;

        let tiff = match kind {
            ContainerKind::Heif => {
                reader.seek(SeekFrom::Current(-(header.len() as i64)))?;
                self.heif.extract(&mut reader, limit)?
            }
            _ => unwrap_stream(kind, &header, reader, limit)?,
        };
        self.decode_tiff(Bytes::from(tiff))
    }

    /// Decode an in-memory file.
    pub fn decode_bytes(&self, data: &[u8]) -> Result<Exif, DecodeError> {
        self.decode_seekable(Cursor::new(data))
    }

    /// Decode the first TIFF header found anywhere in the leading bytes.
    ///
    /// Reads up to the size cap and scans it for `II`/`MM` followed by 42.
    /// Useful for containers the detector does not know.
    pub fn decode_with_header_scan<R: Read>(&self, reader: R) -> Result<Exif, DecodeError> {
        let limit = self.options.effective_max_size();
        let data = Bytes::from(read_capped(reader, limit)?);
        let start = find_tiff_header(&data).ok_or(FormatError::NoTiffHeader {
            scanned: data.len(),
        })?;
        debug!(start, "Found TIFF header");
        self.decode_tiff(data.slice(start..))
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    fn decode_tiff(&self, raw: Bytes) -> Result<Exif, DecodeError> {
        let tiff = TiffFile::decode(&raw)?;
        debug!(
            directories = tiff.dirs.len(),
            len = raw.len(),
            "Decoded TIFF structure"
        );
        let exif = Exif::new(tiff, raw, self.options);
        self.run_parsers(exif)
    }

    fn run_parsers(&self, mut exif: Exif) -> Result<Exif, DecodeError> {
        for parser in self.registry.iter() {
            let before = exif.len();
            match parser.parse(&mut exif) {
                Ok(()) => {}
                Err(ParseError::SubIfds(errors)) => {
                    debug!(
                        parser = parser.name(),
                        failed = errors.len(),
                        "Sub-IFD failures, stopping parser chain"
                    );
                    return Err(DecodeError::Partial {
                        exif: Box::new(exif),
                        errors,
                    });
                }
                Err(source) => {
                    return Err(DecodeError::Parser {
                        parser: parser.name(),
                        exif: Box::new(exif),
                        source,
                    });
                }
            }
            trace!(
                parser = parser.name(),
                added = exif.len().saturating_sub(before),
                "Parser finished"
            );
        }

        Ok(exif)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecodeOptions::default())
    }
}

/// Decode with default options and every built-in parser.
pub fn decode<R: Read>(reader: R) -> Result<Exif, DecodeError> {
    Decoder::default().decode(reader)
}

fn read_container_header<R: Read>(
    reader: &mut R,
) -> Result<([u8; DETECT_HEADER_SIZE], ContainerKind), DecodeError> {
    let (header, filled) = read_header::<_, DETECT_HEADER_SIZE>(reader)?;
    let kind = detect_container(&header[..filled])?;
    debug!(container = kind.name(), "Detected container");
    Ok((header, kind))
}

/// Unwrap the TIFF block of a non-HEIF container.
fn unwrap_stream<R: Read>(
    kind: ContainerKind,
    header: &[u8],
    reader: R,
    limit: usize,
) -> Result<Vec<u8>, DecodeError> {
    let stream = header.chain(reader);
    match kind {
        ContainerKind::Tiff => Ok(read_capped(stream, limit)?),
        ContainerKind::RawExif => {
            let data = read_capped(stream, limit + EXIF_MARKER.len())?;
            Ok(strip_exif_marker(&data)?.to_vec())
        }
        ContainerKind::Jpeg => extract_jpeg_exif(stream.take(limit as u64)),
        ContainerKind::Heif => Err(FormatError::InvalidHeif(
            "HEIF input needs the HEIF extractor".to_string(),
        )
        .into()),
    }
}

// =============================================================================
// Tests
// =============================================================================
