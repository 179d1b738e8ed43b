//! Parser chain.
//!
//! After the top-level TIFF structure is decoded, every registered parser
//! runs in registration order against the same [`Exif`]. Each parser reads
//! fields bound by its predecessors (the maker-note parsers need `Make`,
//! `Model` and `MakerNote` from the standard parser) and binds new ones.

mod standard;

use std::fmt;

pub use standard::StandardParser;

use crate::error::ParseError;
use crate::exif::Exif;
use crate::makernote::{AdobeDngParser, AppleParser, CanonParser, NikonV3Parser, SonyParser};

/// A step of the decode pipeline that adds fields to an [`Exif`].
pub trait Parser: Send + Sync {
    /// Name used in logs and in [`DecodeError::Parser`](crate::DecodeError::Parser).
    fn name(&self) -> &'static str;

    fn parse(&self, exif: &mut Exif) -> Result<(), ParseError>;
}

/// Ordered list of parsers run by a [`Decoder`](crate::Decoder).
pub struct ParserRegistry {
    parsers: Vec<Box<dyn Parser>>,
}

impl ParserRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Only the standard EXIF parser, without maker notes.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(StandardParser);
        registry
    }

    /// Append a parser; it runs after every parser registered before it.
    pub fn register<P: Parser + 'static>(&mut self, parser: P) -> &mut Self {
        self.parsers.push(Box::new(parser));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Parser> {
        self.parsers.iter().map(|p| p.as_ref())
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl Default for ParserRegistry {
    /// Standard parser followed by every maker-note parser.
    fn default() -> Self {
        let mut registry = Self::standard();
        registry
            .register(AppleParser)
            .register(CanonParser)
            .register(NikonV3Parser)
            .register(AdobeDngParser)
            .register(SonyParser);
        registry
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|p| p.name())).finish()
    }
}
