//! Decode configuration.
//!
//! Options can be built in code, deserialized from a host application's
//! configuration file, or read from the environment:
//!
//! - `EXIF_KEEP_UNKNOWN_TAGS`: `true`/`false` (also `1`/`0`)
//! - `EXIF_MAX_SIZE`: byte cap, with an optional `KB`/`MB` suffix

use serde::Deserialize;

// =============================================================================
// Defaults
// =============================================================================

/// Upper bound on bytes read from the input before giving up (4 MiB).
pub const DEFAULT_MAX_EXIF_SIZE: usize = 4 * 1024 * 1024;

/// Unknown tag ids are dropped unless asked otherwise.
pub const DEFAULT_KEEP_UNKNOWN_TAGS: bool = false;

const ENV_KEEP_UNKNOWN_TAGS: &str = "EXIF_KEEP_UNKNOWN_TAGS";
const ENV_MAX_SIZE: &str = "EXIF_MAX_SIZE";

// =============================================================================
// DecodeOptions
// =============================================================================

/// Options recognized by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Surface unknown tag ids under a synthesized `UnknownTag_<hex>` name.
    pub keep_unknown_tags: bool,

    /// Maximum number of bytes read from the input. Zero selects the default.
    pub max_exif_size: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            keep_unknown_tags: DEFAULT_KEEP_UNKNOWN_TAGS,
            max_exif_size: DEFAULT_MAX_EXIF_SIZE,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_unknown_tags(mut self, keep: bool) -> Self {
        self.keep_unknown_tags = keep;
        self
    }

    pub fn max_exif_size(mut self, size: usize) -> Self {
        self.max_exif_size = size;
        self
    }

    /// The size cap actually applied, with zero mapped to the default.
    pub fn effective_max_size(&self) -> usize {
        if self.max_exif_size == 0 {
            DEFAULT_MAX_EXIF_SIZE
        } else {
            self.max_exif_size
        }
    }

    /// Validate the options and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        // A TIFF header alone is 8 bytes; anything smaller can never decode.
        if self.max_exif_size != 0 && self.max_exif_size < 8 {
            return Err("max_exif_size must be 0 (default) or at least 8 bytes".to_string());
        }
        Ok(())
    }

    /// Options with environment overrides applied on top of the defaults.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut options = Self::default();

        if let Some(value) = lookup(ENV_KEEP_UNKNOWN_TAGS) {
            options.keep_unknown_tags = parse_bool(&value)
                .ok_or_else(|| format!("{ENV_KEEP_UNKNOWN_TAGS}: expected a boolean, got {value:?}"))?;
        }
        if let Some(value) = lookup(ENV_MAX_SIZE) {
            options.max_exif_size = parse_size(&value)
                .ok_or_else(|| format!("{ENV_MAX_SIZE}: expected a byte size, got {value:?}"))?;
        }

        options.validate()?;
        Ok(options)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse `4194304`, `4096KB` or `4MB` (case-insensitive, binary units).
fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim().to_ascii_uppercase();
    let (digits, multiplier) = if let Some(n) = value.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = value.strip_suffix("KB") {
        (n, 1024)
    } else {
        (value.as_str(), 1)
    };
    digits.trim().parse::<usize>().ok()?.checked_mul(multiplier)
}

// =============================================================================
// Tests
// =============================================================================
