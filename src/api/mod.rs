//! Derived-value accessors on [`Exif`].
//!
//! Each accessor reads one or more bound fields and interprets them. A
//! missing field is reported as [`FieldError::NotPresent`] so callers can
//! tell absence apart from a malformed value.

pub mod datetime;
pub mod gps;
pub mod models;
pub mod preview;

pub use gps::{parse_degrees_string, GpsInfo};
pub use models::{ExposureBias, ExposureMode, FlashMode, MeteringMode, Orientation, ShutterSpeed};
pub use preview::{ImageRange, PreviewSource, DEFAULT_PREVIEW_SOURCES};

use crate::error::FieldError;
use crate::exif::Exif;
use crate::fields::names;
use crate::format::tiff::{rational_to_f64, FieldType, Tag};
use crate::makernote::CanonRaw;

impl Exif {
    // -------------------------------------------------------------------------
    // Image and exposure
    // -------------------------------------------------------------------------

    /// Width and height from `ImageWidth`/`ImageLength`, or from the Exif
    /// `PixelXDimension`/`PixelYDimension` pair when the former is absent.
    pub fn image_size(&self) -> Result<(u32, u32), FieldError> {
        let (width, length) = if self.contains(names::IMAGE_WIDTH) {
            (names::IMAGE_WIDTH, names::IMAGE_LENGTH)
        } else {
            (names::PIXEL_X_DIMENSION, names::PIXEL_Y_DIMENSION)
        };
        Ok((self.uint_field(width)?, self.uint_field(length)?))
    }

    pub fn orientation(&self) -> Result<Orientation, FieldError> {
        let value = self.int_field(names::ORIENTATION, 0)?;
        Orientation::from_value(value).ok_or_else(|| {
            FieldError::unparsable(names::ORIENTATION, format!("unknown orientation {value}"))
        })
    }

    pub fn flash_mode(&self) -> Result<FlashMode, FieldError> {
        let value = self.int_field(names::FLASH, 0)?;
        Ok(FlashMode(value as u16))
    }

    pub fn exposure_bias(&self) -> Result<ExposureBias, FieldError> {
        let (num, den) = self.rational_field(names::EXPOSURE_BIAS_VALUE, 0)?;
        Ok(ExposureBias::new(num, den))
    }

    /// F-number from `FNumber`.
    pub fn aperture(&self) -> Result<f64, FieldError> {
        let (num, den) = self.rational_field(names::F_NUMBER, 0)?;
        Ok(rational_to_f64(num, den))
    }

    pub fn iso_speed(&self) -> Result<u32, FieldError> {
        self.uint_field(names::ISO_SPEED_RATINGS)
    }

    /// Exposure time from `ExposureTime`.
    pub fn shutter_speed(&self) -> Result<ShutterSpeed, FieldError> {
        let (num, den) = self.rational_field(names::EXPOSURE_TIME, 0)?;
        Ok(ShutterSpeed::new(num, den))
    }

    pub fn metering_mode(&self) -> Result<MeteringMode, FieldError> {
        self.int_field(names::METERING_MODE, 0)
            .map(MeteringMode::from_value)
    }

    /// Exposure program from `ExposureProgram`.
    pub fn exposure_mode(&self) -> Result<ExposureMode, FieldError> {
        self.int_field(names::EXPOSURE_PROGRAM, 0)
            .map(ExposureMode::from_value)
    }

    /// Focal length in millimetres.
    ///
    /// Rationals are read directly. Some makers store a SHORT pair instead:
    /// `[0, f]` is `f` mm, and `[2, f]` is `f` scaled down to a single
    /// integer digit when `f` has three or four digits.
    pub fn focal_length(&self, field: &str) -> Result<f64, FieldError> {
        let tag = self.get(field)?;
        match tag.field_type() {
            FieldType::Rational | FieldType::SRational => {
                let (num, den) = tag.rational(0).map_err(|e| FieldError::value(field, e))?;
                Ok(rational_to_f64(num, den))
            }
            FieldType::Short => short_focal_length(field, tag),
            other => Err(FieldError::unparsable(
                field,
                format!("unexpected type {other:?}"),
            )),
        }
    }

    // -------------------------------------------------------------------------
    // Generic lookups
    // -------------------------------------------------------------------------

    /// ASCII value of `field` with surrounding whitespace removed.
    pub fn get_string(&self, field: &str) -> Result<String, FieldError> {
        self.get_strings(&[field])
    }

    /// Trimmed ASCII value of the first present field in `fields`.
    pub fn get_strings(&self, fields: &[&str]) -> Result<String, FieldError> {
        let (field, tag) = self.first_present(fields)?;
        let text = tag.string_val().map_err(|e| FieldError::value(field, e))?;
        Ok(text.trim().to_string())
    }

    /// First integer of the first present field in `fields`.
    pub fn get_uints(&self, fields: &[&str]) -> Result<u32, FieldError> {
        let (field, tag) = self.first_present(fields)?;
        let value = tag.int(0).map_err(|e| FieldError::value(field, e))?;
        u32::try_from(value)
            .map_err(|_| FieldError::unparsable(field, format!("{value} is not unsigned")))
    }

    /// Canon raw-file summary built from the Canon maker-note arrays.
    pub fn canon_raw(&self) -> Result<CanonRaw, FieldError> {
        CanonRaw::from_exif(self)
    }

    fn uint_field(&self, field: &str) -> Result<u32, FieldError> {
        self.get_uints(&[field])
    }

    fn first_present<'a>(&self, fields: &[&'a str]) -> Result<(&'a str, &Tag), FieldError> {
        fields
            .iter()
            .find_map(|&name| self.get(name).ok().map(|tag| (name, tag)))
            .ok_or_else(|| {
                FieldError::NotPresent(fields.last().copied().unwrap_or_default().to_string())
            })
    }
}

fn short_focal_length(field: &str, tag: &Tag) -> Result<f64, FieldError> {
    let first = tag.int(0).map_err(|e| FieldError::value(field, e))?;
    let second = match tag.int(1) {
        Ok(v) => v,
        Err(_) => return Ok(first as f64),
    };
    match (first, second.to_string().len()) {
        (0, _) => Ok(second as f64),
        (2, 4) => Ok(second as f64 / 1000.0),
        (2, 3) => Ok(second as f64 / 100.0),
        _ => Err(FieldError::unparsable(
            field,
            format!("unknown focal length encoding [{first}, {second}]"),
        )),
    }
}

// =============================================================================
// Tests
// =============================================================================
