//! Typed interpretations of common EXIF enumerations and rationals.

use std::fmt;

use serde::Serialize;

use crate::format::tiff::rational_to_f64;

// =============================================================================
// Orientation
// =============================================================================

/// Value of the `Orientation` tag: where row 0 and column 0 of the stored
/// image sit relative to the visual image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    Horizontal,
    MirrorHorizontal,
    Rotate180,
    MirrorVertical,
    MirrorHorizontalRotate270,
    Rotate90,
    MirrorHorizontalRotate90,
    Rotate270,
}

impl Orientation {
    /// Map the raw tag value (1 to 8).
    pub fn from_value(value: i64) -> Option<Self> {
        Some(match value {
            1 => Orientation::Horizontal,
            2 => Orientation::MirrorHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::MirrorVertical,
            5 => Orientation::MirrorHorizontalRotate270,
            6 => Orientation::Rotate90,
            7 => Orientation::MirrorHorizontalRotate90,
            8 => Orientation::Rotate270,
            _ => return None,
        })
    }

    /// Clockwise rotation in degrees needed to display the image upright.
    pub fn rotation(&self) -> u16 {
        match self {
            Orientation::Horizontal | Orientation::MirrorHorizontal => 0,
            Orientation::Rotate180 | Orientation::MirrorVertical => 180,
            Orientation::Rotate90 | Orientation::MirrorHorizontalRotate90 => 90,
            Orientation::Rotate270 | Orientation::MirrorHorizontalRotate270 => 270,
        }
    }

    /// Whether the image must also be mirrored.
    pub fn is_mirrored(&self) -> bool {
        matches!(
            self,
            Orientation::MirrorHorizontal
                | Orientation::MirrorVertical
                | Orientation::MirrorHorizontalRotate270
                | Orientation::MirrorHorizontalRotate90
        )
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Orientation::Horizontal => "Horizontal (normal)",
            Orientation::MirrorHorizontal => "Mirror horizontal",
            Orientation::Rotate180 => "Rotate 180",
            Orientation::MirrorVertical => "Mirror vertical",
            Orientation::MirrorHorizontalRotate270 => "Mirror horizontal and rotate 270 CW",
            Orientation::Rotate90 => "Rotate 90 CW",
            Orientation::MirrorHorizontalRotate90 => "Mirror horizontal and rotate 90 CW",
            Orientation::Rotate270 => "Rotate 270 CW",
        };
        f.write_str(text)
    }
}

// =============================================================================
// Flash
// =============================================================================

/// Bit field of the `Flash` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FlashMode(pub u16);

impl FlashMode {
    pub fn fired(&self) -> bool {
        self.0 & 0x01 != 0
    }

    /// Strobe return light status (bits 1-2).
    pub fn return_light(&self) -> u16 {
        (self.0 >> 1) & 0x03
    }

    /// 0 unknown, 1 compulsory firing, 2 compulsory suppression, 3 auto.
    pub fn mode(&self) -> u16 {
        (self.0 >> 3) & 0x03
    }

    /// The camera has a flash unit.
    pub fn has_flash(&self) -> bool {
        self.0 & 0x20 == 0
    }

    pub fn red_eye_reduction(&self) -> bool {
        self.0 & 0x40 != 0
    }
}

impl fmt::Display for FlashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_flash() {
            return f.write_str("No flash function");
        }
        let mode = match self.mode() {
            1 => ", compulsory",
            2 => ", suppressed",
            3 => ", auto",
            _ => "",
        };
        let fired = if self.fired() { "Fired" } else { "Off" };
        let red_eye = if self.red_eye_reduction() {
            ", red-eye reduction"
        } else {
            ""
        };
        write!(f, "{fired}{mode}{red_eye}")
    }
}

// =============================================================================
// Metering and exposure programs
// =============================================================================

/// Value of the `MeteringMode` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MeteringMode {
    Unknown,
    Average,
    CenterWeightedAverage,
    Spot,
    MultiSpot,
    Pattern,
    Partial,
    Other,
    Reserved(u16),
}

impl MeteringMode {
    pub fn from_value(value: i64) -> Self {
        match value {
            0 => MeteringMode::Unknown,
            1 => MeteringMode::Average,
            2 => MeteringMode::CenterWeightedAverage,
            3 => MeteringMode::Spot,
            4 => MeteringMode::MultiSpot,
            5 => MeteringMode::Pattern,
            6 => MeteringMode::Partial,
            255 => MeteringMode::Other,
            v => MeteringMode::Reserved(v as u16),
        }
    }
}

/// Value of the `ExposureProgram` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExposureMode {
    NotDefined,
    Manual,
    Normal,
    AperturePriority,
    ShutterPriority,
    Creative,
    Action,
    Portrait,
    Landscape,
    Reserved(u16),
}

impl ExposureMode {
    pub fn from_value(value: i64) -> Self {
        match value {
            0 => ExposureMode::NotDefined,
            1 => ExposureMode::Manual,
            2 => ExposureMode::Normal,
            3 => ExposureMode::AperturePriority,
            4 => ExposureMode::ShutterPriority,
            5 => ExposureMode::Creative,
            6 => ExposureMode::Action,
            7 => ExposureMode::Portrait,
            8 => ExposureMode::Landscape,
            v => ExposureMode::Reserved(v as u16),
        }
    }
}

// =============================================================================
// Rational values
// =============================================================================

/// Exposure compensation in EV, kept as the stored fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExposureBias {
    pub numerator: i64,
    pub denominator: i64,
}

impl ExposureBias {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn ev(&self) -> f64 {
        rational_to_f64(self.numerator, self.denominator)
    }
}

impl fmt::Display for ExposureBias {
    /// `0`, `+1/3`, `-2/3`, or a decimal when the fraction does not reduce
    /// to a simple form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (num, den) = reduce(self.numerator, self.denominator);
        if num == 0 {
            return f.write_str("0");
        }
        let sign = if num > 0 { "+" } else { "-" };
        match den {
            0 | 1 => write!(f, "{sign}{}", num.abs()),
            2 | 3 => write!(f, "{sign}{}/{den}", num.abs()),
            _ => write!(f, "{:+.2}", self.ev()),
        }
    }
}

/// Exposure time in seconds, kept as the stored fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShutterSpeed {
    pub numerator: i64,
    pub denominator: i64,
}

impl ShutterSpeed {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    pub fn seconds(&self) -> f64 {
        rational_to_f64(self.numerator, self.denominator)
    }
}

impl fmt::Display for ShutterSpeed {
    /// Sub-second speeds render as `1/n`, longer ones in seconds.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (num, den) = reduce(self.numerator, self.denominator);
        if den > 1 && num == 1 {
            return write!(f, "1/{den}");
        }
        let seconds = self.seconds();
        if seconds > 0.0 && seconds < 1.0 {
            write!(f, "1/{}", (1.0 / seconds).round())
        } else {
            write!(f, "{seconds}")
        }
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a.abs()
    } else {
        gcd(b, a % b)
    }
}

/// Reduce a fraction, keeping the sign on the numerator.
fn reduce(num: i64, den: i64) -> (i64, i64) {
    let g = gcd(num, den);
    if g == 0 {
        return (num, den);
    }
    let (num, den) = (num / g, den / g);
    if den < 0 {
        (-num, -den)
    } else {
        (num, den)
    }
}

// =============================================================================
// Tests
// =============================================================================
