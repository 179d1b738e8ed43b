//! Decoded view of the Canon maker-note arrays.
//!
//! `Canon.CameraSettings`, `Canon.ShotInfo` and `Canon.AFInfo` are arrays of
//! 16-bit values whose meaning depends on their index. [`CanonRaw`] turns
//! them into named values. The three arrays are required; everything else is
//! filled in when present and left empty otherwise.

use serde::Serialize;

use crate::error::FieldError;
use crate::exif::Exif;
use crate::format::tiff::Tag;

use super::tables::{self, settings};
use super::{
    AF_INFO, CAMERA_SETTINGS, FIRMWARE_VERSION, IMAGE_TYPE, MODEL_ID, OWNER_NAME, SERIAL_NUMBER,
    SHOT_INFO, TIME_INFO,
};

/// Canon-specific values derived from the maker note.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CanonRaw {
    pub model_id: String,
    pub serial_number: String,
    pub image_type: String,
    pub firmware_version: String,
    pub owner_name: String,
    /// UTC offset of the configured home city, e.g. `"+9:00"`
    pub timezone: String,
    pub timezone_city: String,
    pub camera_settings: CanonCameraSettings,
    pub shot_info: CanonShotInfo,
    pub af_info: CanonAfInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CanonCameraSettings {
    pub continuous_drive: String,
    pub focus_mode: String,
    pub record_mode: String,
    pub metering_mode: String,
    pub exposure_mode: String,
    pub ae_setting: String,
    pub lens: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CanonShotInfo {
    pub auto_iso: f64,
    pub base_iso: f64,
    pub measured_ev: f64,
    pub target_aperture: f64,
    /// Seconds
    pub target_exposure_time: f64,
    pub exposure_compensation: f64,
    pub white_balance: i64,
    pub sequence_number: i64,
    /// Degrees Celsius; `None` when the camera did not record it
    pub camera_temperature: Option<i64>,
    /// Metres
    pub focus_distance_upper: f64,
    /// Metres
    pub focus_distance_lower: f64,
    pub f_number: f64,
    /// Seconds
    pub exposure_time: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CanonAfInfo {
    pub area_mode: String,
    pub num_af_points: i64,
    pub valid_af_points: i64,
    pub canon_image_width: i64,
    pub canon_image_height: i64,
    pub af_image_width: i64,
    pub af_image_height: i64,
}

impl CanonRaw {
    /// Build from the fields loaded by the Canon parser.
    ///
    /// Fails when camera settings, shot info or AF info are missing or too
    /// short.
    pub fn from_exif(exif: &Exif) -> Result<Self, FieldError> {
        let mut raw = CanonRaw {
            camera_settings: CanonCameraSettings::from_tag(exif.get(CAMERA_SETTINGS)?),
            shot_info: CanonShotInfo::from_tag(exif.get(SHOT_INFO)?)?,
            af_info: CanonAfInfo::from_tag(exif.get(AF_INFO)?)?,
            ..Default::default()
        };

        if let Ok(Ok(id)) = exif.get(MODEL_ID).map(|t| t.int(0)) {
            raw.model_id = tables::model_name(id as u32).to_string();
        }
        if let Ok(Ok(serial)) = exif.get(SERIAL_NUMBER).map(|t| t.int(0)) {
            raw.serial_number = serial.to_string();
        }
        raw.image_type = exif.string_field(IMAGE_TYPE).unwrap_or_default();
        raw.firmware_version = exif.string_field(FIRMWARE_VERSION).unwrap_or_default();
        raw.owner_name = exif.string_field(OWNER_NAME).unwrap_or_default();
        if let Ok(Ok(city)) = exif.get(TIME_INFO).map(|t| t.int(2)) {
            raw.timezone = tables::time_zone_offset(city).to_string();
            raw.timezone_city = tables::time_zone_city(city).to_string();
        }
        Ok(raw)
    }
}

impl CanonCameraSettings {
    /// Out-of-range indices and unknown codes become `""`.
    fn from_tag(tag: &Tag) -> Self {
        let setting = |index: usize| {
            tag.int(index)
                .map(|value| tables::camera_setting(index, value))
                .unwrap_or("")
                .to_string()
        };
        let lens = tag
            .int(settings::LENS_TYPE)
            .map(tables::lens_name)
            .unwrap_or("")
            .to_string();

        Self {
            continuous_drive: setting(settings::CONTINUOUS_DRIVE),
            focus_mode: setting(settings::FOCUS_MODE),
            record_mode: setting(settings::RECORD_MODE),
            metering_mode: setting(settings::METERING_MODE),
            exposure_mode: setting(settings::EXPOSURE_MODE),
            ae_setting: setting(settings::AE_SETTING),
            lens,
        }
    }
}

/// Signed 16-bit element of a Canon array.
fn int16(tag: &Tag, field: &str, index: usize) -> Result<i64, FieldError> {
    tag.int(index)
        .map(|v| v as i16 as i64)
        .map_err(|e| FieldError::value(field, e))
}

/// Canon APEX-style value in 1/32 EV steps, with 1/3-stop fractions
/// encoded as 0x0c and 0x14.
fn canon_ev(value: i64) -> f64 {
    let sign = if value < 0 { -1.0 } else { 1.0 };
    let value = value.abs();
    let frac = match value & 0x1f {
        0x0c => 32.0 / 3.0,
        0x14 => 64.0 / 3.0,
        other => other as f64,
    };
    sign * ((value & !0x1f) as f64 + frac) / 32.0
}

fn aperture_from_ev(ev: f64) -> f64 {
    (ev * std::f64::consts::LN_2 / 2.0).exp()
}

fn exposure_time_from_ev(ev: f64) -> f64 {
    (-ev * std::f64::consts::LN_2).exp()
}

impl CanonShotInfo {
    fn from_tag(tag: &Tag) -> Result<Self, FieldError> {
        let at = |index| int16(tag, SHOT_INFO, index);
        let iso = |v: i64| (v as f64 / 32.0 * std::f64::consts::LN_2).exp() * 100.0;

        let temperature = at(12)?;
        Ok(Self {
            auto_iso: iso(at(1)?),
            base_iso: iso(at(2)?) / 32.0,
            measured_ev: at(3)? as f64 / 32.0 + 5.0,
            target_aperture: aperture_from_ev(canon_ev(at(4)?)),
            target_exposure_time: exposure_time_from_ev(canon_ev(at(5)?)),
            exposure_compensation: canon_ev(at(6)?),
            white_balance: at(7)?,
            sequence_number: at(9)?,
            camera_temperature: (temperature != 0).then(|| temperature - 128),
            focus_distance_upper: at(19)? as f64 / 100.0,
            focus_distance_lower: at(20)? as f64 / 100.0,
            f_number: aperture_from_ev(canon_ev(at(21)?)),
            exposure_time: exposure_time_from_ev(canon_ev(at(22)?)),
        })
    }
}

impl CanonAfInfo {
    fn from_tag(tag: &Tag) -> Result<Self, FieldError> {
        let at = |index| int16(tag, AF_INFO, index);
        Ok(Self {
            area_mode: tables::af_area_mode(at(1)?).to_string(),
            num_af_points: at(2)?,
            valid_af_points: at(3)?,
            canon_image_width: at(4)?,
            canon_image_height: at(5)?,
            af_image_width: at(6)?,
            af_image_height: at(7)?,
        })
    }
}
