//! GPS position, altitude and time.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::FieldError;
use crate::exif::Exif;
use crate::fields::names;
use crate::format::tiff::{rational_to_f64, Tag, ValueFormat};

/// Everything the GPS sub-IFD says about where and when a photo was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpsInfo {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres above sea level; negative below.
    pub altitude: Option<f64>,
    pub time: Option<DateTime<Utc>>,
}

impl Exif {
    /// Signed decimal latitude and longitude. South and west are negative.
    pub fn lat_long(&self) -> Result<(f64, f64), FieldError> {
        let lat = self.coordinate(names::GPS_LATITUDE, names::GPS_LATITUDE_REF)?;
        let long = self.coordinate(names::GPS_LONGITUDE, names::GPS_LONGITUDE_REF)?;
        Ok((lat, long))
    }

    /// Altitude in metres, negated when `GPSAltitudeRef` is 1.
    pub fn gps_altitude(&self) -> Result<f64, FieldError> {
        let (num, den) = self.rational_field(names::GPS_ALTITUDE, 0)?;
        let below_sea_level = self.int_field(names::GPS_ALTITUDE_REF, 0)? == 1;
        let altitude = rational_to_f64(num, den);
        Ok(if below_sea_level { -altitude } else { altitude })
    }

    /// UTC time of the GPS fix.
    ///
    /// Combines `GPSDateStamp` with the hour, minute and second rationals of
    /// `GPSTimeStamp`. Without a seconds component only the date is used.
    /// Seconds keep millisecond precision.
    pub fn gps_time_stamp(&self) -> Result<DateTime<Utc>, FieldError> {
        let date_str = self.string_field(names::GPS_DATE_STAMP)?;
        let stamp = self.get(names::GPS_TIME_STAMP)?;
        let date = NaiveDate::parse_from_str(date_str.trim(), "%Y:%m:%d")
            .map_err(|e| FieldError::unparsable(names::GPS_DATE_STAMP, e.to_string()))?;

        let (sec_num, sec_den) = match stamp.rational(2) {
            Ok(seconds) => seconds,
            Err(_) => return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))),
        };
        let hour = whole_units(stamp, 0)?;
        let minute = whole_units(stamp, 1)?;
        let millis = (rational_to_f64(sec_num, sec_den) * 1000.0).round();
        if !(0.0..=u32::MAX as f64).contains(&millis) {
            return Err(FieldError::unparsable(
                names::GPS_TIME_STAMP,
                "seconds out of range",
            ));
        }
        let millis = millis as u32;

        let time = NaiveTime::from_hms_milli_opt(hour, minute, millis / 1000, millis % 1000)
            .ok_or_else(|| {
                FieldError::unparsable(
                    names::GPS_TIME_STAMP,
                    format!("invalid time {hour}:{minute}:{}", millis as f64 / 1000.0),
                )
            })?;
        Ok(Utc.from_utc_datetime(&date.and_time(time)))
    }

    /// Position plus whatever altitude and time are available.
    pub fn gps_info(&self) -> Result<GpsInfo, FieldError> {
        let (latitude, longitude) = self.lat_long()?;
        Ok(GpsInfo {
            latitude,
            longitude,
            altitude: self.gps_altitude().ok(),
            time: self.gps_time_stamp().ok(),
        })
    }

    fn coordinate(&self, coord: &str, reference: &str) -> Result<f64, FieldError> {
        let tag = self.get(coord)?;
        let reference = self.string_field(reference)?;
        let degrees = tag_degrees(coord, tag)?;
        Ok(match reference.trim() {
            "S" | "W" => -degrees,
            _ => degrees,
        })
    }
}

/// Integer part of rational `index`, for hour and minute components.
fn whole_units(tag: &Tag, index: usize) -> Result<u32, FieldError> {
    let (num, den) = tag
        .rational(index)
        .map_err(|e| FieldError::value(names::GPS_TIME_STAMP, e))?;
    let value = if den == 0 { num } else { num / den };
    u32::try_from(value).map_err(|_| {
        FieldError::unparsable(names::GPS_TIME_STAMP, format!("negative component {value}"))
    })
}

/// Decimal degrees from up to three rationals, or from a degree string
/// written by some phones.
fn tag_degrees(field: &str, tag: &Tag) -> Result<f64, FieldError> {
    match tag.format() {
        ValueFormat::Rational => {
            let mut parts = [0.0f64; 3];
            for (i, part) in parts.iter_mut().enumerate() {
                let (num, den) = tag.rational(i).map_err(|e| FieldError::value(field, e))?;
                *part = rational_to_f64(num, den);
                if (tag.count() as usize) < i + 2 {
                    break;
                }
            }
            Ok(parts[0] + parts[1] / 60.0 + parts[2] / 3600.0)
        }
        ValueFormat::String => {
            let text = tag.string_val().map_err(|e| FieldError::value(field, e))?;
            parse_degrees_string(&text)
        }
        _ => Err(FieldError::unparsable(field, "malformed degrees value")),
    }
}

/// Parse a `degrees,minutes,seconds` string into decimal degrees.
///
/// Parts are separated by `,` or `;`. Six parts are read as three
/// integer/fraction pairs (`14,0,44,0,34,118` is `14.0 44.0 34.118`).
/// Minutes and seconds take the sign of the degrees.
pub fn parse_degrees_string(s: &str) -> Result<f64, FieldError> {
    let unparsable =
        || FieldError::unparsable("coordinate", format!("unknown coordinate format: {s}"));
    let parts: Vec<&str> = s
        .split([',', ';'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let joined: Vec<String> = match parts.len() {
        3 => parts.iter().map(|p| p.to_string()).collect(),
        6 => parts.chunks(2).map(|pair| format!("{}.{}", pair[0], pair[1])).collect(),
        _ => return Err(unparsable()),
    };

    let mut values = [0.0f64; 3];
    for (value, text) in values.iter_mut().zip(&joined) {
        *value = text.parse::<f64>().map_err(|_| unparsable())?;
    }
    let [degrees, minutes, seconds] = values;
    Ok(degrees + minutes.copysign(degrees) / 60.0 + seconds.copysign(degrees) / 3600.0)
}

// =============================================================================
// Tests
// =============================================================================
