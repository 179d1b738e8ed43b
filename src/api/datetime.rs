//! Capture date and time zone.

use chrono::{Duration, FixedOffset, NaiveDateTime};

use crate::error::FieldError;
use crate::exif::Exif;
use crate::fields::names;
use crate::makernote::canon;

const EXIF_DATE_TIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

impl Exif {
    /// Capture time from `DateTimeOriginal`, falling back to `DateTime`.
    ///
    /// `SubSecTimeOriginal`, when present, supplies the fractional second.
    /// EXIF stores local time without a zone; see [`Exif::time_zone`].
    pub fn date_time(&self) -> Result<NaiveDateTime, FieldError> {
        self.date_time_from(&[names::DATE_TIME_ORIGINAL, names::DATE_TIME])
    }

    /// Like [`Exif::date_time`], reading the first present of `fields`.
    pub fn date_time_from(&self, fields: &[&str]) -> Result<NaiveDateTime, FieldError> {
        let (field, tag) = self.first_present(fields)?;
        let text = tag.string_val().map_err(|e| FieldError::value(field, e))?;
        let base = NaiveDateTime::parse_from_str(text.trim(), EXIF_DATE_TIME_FORMAT)
            .map_err(|e| FieldError::unparsable(field, format!("{text:?}: {e}")))?;

        let sub_sec = match self.string_field(names::SUB_SEC_TIME_ORIGINAL) {
            Ok(s) => s,
            Err(_) => return Ok(base),
        };
        let digits = sub_sec.trim();
        if digits.is_empty() {
            return Ok(base);
        }
        Ok(base + Duration::nanoseconds(fraction_nanos(digits)?))
    }

    /// Camera time zone as a fixed UTC offset.
    ///
    /// Only Canon bodies record one, as minutes in `Canon.TimeInfo[1]`.
    pub fn time_zone(&self) -> Result<FixedOffset, FieldError> {
        let info = self.get(canon::TIME_INFO)?;
        if info.count() < 2 {
            return Err(FieldError::unparsable(
                canon::TIME_INFO,
                "does not contain a time zone",
            ));
        }
        let minutes = info
            .int(1)
            .map_err(|e| FieldError::value(canon::TIME_INFO, e))?;
        i32::try_from(minutes * 60)
            .ok()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                FieldError::unparsable(
                    canon::TIME_INFO,
                    format!("offset of {minutes} minutes is out of range"),
                )
            })
    }
}

/// Nanoseconds for the digits after a decimal point: `"25"` is 0.25 s.
fn fraction_nanos(digits: &str) -> Result<i64, FieldError> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::unparsable(
            names::SUB_SEC_TIME_ORIGINAL,
            format!("{digits:?} is not a fraction"),
        ));
    }
    let mut padded: String = digits.chars().take(9).collect();
    while padded.len() < 9 {
        padded.push('0');
    }
    padded
        .parse()
        .map_err(|_| FieldError::unparsable(names::SUB_SEC_TIME_ORIGINAL, digits.to_string()))
}
