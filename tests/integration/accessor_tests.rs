//! Derived-value accessors on decoded files.

use chrono::{NaiveDate, TimeZone, Utc};
use exif_decoder::{
    decode, names, ExposureMode, FieldError, ImageRange, MeteringMode, Orientation,
};

use super::test_utils::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

// =============================================================================
// Image and exposure
// =============================================================================

#[test]
fn test_image_and_exposure_accessors() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let exif = decode(&create_camera_tiff(order)[..]).unwrap();

        assert_eq!(exif.image_size().unwrap(), (6000, 4000));
        let orientation = exif.orientation().unwrap();
        assert_eq!(orientation, Orientation::Rotate90);
        assert_eq!(orientation.rotation(), 90);

        assert!(approx(exif.aperture().unwrap(), 2.8));
        assert_eq!(exif.iso_speed().unwrap(), 200);
        assert_eq!(exif.shutter_speed().unwrap().to_string(), "1/250");
        assert!(approx(exif.shutter_speed().unwrap().seconds(), 0.004));
        assert_eq!(exif.exposure_bias().unwrap().to_string(), "-1/3");
        assert_eq!(exif.metering_mode().unwrap(), MeteringMode::Pattern);
        assert_eq!(exif.exposure_mode().unwrap(), ExposureMode::AperturePriority);
        assert!(approx(exif.focal_length(names::FOCAL_LENGTH).unwrap(), 50.0));

        let flash = exif.flash_mode().unwrap();
        assert!(!flash.fired());
        assert_eq!(flash.mode(), 2);
        assert_eq!(flash.to_string(), "Off, suppressed");
    }
}

#[test]
fn test_string_lookups() {
    let exif = decode(&create_camera_tiff(ByteOrderType::LittleEndian)[..]).unwrap();

    assert_eq!(exif.get_string(names::MODEL).unwrap(), "Model X");
    assert_eq!(
        exif.get_strings(&["Canon.OwnerName", names::MAKE]).unwrap(),
        "Acme"
    );
    assert_eq!(
        exif.get_uints(&["Canon.ModelID", names::ISO_SPEED_RATINGS])
            .unwrap(),
        200
    );
    assert!(matches!(
        exif.get_string(names::ISO_SPEED_RATINGS),
        Err(FieldError::Value { .. })
    ));
    assert!(exif.get_string("LensModel").unwrap_err().is_not_present());
}

// =============================================================================
// Time
// =============================================================================

#[test]
fn test_capture_time_with_sub_seconds() {
    let exif = decode(&create_camera_tiff(ByteOrderType::BigEndian)[..]).unwrap();
    let expected = NaiveDate::from_ymd_opt(2021, 7, 4)
        .unwrap()
        .and_hms_milli_opt(9, 10, 11, 420)
        .unwrap();
    assert_eq!(exif.date_time().unwrap(), expected);

    // No maker note, so no camera time zone
    assert!(exif.time_zone().unwrap_err().is_not_present());
}

// =============================================================================
// GPS
// =============================================================================

#[test]
fn test_gps_accessors() {
    for order in [ByteOrderType::LittleEndian, ByteOrderType::BigEndian] {
        let exif = decode(&create_camera_tiff(order)[..]).unwrap();

        let (lat, long) = exif.lat_long().unwrap();
        assert!(approx(lat, 48.0 + 51.0 / 60.0 + 29.4 / 3600.0), "{lat}");
        assert!(approx(long, 2.0 + 17.0 / 60.0 + 40.2 / 3600.0), "{long}");
        assert!(approx(exif.gps_altitude().unwrap(), 35.5));
        assert_eq!(
            exif.gps_time_stamp().unwrap(),
            Utc.with_ymd_and_hms(2021, 7, 4, 7, 10, 11).unwrap()
        );
    }
}

#[test]
fn test_gps_southern_hemisphere_below_sea_level() {
    let tiff = TiffBuilder::new(ByteOrderType::LittleEndian)
        .add_ifd(IfdBuilder::new().sub_ifd(0x8825, 0))
        .add_sub_ifd(
            IfdBuilder::new()
                .ascii(0x0001, "S")
                .rational(0x0002, &[(33, 1), (52, 1), (0, 1)])
                .ascii(0x0003, "W")
                .rational(0x0004, &[(70, 1), (30, 1), (0, 1)])
                .byte(0x0005, &[1])
                .rational(0x0006, &[(12, 1)]),
        )
        .build();
    let exif = decode(&tiff[..]).unwrap();

    let (lat, long) = exif.lat_long().unwrap();
    assert!(approx(lat, -(33.0 + 52.0 / 60.0)));
    assert!(approx(long, -70.5));
    assert!(approx(exif.gps_altitude().unwrap(), -12.0));

    let info = exif.gps_info().unwrap();
    assert_eq!(info.altitude, Some(-12.0));
    assert_eq!(info.time, None);
}

#[test]
fn test_gps_info_serializes() {
    let exif = decode(&create_camera_tiff(ByteOrderType::LittleEndian)[..]).unwrap();
    let info = exif.gps_info().unwrap();

    let json = serde_json::to_value(info).unwrap();
    assert!(approx(json["latitude"].as_f64().unwrap(), info.latitude));
    assert_eq!(json["altitude"].as_f64(), Some(35.5));
    assert!(json["time"]
        .as_str()
        .unwrap()
        .starts_with("2021-07-04T07:10:11"));
}

#[test]
fn test_missing_gps() {
    let tiff = TiffBuilder::new(ByteOrderType::LittleEndian)
        .add_ifd(IfdBuilder::new().ascii(0x0110, "Model X"))
        .build();
    let exif = decode(&tiff[..]).unwrap();

    assert!(exif.lat_long().unwrap_err().is_not_present());
    assert!(exif.gps_info().is_err());
    assert!(exif.image_size().unwrap_err().is_not_present());
}

// =============================================================================
// Thumbnails
// =============================================================================

#[test]
fn test_jpeg_thumbnail_range() {
    let exif = decode(&create_camera_tiff(ByteOrderType::LittleEndian)[..]).unwrap();

    let thumbnail = exif.jpeg_thumbnail().unwrap();
    assert_eq!(
        thumbnail,
        ImageRange {
            start: 4000,
            length: 1500
        }
    );
    // The fixture does not embed the thumbnail bytes
    assert_eq!(thumbnail.slice(exif.raw()), None);
    assert_eq!(exif.preview_image(&[]).unwrap(), thumbnail);
}
