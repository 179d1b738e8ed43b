//! Field tables for the standard EXIF directories.
//!
//! IFD0 and the Exif sub-IFD share one table; their id ranges do not
//! overlap. IFD1 describes the thumbnail, so its names carry a `Thumbnail`
//! prefix to keep them apart from the primary image.

use super::FieldTable;

/// Field names read by the parsers and accessors.
pub mod names {
    // IFD0
    pub const IMAGE_WIDTH: &str = "ImageWidth";
    pub const IMAGE_LENGTH: &str = "ImageLength";
    pub const COMPRESSION: &str = "Compression";
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const STRIP_OFFSETS: &str = "StripOffsets";
    pub const ORIENTATION: &str = "Orientation";
    pub const STRIP_BYTE_COUNTS: &str = "StripByteCounts";
    pub const DATE_TIME: &str = "DateTime";
    pub const SUB_IFDS_POINTER: &str = "SubIfdsPointer";
    pub const EXIF_IFD_POINTER: &str = "ExifIFDPointer";
    pub const GPS_INFO_IFD_POINTER: &str = "GPSInfoIFDPointer";
    pub const INTEROPERABILITY_IFD_POINTER: &str = "InteroperabilityIFDPointer";

    // Exif sub-IFD
    pub const EXPOSURE_TIME: &str = "ExposureTime";
    pub const F_NUMBER: &str = "FNumber";
    pub const EXPOSURE_PROGRAM: &str = "ExposureProgram";
    pub const ISO_SPEED_RATINGS: &str = "ISOSpeedRatings";
    pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
    pub const OFFSET_TIME_ORIGINAL: &str = "OffsetTimeOriginal";
    pub const EXPOSURE_BIAS_VALUE: &str = "ExposureBiasValue";
    pub const METERING_MODE: &str = "MeteringMode";
    pub const FLASH: &str = "Flash";
    pub const FOCAL_LENGTH: &str = "FocalLength";
    pub const MAKER_NOTE: &str = "MakerNote";
    pub const SUB_SEC_TIME_ORIGINAL: &str = "SubSecTimeOriginal";
    pub const PIXEL_X_DIMENSION: &str = "PixelXDimension";
    pub const PIXEL_Y_DIMENSION: &str = "PixelYDimension";

    // IFD1
    pub const THUMBNAIL_COMPRESSION: &str = "ThumbnailCompression";
    pub const THUMB_JPEG_INTERCHANGE_FORMAT: &str = "ThumbJPEGInterchangeFormat";
    pub const THUMB_JPEG_INTERCHANGE_FORMAT_LENGTH: &str = "ThumbJPEGInterchangeFormatLength";

    // GPS sub-IFD
    pub const GPS_LATITUDE_REF: &str = "GPSLatitudeRef";
    pub const GPS_LATITUDE: &str = "GPSLatitude";
    pub const GPS_LONGITUDE_REF: &str = "GPSLongitudeRef";
    pub const GPS_LONGITUDE: &str = "GPSLongitude";
    pub const GPS_ALTITUDE_REF: &str = "GPSAltitudeRef";
    pub const GPS_ALTITUDE: &str = "GPSAltitude";
    pub const GPS_TIME_STAMP: &str = "GPSTimeStamp";
    pub const GPS_DATE_STAMP: &str = "GPSDateStamp";
}

/// IFD0 and Exif sub-IFD.
pub const EXIF_FIELDS: FieldTable = FieldTable::new(&[
    (0x00FE, "NewSubfileType"),
    (0x0100, "ImageWidth"),
    (0x0101, "ImageLength"),
    (0x0102, "BitsPerSample"),
    (0x0103, "Compression"),
    (0x0106, "PhotometricInterpretation"),
    (0x010E, "ImageDescription"),
    (0x010F, "Make"),
    (0x0110, "Model"),
    (0x0111, "StripOffsets"),
    (0x0112, "Orientation"),
    (0x0115, "SamplesPerPixel"),
    (0x0116, "RowsPerStrip"),
    (0x0117, "StripByteCounts"),
    (0x011A, "XResolution"),
    (0x011B, "YResolution"),
    (0x011C, "PlanarConfiguration"),
    (0x0128, "ResolutionUnit"),
    (0x012D, "TransferFunction"),
    (0x0131, "Software"),
    (0x0132, "DateTime"),
    (0x013B, "Artist"),
    (0x013E, "WhitePoint"),
    (0x013F, "PrimaryChromaticities"),
    (0x014A, "SubIfdsPointer"),
    (0x0211, "YCbCrCoefficients"),
    (0x0212, "YCbCrSubSampling"),
    (0x0213, "YCbCrPositioning"),
    (0x0214, "ReferenceBlackWhite"),
    (0x02BC, "XMLPacket"),
    (0x4746, "Rating"),
    (0x4749, "RatingPercent"),
    (0x8298, "Copyright"),
    (0x829A, "ExposureTime"),
    (0x829D, "FNumber"),
    (0x83BB, "IPTCNAA"),
    (0x8769, "ExifIFDPointer"),
    (0x8773, "InterColorProfile"),
    (0x8822, "ExposureProgram"),
    (0x8824, "SpectralSensitivity"),
    (0x8825, "GPSInfoIFDPointer"),
    (0x8827, "ISOSpeedRatings"),
    (0x8828, "OECF"),
    (0x8830, "SensitivityType"),
    (0x8831, "StandardOutputSensitivity"),
    (0x8832, "RecommendedExposureIndex"),
    (0x9000, "ExifVersion"),
    (0x9003, "DateTimeOriginal"),
    (0x9004, "DateTimeDigitized"),
    (0x9010, "OffsetTime"),
    (0x9011, "OffsetTimeOriginal"),
    (0x9012, "OffsetTimeDigitized"),
    (0x9101, "ComponentsConfiguration"),
    (0x9102, "CompressedBitsPerPixel"),
    (0x9201, "ShutterSpeedValue"),
    (0x9202, "ApertureValue"),
    (0x9203, "BrightnessValue"),
    (0x9204, "ExposureBiasValue"),
    (0x9205, "MaxApertureValue"),
    (0x9206, "SubjectDistance"),
    (0x9207, "MeteringMode"),
    (0x9208, "LightSource"),
    (0x9209, "Flash"),
    (0x920A, "FocalLength"),
    (0x9214, "SubjectArea"),
    (0x927C, "MakerNote"),
    (0x9286, "UserComment"),
    (0x9290, "SubSecTime"),
    (0x9291, "SubSecTimeOriginal"),
    (0x9292, "SubSecTimeDigitized"),
    (0xA000, "FlashpixVersion"),
    (0xA001, "ColorSpace"),
    (0xA002, "PixelXDimension"),
    (0xA003, "PixelYDimension"),
    (0xA004, "RelatedSoundFile"),
    (0xA005, "InteroperabilityIFDPointer"),
    (0xA20B, "FlashEnergy"),
    (0xA20C, "SpatialFrequencyResponse"),
    (0xA20E, "FocalPlaneXResolution"),
    (0xA20F, "FocalPlaneYResolution"),
    (0xA210, "FocalPlaneResolutionUnit"),
    (0xA214, "SubjectLocation"),
    (0xA215, "ExposureIndex"),
    (0xA217, "SensingMethod"),
    (0xA300, "FileSource"),
    (0xA301, "SceneType"),
    (0xA302, "CFAPattern"),
    (0xA401, "CustomRendered"),
    (0xA402, "ExposureMode"),
    (0xA403, "WhiteBalance"),
    (0xA404, "DigitalZoomRatio"),
    (0xA405, "FocalLengthIn35mmFilm"),
    (0xA406, "SceneCaptureType"),
    (0xA407, "GainControl"),
    (0xA408, "Contrast"),
    (0xA409, "Saturation"),
    (0xA40A, "Sharpness"),
    (0xA40B, "DeviceSettingDescription"),
    (0xA40C, "SubjectDistanceRange"),
    (0xA420, "ImageUniqueID"),
    (0xA430, "CameraOwnerName"),
    (0xA431, "BodySerialNumber"),
    (0xA432, "LensSpecification"),
    (0xA433, "LensMake"),
    (0xA434, "LensModel"),
    (0xA435, "LensSerialNumber"),
    (0xA460, "CompositeImage"),
    (0xC4A5, "PrintImageMatching"),
    (0xC612, "DNGVersion"),
    (0xC613, "DNGBackwardVersion"),
    (0xC614, "UniqueCameraModel"),
]);

/// IFD1.
pub const THUMBNAIL_FIELDS: FieldTable = FieldTable::new(&[
    (0x00FE, "ThumbnailNewSubfileType"),
    (0x0100, "ThumbnailImageWidth"),
    (0x0101, "ThumbnailImageLength"),
    (0x0102, "ThumbnailBitsPerSample"),
    (0x0103, "ThumbnailCompression"),
    (0x0106, "ThumbnailPhotometricInterpretation"),
    (0x010E, "ThumbnailImageDescription"),
    (0x010F, "ThumbnailMake"),
    (0x0110, "ThumbnailModel"),
    (0x0111, "ThumbnailStripOffsets"),
    (0x0112, "ThumbnailOrientation"),
    (0x0115, "ThumbnailSamplesPerPixel"),
    (0x0116, "ThumbnailRowsPerStrip"),
    (0x0117, "ThumbnailStripByteCounts"),
    (0x011A, "ThumbnailXResolution"),
    (0x011B, "ThumbnailYResolution"),
    (0x011C, "ThumbnailPlanarConfiguration"),
    (0x0128, "ThumbnailResolutionUnit"),
    (0x0131, "ThumbnailSoftware"),
    (0x0132, "ThumbnailDateTime"),
    (0x0201, "ThumbJPEGInterchangeFormat"),
    (0x0202, "ThumbJPEGInterchangeFormatLength"),
    (0x0211, "ThumbnailYCbCrCoefficients"),
    (0x0212, "ThumbnailYCbCrSubSampling"),
    (0x0213, "ThumbnailYCbCrPositioning"),
    (0x0214, "ThumbnailReferenceBlackWhite"),
]);

/// GPS sub-IFD.
pub const GPS_FIELDS: FieldTable = FieldTable::new(&[
    (0x0000, "GPSVersionID"),
    (0x0001, "GPSLatitudeRef"),
    (0x0002, "GPSLatitude"),
    (0x0003, "GPSLongitudeRef"),
    (0x0004, "GPSLongitude"),
    (0x0005, "GPSAltitudeRef"),
    (0x0006, "GPSAltitude"),
    (0x0007, "GPSTimeStamp"),
    (0x0008, "GPSSatellites"),
    (0x0009, "GPSStatus"),
    (0x000A, "GPSMeasureMode"),
    (0x000B, "GPSDOP"),
    (0x000C, "GPSSpeedRef"),
    (0x000D, "GPSSpeed"),
    (0x000E, "GPSTrackRef"),
    (0x000F, "GPSTrack"),
    (0x0010, "GPSImgDirectionRef"),
    (0x0011, "GPSImgDirection"),
    (0x0012, "GPSMapDatum"),
    (0x0013, "GPSDestLatitudeRef"),
    (0x0014, "GPSDestLatitude"),
    (0x0015, "GPSDestLongitudeRef"),
    (0x0016, "GPSDestLongitude"),
    (0x0017, "GPSDestBearingRef"),
    (0x0018, "GPSDestBearing"),
    (0x0019, "GPSDestDistanceRef"),
    (0x001A, "GPSDestDistance"),
    (0x001B, "GPSProcessingMethod"),
    (0x001C, "GPSAreaInformation"),
    (0x001D, "GPSDateStamp"),
    (0x001E, "GPSDifferential"),
    (0x001F, "GPSHPositioningError"),
]);

/// Interoperability sub-IFD.
pub const INTEROP_FIELDS: FieldTable = FieldTable::new(&[
    (0x0001, "InteroperabilityIndex"),
    (0x0002, "InteroperabilityVersion"),
    (0x1000, "RelatedImageFileFormat"),
    (0x1001, "RelatedImageWidth"),
    (0x1002, "RelatedImageLength"),
]);
