//! Maker-note parsing through the full decode pipeline.

use chrono::FixedOffset;
use exif_decoder::{
    decode, names, CanonParser, DecodeError, DecodeOptions, Decoder, ImageRange, ParseError,
    ParserRegistry, PreviewSource, TiffError,
};

use super::test_utils::*;

const BOTH_ORDERS: [ByteOrderType; 2] = [ByteOrderType::LittleEndian, ByteOrderType::BigEndian];

/// IFD0 with Make and Model, and an Exif sub-IFD holding `exif_ifd`.
fn camera_tiff(order: ByteOrderType, make: &str, model: &str, exif_ifd: IfdBuilder) -> Vec<u8> {
    TiffBuilder::new(order)
        .add_ifd(
            IfdBuilder::new()
                .ascii(0x010f, make)
                .ascii(0x0110, model)
                .sub_ifd(0x8769, 0),
        )
        .add_sub_ifd(exif_ifd)
        .build()
}

// =============================================================================
// Apple
// =============================================================================

#[test]
fn test_apple_note_in_jpeg() {
    for order in BOTH_ORDERS {
        let note = apple_note(
            order,
            &[
                (0x000a, 4, 1, order.u32(3)),
                (0x0011, 2, 4, *b"abc\0"),
            ],
        );
        let tiff = camera_tiff(
            order,
            "Apple",
            "iPhone 13",
            IfdBuilder::new().undefined(0x927c, &note),
        );

        let exif = decode(&wrap_jpeg(&tiff)[..]).unwrap();
        assert_eq!(
            exif.get("Apple.HDRImageType").unwrap().int(0).unwrap(),
            3,
            "{order:?}"
        );
        assert_eq!(exif.get_string("Apple.ContentIdentifier").unwrap(), "abc");
    }
}

#[test]
fn test_apple_signature_with_corrupt_directory() {
    let order = ByteOrderType::BigEndian;
    let mut note = b"Apple iOS\0\0\x01MM".to_vec();
    note.extend_from_slice(&order.u16(0x00ff));
    let tiff = camera_tiff(order, "Apple", "iPhone 13", IfdBuilder::new().undefined(0x927c, &note));

    let err = decode(&tiff[..]).unwrap_err();
    match err {
        DecodeError::Parser { parser, source, exif } => {
            assert_eq!(parser, "Apple");
            assert!(matches!(source, ParseError::MakerNote { vendor: "Apple", .. }));
            assert!(exif.contains(names::MAKER_NOTE));
        }
        other => panic!("unexpected error: {other}"),
    }
}

// =============================================================================
// Canon
// =============================================================================

fn canon_tiff(order: ByteOrderType) -> Vec<u8> {
    let mut settings = vec![0u16; 30];
    settings[7] = 1; // AI Servo AF
    settings[17] = 3; // Evaluative
    settings[22] = 1; // EF 50mm f/1.8

    let mut shot_info = vec![0u16; 34];
    shot_info[9] = 7;
    shot_info[12] = 153;

    let mut af_info = vec![0u16; 12];
    af_info[1] = 2;
    af_info[2] = 9;
    af_info[4] = 5472;
    af_info[5] = 3648;

    let time_info = vec![16, 540, 6, 0];

    let len = canon_note_len(settings.len(), shot_info.len(), af_info.len(), time_info.len());
    camera_tiff(
        order,
        "Canon",
        "Canon EOS 5D Mark IV",
        IfdBuilder::new()
            .ascii(0x9003, "2022:05:06 07:08:09")
            .located(0x927c, len, move |at, order| {
                canon_note(at, order, &settings, &shot_info, &af_info, &time_info)
            }),
    )
}

#[test]
fn test_canon_note_with_absolute_offsets() {
    for order in BOTH_ORDERS {
        let exif = decode(&canon_tiff(order)[..]).unwrap();

        assert_eq!(exif.get("Canon.CameraSettings").unwrap().count(), 30);
        assert_eq!(exif.get("Canon.ShotInfo").unwrap().count(), 34);
        assert_eq!(exif.get("Canon.SerialNumber").unwrap().int(0).unwrap(), 1234567);
        assert_eq!(
            exif.get("Canon.TimeInfo").unwrap().int(1).unwrap(),
            540,
            "{order:?}"
        );
    }
}

#[test]
fn test_canon_raw_summary() {
    let exif = decode(&canon_tiff(ByteOrderType::LittleEndian)[..]).unwrap();
    let raw = exif.canon_raw().unwrap();

    assert_eq!(raw.serial_number, "1234567");
    assert_eq!(raw.camera_settings.focus_mode, "AI Servo AF");
    assert_eq!(raw.camera_settings.metering_mode, "Evaluative");
    assert_eq!(raw.camera_settings.lens, "Canon EF 50mm f/1.8");
    assert_eq!(raw.shot_info.sequence_number, 7);
    assert_eq!(raw.shot_info.camera_temperature, Some(25));
    assert_eq!(raw.af_info.area_mode, "Single-point AF");
    assert_eq!(raw.af_info.num_af_points, 9);
    assert_eq!(raw.af_info.canon_image_width, 5472);
    assert_eq!(raw.af_info.canon_image_height, 3648);
    assert_eq!(raw.timezone, "+9:00");
    assert_eq!(raw.timezone_city, "Tokyo");
}

#[test]
fn test_canon_time_zone() {
    let exif = decode(&canon_tiff(ByteOrderType::BigEndian)[..]).unwrap();
    assert_eq!(
        exif.time_zone().unwrap(),
        FixedOffset::east_opt(9 * 3600).unwrap()
    );
}

#[test]
fn test_canon_note_ignored_for_other_makes() {
    let order = ByteOrderType::LittleEndian;
    let note = canon_note(0, order, &[0; 30], &[0; 34], &[0; 12], &[16, 0, 0, 0]);
    let tiff = camera_tiff(order, "Acme", "X1", IfdBuilder::new().undefined(0x927c, &note));

    let exif = decode(&tiff[..]).unwrap();
    assert!(!exif.contains("Canon.CameraSettings"));
    assert!(exif.canon_raw().unwrap_err().is_not_present());
}

#[test]
fn test_canon_parser_adds_nothing_for_nikon() {
    let order = ByteOrderType::BigEndian;
    let note = canon_note(0, order, &[1; 30], &[1; 34], &[1; 12], &[16, 0, 0, 0]);
    let tiff = camera_tiff(order, "Nikon", "D5", IfdBuilder::new().undefined(0x927c, &note));

    let standard = Decoder::with_registry(ParserRegistry::standard(), DecodeOptions::default());
    let mut registry = ParserRegistry::standard();
    registry.register(CanonParser);
    let with_canon = Decoder::with_registry(registry, DecodeOptions::default());

    let before = standard.decode(&tiff[..]).unwrap();
    let after = with_canon.decode(&tiff[..]).unwrap();
    assert_eq!(after.len(), before.len());
    assert_eq!(after, before);
}

// =============================================================================
// Sony
// =============================================================================

fn sony_block() -> Vec<u8> {
    let mut block = vec![0u8; 0x200];
    block[0x3a..0x3d].copy_from_slice(&[0x39, 0x30, 0x00]); // 12345
    block[0x88..0x8e].copy_from_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
    block
}

fn sony_tiff(order: ByteOrderType, model: &str) -> Vec<u8> {
    let block = sony_block();
    let len = 12 + 2 + 12 + 4 + block.len();
    camera_tiff(
        order,
        "SONY",
        model,
        IfdBuilder::new().located(0x927c, len, move |at, order| sony_note(at, order, &block)),
    )
}

#[test]
fn test_sony_enciphered_block() {
    for order in BOTH_ORDERS {
        let exif = decode(&sony_tiff(order, "ILCE-7M3")[..]).unwrap();

        assert!(exif.contains("Sony.0x9050"));
        assert_eq!(
            exif.get("Sony.ShutterCount").unwrap().int(0).unwrap(),
            12345,
            "{order:?}"
        );
        assert_eq!(
            exif.get_string("Sony.InternalSerialNumber").unwrap(),
            "0123456789ab"
        );
        // Zeroed source bytes produce no value
        assert!(!exif.contains("Sony.ShutterCount2"));
    }
}

#[test]
fn test_sony_block_is_stored_enciphered() {
    let exif = decode(&sony_tiff(ByteOrderType::LittleEndian, "ILCE-7M3")[..]).unwrap();
    let stored = exif.get("Sony.0x9050").unwrap();
    assert_eq!(stored.raw(), &sony_scramble(&sony_block())[..]);
}

#[test]
fn test_sony_unknown_model() {
    let exif = decode(&sony_tiff(ByteOrderType::LittleEndian, "DSC-RX100")[..]).unwrap();
    assert!(exif.contains("Sony.0x9050"));
    assert!(!exif.contains("Sony.ShutterCount"));
    assert!(!exif.contains("Sony.InternalSerialNumber"));
}

// =============================================================================
// Nikon
// =============================================================================

#[test]
fn test_nikon_type3_note() {
    let note = nikon_note(
        &[
            (0x001d, 2, 4, *b"123\0"),
            (0x00a7, 4, 1, 4321u32.to_le_bytes()),
        ],
        &[
            (0x0103, 3, 1, [6, 0, 0, 0]),
            (0x0201, 4, 1, 2000u32.to_le_bytes()),
            (0x0202, 4, 1, 50_000u32.to_le_bytes()),
        ],
    );
    let tiff = camera_tiff(
        ByteOrderType::BigEndian,
        "NIKON CORPORATION",
        "NIKON D850",
        IfdBuilder::new().undefined(0x927c, &note),
    );

    let exif = decode(&tiff[..]).unwrap();
    assert_eq!(exif.get_string("Nikon.SerialNumber").unwrap(), "123");
    assert_eq!(exif.get_uints(&["Nikon.ShutterCount"]).unwrap(), 4321);
    assert_eq!(
        exif.get("NikonPreview.PreviewImageLength").unwrap().int(0).unwrap(),
        50_000
    );

    let nikon = PreviewSource::new(
        "NikonPreview.PreviewImageStart",
        "NikonPreview.PreviewImageLength",
        Some("NikonPreview.Compression"),
    );
    assert_eq!(
        exif.preview_image(&[nikon]).unwrap(),
        ImageRange {
            start: 2000,
            length: 50_000
        }
    );
}

#[test]
fn test_nikon_note_without_directories() {
    let mut note = b"Nikon\0\x02\x10\0\0".to_vec();
    note.extend_from_slice(b"II*\0\0\0\0\0");
    let tiff = camera_tiff(
        ByteOrderType::LittleEndian,
        "NIKON CORPORATION",
        "NIKON D850",
        IfdBuilder::new().undefined(0x927c, &note),
    );

    let err = decode(&tiff[..]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Parser {
            parser: "NikonV3",
            source: ParseError::MakerNote {
                vendor: "Nikon",
                source: TiffError::InvalidIfdOffset(0)
            },
            ..
        }
    ));
}

// =============================================================================
// Adobe DNG
// =============================================================================

#[test]
fn test_dng_sub_ifds_and_preview() {
    for order in BOTH_ORDERS {
        let tiff = TiffBuilder::new(order)
            .add_ifd(
                IfdBuilder::new()
                    .ascii(0x010f, "Adobe")
                    .sub_ifds(0x014a, &[0, 1]),
            )
            .add_sub_ifd(
                IfdBuilder::new()
                    .short(0x0103, &[7])
                    .long(0x0111, &[8])
                    .long(0x0117, &[16]),
            )
            .add_sub_ifd(
                IfdBuilder::new()
                    .short(0x0103, &[1])
                    .long(0x0100, &[6000])
                    .long(0x0101, &[4000]),
            )
            .build();

        let exif = decode(&tiff[..]).unwrap();
        assert_eq!(exif.get_uints(&["SubIfd1.Width"]).unwrap(), 6000, "{order:?}");
        assert_eq!(exif.get_uints(&["SubIfd1.ImageLength"]).unwrap(), 4000);

        let preview = exif.preview_image(&[]).unwrap();
        assert_eq!(preview, ImageRange { start: 8, length: 16 });
        assert_eq!(preview.slice(exif.raw()), Some(&tiff[8..24]));
    }
}

#[test]
fn test_dng_corrupt_sub_ifd() {
    let order = ByteOrderType::LittleEndian;
    let tiff = TiffBuilder::new(order)
        .add_ifd(
            IfdBuilder::new()
                .ascii(0x010f, "Adobe")
                .raw_entry(0x014a, 4, 1, order.u32(60_000)),
        )
        .build();

    let err = decode(&tiff[..]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Parser {
            parser: "AdobeDNG",
            ..
        }
    ));
    assert!(err.exif().unwrap().contains(names::MAKE));
}
