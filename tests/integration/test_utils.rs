//! Test utilities for integration tests.
//!
//! Builders that synthesize TIFF structures in either byte order, wrap them
//! in JPEG, raw EXIF or HEIF containers, and produce vendor maker-note
//! payloads.

// =============================================================================
// Byte order
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    pub fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    pub fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn magic(self) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => *b"II*\0",
            ByteOrderType::BigEndian => *b"MM\0*",
        }
    }
}

// =============================================================================
// IFD entries
// =============================================================================

/// Builds the bytes of an out-of-line value once its absolute offset in the
/// TIFF buffer is known.
pub type LocatedFn = Box<dyn Fn(u32, ByteOrderType) -> Vec<u8>>;

enum EntryValue {
    Bytes(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    /// Pointers to sub-IFDs, by index in [`TiffBuilder::add_sub_ifd`] order
    SubIfds(Vec<usize>),
    /// Data whose content depends on where it lands
    Located { len: usize, build: LocatedFn },
}

struct Entry {
    tag: u16,
    field_type: u16,
    count: u32,
    value: EntryValue,
}

impl Entry {
    fn byte_len(&self) -> usize {
        match &self.value {
            EntryValue::Bytes(b) => b.len(),
            EntryValue::Shorts(v) => v.len() * 2,
            EntryValue::Longs(v) => v.len() * 4,
            EntryValue::Rationals(v) => v.len() * 8,
            EntryValue::SRationals(v) => v.len() * 8,
            EntryValue::SubIfds(v) => v.len() * 4,
            EntryValue::Located { len, .. } => *len,
        }
    }

    fn encode(&self, order: ByteOrderType, own_offset: u32, sub_ifds: &[u32]) -> Vec<u8> {
        match &self.value {
            EntryValue::Bytes(b) => b.clone(),
            EntryValue::Shorts(v) => v.iter().flat_map(|&x| order.u16(x)).collect(),
            EntryValue::Longs(v) => v.iter().flat_map(|&x| order.u32(x)).collect(),
            EntryValue::Rationals(v) => v
                .iter()
                .flat_map(|&(n, d)| order.u32(n).into_iter().chain(order.u32(d)))
                .collect(),
            EntryValue::SRationals(v) => v
                .iter()
                .flat_map(|&(n, d)| order.u32(n as u32).into_iter().chain(order.u32(d as u32)))
                .collect(),
            EntryValue::SubIfds(v) => v.iter().flat_map(|&i| order.u32(sub_ifds[i])).collect(),
            EntryValue::Located { build, .. } => build(own_offset, order),
        }
    }
}

/// Builder for one image file directory.
#[derive(Default)]
pub struct IfdBuilder {
    entries: Vec<Entry>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, tag: u16, field_type: u16, count: usize, value: EntryValue) -> Self {
        self.entries.push(Entry {
            tag,
            field_type,
            count: count as u32,
            value,
        });
        self
    }

    pub fn ascii(self, tag: u16, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        let count = data.len();
        self.push(tag, 2, count, EntryValue::Bytes(data))
    }

    pub fn byte(self, tag: u16, values: &[u8]) -> Self {
        self.push(tag, 1, values.len(), EntryValue::Bytes(values.to_vec()))
    }

    pub fn undefined(self, tag: u16, data: &[u8]) -> Self {
        self.push(tag, 7, data.len(), EntryValue::Bytes(data.to_vec()))
    }

    pub fn short(self, tag: u16, values: &[u16]) -> Self {
        self.push(tag, 3, values.len(), EntryValue::Shorts(values.to_vec()))
    }

    pub fn long(self, tag: u16, values: &[u32]) -> Self {
        self.push(tag, 4, values.len(), EntryValue::Longs(values.to_vec()))
    }

    pub fn rational(self, tag: u16, values: &[(u32, u32)]) -> Self {
        self.push(tag, 5, values.len(), EntryValue::Rationals(values.to_vec()))
    }

    pub fn srational(self, tag: u16, values: &[(i32, i32)]) -> Self {
        self.push(tag, 10, values.len(), EntryValue::SRationals(values.to_vec()))
    }

    /// LONG pointer to the `index`-th sub-IFD of the enclosing builder.
    pub fn sub_ifd(self, tag: u16, index: usize) -> Self {
        self.sub_ifds(tag, &[index])
    }

    /// LONG array of sub-IFD pointers, as in the DNG `SubIFDs` tag.
    pub fn sub_ifds(self, tag: u16, indices: &[usize]) -> Self {
        self.push(tag, 4, indices.len(), EntryValue::SubIfds(indices.to_vec()))
    }

    /// Raw entry with an explicit type and count, for malformed input.
    pub fn raw_entry(self, tag: u16, field_type: u16, count: u32, value: [u8; 4]) -> Self {
        let mut builder = self.push(tag, field_type, 1, EntryValue::Bytes(value.to_vec()));
        if let Some(entry) = builder.entries.last_mut() {
            entry.count = count;
        }
        builder
    }

    /// UNDEFINED entry of `len` bytes built from its final absolute offset.
    /// `len` must exceed four bytes.
    pub fn located<F>(self, tag: u16, len: usize, build: F) -> Self
    where
        F: Fn(u32, ByteOrderType) -> Vec<u8> + 'static,
    {
        assert!(len > 4, "located values are stored out of line");
        self.push(
            tag,
            7,
            len,
            EntryValue::Located {
                len,
                build: Box::new(build),
            },
        )
    }

    fn size(&self) -> usize {
        2 + self.entries.len() * 12 + 4
    }
}

// =============================================================================
// TIFF builder
// =============================================================================

/// Builder for a TIFF structure: a chain of top-level IFDs plus sub-IFDs
/// reachable only through pointer tags.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    chain: Vec<IfdBuilder>,
    sub_ifds: Vec<IfdBuilder>,
}

impl TiffBuilder {
    pub fn new(byte_order: ByteOrderType) -> Self {
        Self {
            byte_order,
            chain: Vec::new(),
            sub_ifds: Vec::new(),
        }
    }

    /// Append an IFD to the top-level chain (IFD0, then IFD1).
    pub fn add_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.chain.push(ifd);
        self
    }

    /// Add a sub-IFD; refer to it with [`IfdBuilder::sub_ifd`] by its index
    /// in call order.
    pub fn add_sub_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.sub_ifds.push(ifd);
        self
    }

    /// Build the TIFF file data.
    ///
    /// Each IFD is followed by its out-of-line values, word aligned.
    pub fn build(self) -> Vec<u8> {
        let order = self.byte_order;
        let all: Vec<&IfdBuilder> = self.chain.iter().chain(self.sub_ifds.iter()).collect();

        // Layout pass
        let mut ifd_offsets = Vec::with_capacity(all.len());
        let mut value_offsets: Vec<Vec<Option<u32>>> = Vec::with_capacity(all.len());
        let mut cursor = 8usize;
        for ifd in &all {
            ifd_offsets.push(cursor as u32);
            cursor += ifd.size();
            let mut offsets = Vec::with_capacity(ifd.entries.len());
            for entry in &ifd.entries {
                let len = entry.byte_len();
                if len > 4 {
                    offsets.push(Some(cursor as u32));
                    cursor += len + len % 2;
                } else {
                    offsets.push(None);
                }
            }
            value_offsets.push(offsets);
        }
        let sub_ifd_offsets = ifd_offsets[self.chain.len()..].to_vec();

        // Write pass
        let mut data = vec![0u8; cursor];
        data[0..4].copy_from_slice(&order.magic());
        let first = ifd_offsets.first().copied().unwrap_or(0);
        data[4..8].copy_from_slice(&order.u32(first));

        for (i, ifd) in all.iter().enumerate() {
            let mut pos = ifd_offsets[i] as usize;
            data[pos..pos + 2].copy_from_slice(&order.u16(ifd.entries.len() as u16));
            pos += 2;

            for (entry, value_offset) in ifd.entries.iter().zip(&value_offsets[i]) {
                data[pos..pos + 2].copy_from_slice(&order.u16(entry.tag));
                data[pos + 2..pos + 4].copy_from_slice(&order.u16(entry.field_type));
                data[pos + 4..pos + 8].copy_from_slice(&order.u32(entry.count));
                match value_offset {
                    Some(at) => {
                        let bytes = entry.encode(order, *at, &sub_ifd_offsets);
                        let at = *at as usize;
                        data[at..at + bytes.len()].copy_from_slice(&bytes);
                        data[pos + 8..pos + 12].copy_from_slice(&order.u32(at as u32));
                    }
                    None => {
                        let bytes = entry.encode(order, (pos + 8) as u32, &sub_ifd_offsets);
                        data[pos + 8..pos + 8 + bytes.len()].copy_from_slice(&bytes);
                    }
                }
                pos += 12;
            }

            let next = if i + 1 < self.chain.len() {
                ifd_offsets[i + 1]
            } else {
                0
            };
            data[pos..pos + 4].copy_from_slice(&order.u32(next));
        }

        data
    }
}

// =============================================================================
// Containers
// =============================================================================

fn segment(code: u8, body: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, code];
    out.extend_from_slice(&((body.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(body);
    out
}

/// JPEG with a JFIF APP0, an XMP APP1, the EXIF APP1 and a dummy scan.
pub fn wrap_jpeg(tiff: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend(segment(0xE0, b"JFIF\0\x01\x02\0\0\x01\0\x01\0\0"));
    data.extend(segment(0xE1, b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>"));

    let mut exif = b"Exif\0\0".to_vec();
    exif.extend_from_slice(tiff);
    data.extend(segment(0xE1, &exif));

    data.extend(segment(0xDA, &[0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]));
    data.extend_from_slice(&[0x12, 0x34, 0xFF, 0x00, 0x56]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// A bare `Exif\0\0` block.
pub fn wrap_raw_exif(tiff: &[u8]) -> Vec<u8> {
    let mut data = b"Exif\0\0".to_vec();
    data.extend_from_slice(tiff);
    data
}

fn heif_box(boxtype: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
    out.extend_from_slice(boxtype);
    out.extend_from_slice(body);
    out
}

/// HEIC file whose `Exif` item (id 2) lives in `mdat`, located by file
/// offset.
pub fn wrap_heif(tiff: &[u8]) -> Vec<u8> {
    let mut payload = 6u32.to_be_bytes().to_vec();
    payload.extend_from_slice(b"Exif\0\0");
    payload.extend_from_slice(tiff);

    let ftyp = heif_box(b"ftyp", b"heic\0\0\0\0mif1heic");

    // hdlr: version/flags, pre_defined, handler type, reserved, empty name
    let mut hdlr = vec![0u8; 8];
    hdlr.extend_from_slice(b"pict");
    hdlr.extend_from_slice(&[0u8; 13]);

    let infe = |id: u16, item_type: &[u8; 4]| {
        let mut body = vec![2, 0, 0, 0];
        body.extend_from_slice(&id.to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(item_type);
        body.push(0);
        heif_box(b"infe", &body)
    };
    let mut iinf = vec![0, 0, 0, 0, 0, 2];
    iinf.extend(infe(1, b"hvc1"));
    iinf.extend(infe(2, b"Exif"));

    // iloc v1, 4-byte offsets and lengths, one item with one extent. The
    // offset is patched once the meta box size is known.
    let iloc = |offset: u32| {
        let mut body = vec![1, 0, 0, 0, 0x44, 0x00];
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&2u16.to_be_bytes());
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(&[0, 0]);
        body.extend_from_slice(&1u16.to_be_bytes());
        body.extend_from_slice(&offset.to_be_bytes());
        body.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        heif_box(b"iloc", &body)
    };

    let meta = |offset: u32| {
        let mut body = vec![0, 0, 0, 0];
        body.extend(heif_box(b"hdlr", &hdlr));
        body.extend(heif_box(b"iinf", &iinf));
        body.extend(iloc(offset));
        heif_box(b"meta", &body)
    };

    let payload_at = ftyp.len() + meta(0).len() + 8;
    let mut data = ftyp.clone();
    data.extend(meta(payload_at as u32));
    data.extend(heif_box(b"mdat", &payload));
    data
}

// =============================================================================
// Maker notes
// =============================================================================

/// Apple note: signature, padding, then an IFD with note-relative offsets.
pub fn apple_note(order: ByteOrderType, entries: &[(u16, u16, u32, [u8; 4])]) -> Vec<u8> {
    let mut data = b"Apple iOS\0\0\x01MM".to_vec();
    data.extend_from_slice(&order.u16(entries.len() as u16));
    for (tag, field_type, count, value) in entries {
        data.extend_from_slice(&order.u16(*tag));
        data.extend_from_slice(&order.u16(*field_type));
        data.extend_from_slice(&order.u32(*count));
        data.extend_from_slice(value);
    }
    data.extend_from_slice(&[0, 0, 0, 0]);
    data
}

/// Canon note with CameraSettings, ShotInfo and AFInfo SHORT arrays, the
/// `TimeInfo` SLONG array and a serial number. Out-of-line values use
/// absolute TIFF offsets, so the note must be built from its own offset.
pub fn canon_note(
    at: u32,
    order: ByteOrderType,
    settings: &[u16],
    shot_info: &[u16],
    af_info: &[u16],
    time_info: &[i32],
) -> Vec<u8> {
    let entries = 5u32;
    let mut values = Vec::new();
    let mut dir = order.u16(entries as u16).to_vec();
    let mut data_at = at + 2 + entries * 12 + 4;

    let mut push = |dir: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, bytes: Vec<u8>| {
        dir.extend_from_slice(&order.u16(tag));
        dir.extend_from_slice(&order.u16(field_type));
        dir.extend_from_slice(&order.u32(count));
        if bytes.len() <= 4 {
            let mut inline = bytes.clone();
            inline.resize(4, 0);
            dir.extend_from_slice(&inline);
        } else {
            dir.extend_from_slice(&order.u32(data_at));
            data_at += bytes.len() as u32;
            values.extend(bytes);
        }
    };
    let shorts = |v: &[u16]| v.iter().flat_map(|&x| order.u16(x)).collect::<Vec<u8>>();

    push(&mut dir, 0x0001, 3, settings.len() as u32, shorts(settings));
    push(&mut dir, 0x0004, 3, shot_info.len() as u32, shorts(shot_info));
    push(&mut dir, 0x000c, 4, 1, order.u32(1234567).to_vec());
    push(&mut dir, 0x0026, 3, af_info.len() as u32, shorts(af_info));
    push(
        &mut dir,
        0x0035,
        9,
        time_info.len() as u32,
        time_info.iter().flat_map(|&x| order.u32(x as u32)).collect(),
    );
    dir.extend_from_slice(&[0, 0, 0, 0]);
    dir.extend(values);
    dir
}

/// Length of the note built by [`canon_note`].
pub fn canon_note_len(settings: usize, shot_info: usize, af_info: usize, time_info: usize) -> usize {
    let out_of_line = |len: usize| if len > 4 { len } else { 0 };
    2 + 5 * 12
        + 4
        + out_of_line(settings * 2)
        + out_of_line(shot_info * 2)
        + out_of_line(af_info * 2)
        + out_of_line(time_info * 4)
}

/// Encipher a plain 0x9050 block the way Sony bodies store it.
pub fn sony_scramble(plain: &[u8]) -> Vec<u8> {
    plain
        .iter()
        .map(|&p| {
            if p < 249 {
                ((p as u32).pow(3) % 249) as u8
            } else {
                p
            }
        })
        .collect()
}

/// Sony note with the `SONY DSC` header and a single 0x9050 entry whose
/// data follows the directory at an absolute offset.
pub fn sony_note(at: u32, order: ByteOrderType, plain_block: &[u8]) -> Vec<u8> {
    let data_at = at + 12 + 2 + 12 + 4;
    let mut data = b"SONY DSC \0\0\0".to_vec();
    data.extend_from_slice(&order.u16(1));
    data.extend_from_slice(&order.u16(0x9050));
    data.extend_from_slice(&order.u16(7));
    data.extend_from_slice(&order.u32(plain_block.len() as u32));
    data.extend_from_slice(&order.u32(data_at));
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend(sony_scramble(plain_block));
    data
}

/// Raw little-endian IFD entry: tag, type, count and the inline value.
pub type RawEntry = (u16, u16, u32, [u8; 4]);

fn le_ifd(entries: &[RawEntry], next: u32) -> Vec<u8> {
    let mut data = (entries.len() as u16).to_le_bytes().to_vec();
    for (tag, field_type, count, value) in entries {
        data.extend_from_slice(&tag.to_le_bytes());
        data.extend_from_slice(&field_type.to_le_bytes());
        data.extend_from_slice(&count.to_le_bytes());
        data.extend_from_slice(value);
    }
    data.extend_from_slice(&next.to_le_bytes());
    data
}

/// Nikon type 3 note: signature, version, then a little-endian TIFF.
///
/// When `preview` is not empty, a preview IFD follows the main one and a
/// `PreviewIFD` pointer (0x0011) is appended to `entries`.
pub fn nikon_note(entries: &[RawEntry], preview: &[RawEntry]) -> Vec<u8> {
    let mut main = entries.to_vec();
    if !preview.is_empty() {
        let preview_at = 8 + 2 + (main.len() as u32 + 1) * 12 + 4;
        main.push((0x0011, 13, 1, preview_at.to_le_bytes()));
    }

    let mut data = b"Nikon\0\x02\x10\0\0".to_vec();
    data.extend_from_slice(b"II*\0\x08\0\0\0");
    data.extend(le_ifd(&main, 0));
    if !preview.is_empty() {
        data.extend(le_ifd(preview, 0));
    }
    data
}

// =============================================================================
// Common fixtures
// =============================================================================

/// IFD0 (Make, Model, Orientation, Exif and GPS pointers), a thumbnail IFD1,
/// an Exif sub-IFD with exposure data and a GPS sub-IFD.
pub fn create_camera_tiff(order: ByteOrderType) -> Vec<u8> {
    let ifd0 = IfdBuilder::new()
        .ascii(0x010f, "Acme")
        .ascii(0x0110, "Model X")
        .short(0x0112, &[6])
        .ascii(0x0132, "2021:07:04 09:10:11")
        .sub_ifd(0x8769, 0)
        .sub_ifd(0x8825, 1);
    let ifd1 = IfdBuilder::new()
        .short(0x0103, &[6])
        .long(0x0201, &[4000])
        .long(0x0202, &[1500]);
    let exif = IfdBuilder::new()
        .rational(0x829a, &[(1, 250)])
        .rational(0x829d, &[(28, 10)])
        .short(0x8822, &[3])
        .short(0x8827, &[200])
        .ascii(0x9003, "2021:07:04 09:10:11")
        .srational(0x9204, &[(-1, 3)])
        .short(0x9207, &[5])
        .short(0x9209, &[0x10])
        .rational(0x920a, &[(50, 1)])
        .ascii(0x9291, "42")
        .long(0xa002, &[6000])
        .long(0xa003, &[4000]);
    let gps = IfdBuilder::new()
        .ascii(0x0001, "N")
        .rational(0x0002, &[(48, 1), (51, 1), (2940, 100)])
        .ascii(0x0003, "E")
        .rational(0x0004, &[(2, 1), (17, 1), (4020, 100)])
        .byte(0x0005, &[0])
        .rational(0x0006, &[(355, 10)])
        .rational(0x0007, &[(7, 1), (10, 1), (11, 1)])
        .ascii(0x001d, "2021:07:04");

    TiffBuilder::new(order)
        .add_ifd(ifd0)
        .add_ifd(ifd1)
        .add_sub_ifd(exif)
        .add_sub_ifd(gps)
        .build()
}
