// ── Dialog font descriptor ────────────────────────────────────────────────────
//
// Platform-neutral mirror of the fields `CreateFontIndirectW` reads from a
// `LOGFONTW`.  The Win32 layer converts it field by field.

/// Points per inch; font sizes are specified in points.
const POINTS_PER_INCH: f64 = 72.0;

/// `LF_FACESIZE`: face-name buffer length in UTF-16 units, terminator included.
pub const FACE_NAME_CAPACITY: usize = 32;

/// `FW_NORMAL`.
pub const WEIGHT_NORMAL: i32 = 400;
/// `DEFAULT_CHARSET`.
pub const DEFAULT_CHARSET: u8 = 1;
/// `OUT_DEFAULT_PRECIS`.
pub const OUT_DEFAULT_PRECIS: u8 = 0;
/// `CLIP_DEFAULT_PRECIS`.
pub const CLIP_DEFAULT_PRECIS: u8 = 0;
/// `CLEARTYPE_QUALITY`.
pub const CLEARTYPE_QUALITY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Negative: character height (cell height minus internal leading).
    pub height: i32,
    /// 0 lets the mapper pick a width matching the aspect ratio.
    pub width: i32,
    pub escapement: i32,
    pub orientation: i32,
    pub weight: i32,
    pub italic: bool,
    pub underline: bool,
    pub strike_out: bool,
    pub char_set: u8,
    pub out_precision: u8,
    pub clip_precision: u8,
    pub quality: u8,
    pub pitch_and_family: u8,
    /// At most `FACE_NAME_CAPACITY - 1` UTF-16 units.
    pub face_name: String,
}

impl FontDescriptor {
    /// Descriptor for a regular-weight dialog font of `point_size` points at
    /// `dpi` vertical dots per inch.
    ///
    /// Returns `None` when the point size is not a positive finite number.
    pub fn for_dialog(face: &str, point_size: f64, dpi: u32) -> Option<Self> {
        if !point_size.is_finite() || point_size <= 0.0 {
            return None;
        }
        Some(Self {
            height: height_for(point_size, dpi),
            width: 0,
            escapement: 0,
            orientation: 0,
            weight: WEIGHT_NORMAL,
            italic: false,
            underline: false,
            strike_out: false,
            char_set: DEFAULT_CHARSET,
            out_precision: OUT_DEFAULT_PRECIS,
            clip_precision: CLIP_DEFAULT_PRECIS,
            quality: CLEARTYPE_QUALITY,
            pitch_and_family: 0,
            face_name: truncate_face_name(face),
        })
    }

    /// Face name as a NUL-terminated, fixed-size UTF-16 buffer.
    pub fn face_name_utf16(&self) -> [u16; FACE_NAME_CAPACITY] {
        let mut buf = [0u16; FACE_NAME_CAPACITY];
        for (slot, unit) in buf
            .iter_mut()
            .zip(self.face_name.encode_utf16().take(FACE_NAME_CAPACITY - 1))
        {
            *slot = unit;
        }
        buf
    }
}

/// `-round(points * dpi / 72)`, rounding half to even.
pub fn height_for(point_size: f64, dpi: u32) -> i32 {
    let pixels = (point_size * f64::from(dpi) / POINTS_PER_INCH).round_ties_even();
    -(pixels as i32)
}

/// Truncate to the face-name buffer without splitting a surrogate pair.
fn truncate_face_name(face: &str) -> String {
    let mut units = 0usize;
    face.chars()
        .take_while(|ch| {
            units += ch.len_utf16();
            units < FACE_NAME_CAPACITY
        })
        .collect()
}
