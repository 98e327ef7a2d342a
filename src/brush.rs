use egui::Color32;
use thiserror::Error;

/// Fixed-point scale used to persist the brush size ratio.
pub const SIZE_PRECISION: f32 = 100_000.0;

const COLOR_SPEC_INVALID: u8 = 0;
const COLOR_SPEC_RGB: u8 = 1;

/// Length of a serialized color: spec byte, four 16-bit channels and padding.
const COLOR_LEN: usize = 1 + 5 * 2;

/// Length of a serialized brush record.
pub const SERIALIZED_LEN: usize = 4 + COLOR_LEN;

/// Paint tool setting shared between the color picker and the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Brush {
    /// Stroke width as a fraction of the allowed range, usually in `[0, 1]`.
    pub size_ratio: f32,
    pub color: Color32,
}

impl Brush {
    pub fn new(size_ratio: f32, color: Color32) -> Self {
        Self { size_ratio, color }
    }
}

/// Reasons a persisted brush record can be rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrushCodecError {
    #[error("brush record truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("unsupported color spec {0}")]
    UnsupportedColorSpec(u8),
}

pub type BrushCodecResult<T> = Result<T, BrushCodecError>;

/// Encodes a brush as a big-endian record: the fixed-point size ratio
/// followed by the color.
pub fn serialize(brush: &Brush) -> Vec<u8> {
    let size = (brush.size_ratio * SIZE_PRECISION).round() as i32;

    let mut result = Vec::with_capacity(SERIALIZED_LEN);
    result.extend_from_slice(&size.to_be_bytes());
    write_color(&mut result, brush.color);
    result
}

/// Decodes a persisted brush, falling back to [`Brush::default`] on any
/// malformed input so that a corrupted setting never blocks the editor.
pub fn deserialize(data: &[u8]) -> Brush {
    match try_deserialize(data) {
        Ok(brush) => brush,
        Err(err) => {
            if !data.is_empty() {
                log::warn!("Ignoring persisted photo editor brush: {}", err);
            }
            Brush::default()
        }
    }
}

pub fn try_deserialize(data: &[u8]) -> BrushCodecResult<Brush> {
    let mut reader = Reader { data, offset: 0 };

    let size = i32::from_be_bytes(reader.take::<4>()?);
    let color = read_color(&mut reader)?;

    Ok(Brush {
        size_ratio: size as f32 / SIZE_PRECISION,
        color,
    })
}

// Channels are written as egui stores them (premultiplied) so that every
// `Color32` survives a round-trip unchanged.
fn write_color(out: &mut Vec<u8>, color: Color32) {
    let [r, g, b, a] = color.to_array();

    out.push(COLOR_SPEC_RGB);
    for channel in [a, r, g, b] {
        out.extend_from_slice(&widen(channel).to_be_bytes());
    }
    // padding
    out.extend_from_slice(&0u16.to_be_bytes());
}

fn read_color(reader: &mut Reader<'_>) -> BrushCodecResult<Color32> {
    let spec = reader.take::<1>()?[0];

    let mut channels = [0u16; 5];
    for channel in &mut channels {
        *channel = u16::from_be_bytes(reader.take::<2>()?);
    }
    let [a, r, g, b, _padding] = channels;

    match spec {
        COLOR_SPEC_INVALID => Ok(Color32::default()),
        COLOR_SPEC_RGB => Ok(Color32::from_rgba_premultiplied(
            narrow(r),
            narrow(g),
            narrow(b),
            narrow(a),
        )),
        other => Err(BrushCodecError::UnsupportedColorSpec(other)),
    }
}

// 8-bit channels are stored in 16 bits as `c * 0x101`.
fn widen(channel: u8) -> u16 {
    u16::from(channel) * 0x101
}

fn narrow(channel: u16) -> u8 {
    (channel >> 8) as u8
}

struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl Reader<'_> {
    fn take<const N: usize>(&mut self) -> BrushCodecResult<[u8; N]> {
        let end = self.offset + N;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(BrushCodecError::Truncated {
                needed: end,
                got: self.data.len(),
            })?;
        self.offset = end;

        let mut result = [0u8; N];
        result.copy_from_slice(bytes);
        Ok(result)
    }
}
