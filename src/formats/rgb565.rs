use super::{ConvertError, NormalizedRgb, PairPhase, Pixel, check_group_len, quantize};
use crate::PixelFormat;
use crate::bits::{get, put};

const R_BITS: u32 = 5;
const R_OFS: u32 = 11;
const G_BITS: u32 = 6;
const G_OFS: u32 = 5;
const B_BITS: u32 = 5;
const B_OFS: u32 = 0;

const R_MAX: f32 = ((1 << R_BITS) - 1) as f32;
const G_MAX: f32 = ((1 << G_BITS) - 1) as f32;
const B_MAX: f32 = ((1 << B_BITS) - 1) as f32;

/// 16 bit RGB pixel, channels in their 5/6/5 bit scale
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rgb565 {
    r: f32,
    g: f32,
    b: f32,
}

impl_weighted_ops!(Rgb565 { r, g, b });

impl Rgb565 {
    /// Build a pixel from its packed word
    pub fn from_word(word: u16) -> Self {
        Self {
            r: get::<u16, true>(word, R_BITS, R_OFS) as f32,
            g: get::<u16, true>(word, G_BITS, G_OFS) as f32,
            b: get::<u16, true>(word, B_BITS, B_OFS) as f32,
        }
    }

    /// Rounds and clamps every channel into its field
    pub fn to_word(&self) -> Result<u16, ConvertError> {
        if !self.is_finite() {
            return Err(ConvertError::NonFinite);
        }

        let r = put::<u16, true>(quantize(self.r, R_MAX) as u16, R_BITS, R_OFS);
        let g = put::<u16, true>(quantize(self.g, G_MAX) as u16, G_BITS, G_OFS);
        let b = put::<u16, true>(quantize(self.b, B_MAX) as u16, B_BITS, B_OFS);

        Ok(r | g | b)
    }
}

impl Pixel for Rgb565 {
    const FORMAT: PixelFormat = PixelFormat::RGB565;

    fn decode(raw: &[u8], _: PairPhase) -> Result<Self, ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        Ok(Self::from_word(u16::from_le_bytes([raw[0], raw[1]])))
    }

    fn encode(&self, raw: &mut [u8], _: PairPhase) -> Result<(), ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        raw.copy_from_slice(&self.to_word()?.to_le_bytes());

        Ok(())
    }

    fn to_normalized_rgb(&self) -> Result<NormalizedRgb, ConvertError> {
        NormalizedRgb::new(self.r / R_MAX, self.g / G_MAX, self.b / B_MAX)
    }

    fn from_normalized_rgb(rgb: NormalizedRgb) -> Result<Self, ConvertError> {
        let rgb = rgb.check()?;

        Ok(Self {
            r: rgb.r * R_MAX,
            g: rgb.g * G_MAX,
            b: rgb.b * B_MAX,
        })
    }
}
