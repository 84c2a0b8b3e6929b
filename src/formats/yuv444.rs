use super::yuv::{rgb_to_yuv, yuv_to_rgb};
use super::{ConvertError, NormalizedRgb, PairPhase, Pixel, check_group_len, quantize};
use crate::PixelFormat;

const MAX: f32 = u8::MAX as f32;

/// YUV pixel without sub sampling, Y U V X byte order.
///
/// The fourth byte carries no color information. It is interpolated like a channel and written
/// back unchanged by identity resampling, conversions from RGB set it to zero.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Yuv444 {
    y: f32,
    u: f32,
    v: f32,
    x: f32,
}

impl_weighted_ops!(Yuv444 { y, u, v, x });

impl Yuv444 {
    pub fn new(y: u8, u: u8, v: u8) -> Self {
        Self {
            y: y.into(),
            u: u.into(),
            v: v.into(),
            x: 0.0,
        }
    }
}

impl Pixel for Yuv444 {
    const FORMAT: PixelFormat = PixelFormat::YUV444;

    fn decode(raw: &[u8], _: PairPhase) -> Result<Self, ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        Ok(Self {
            y: raw[0].into(),
            u: raw[1].into(),
            v: raw[2].into(),
            x: raw[3].into(),
        })
    }

    fn encode(&self, raw: &mut [u8], _: PairPhase) -> Result<(), ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        if !self.is_finite() {
            return Err(ConvertError::NonFinite);
        }

        raw[0] = quantize(self.y, MAX) as u8;
        raw[1] = quantize(self.u, MAX) as u8;
        raw[2] = quantize(self.v, MAX) as u8;
        raw[3] = quantize(self.x, MAX) as u8;

        Ok(())
    }

    fn to_normalized_rgb(&self) -> Result<NormalizedRgb, ConvertError> {
        yuv_to_rgb(self.y, self.u, self.v)
    }

    fn from_normalized_rgb(rgb: NormalizedRgb) -> Result<Self, ConvertError> {
        let (y, u, v) = rgb_to_yuv(rgb)?;

        Ok(Self { y, u, v, x: 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_byte_survives() {
        let px = Yuv444::decode(&[16, 128, 240, 7], PairPhase::Start).unwrap();

        let mut raw = [0; 4];
        px.encode(&mut raw, PairPhase::Start).unwrap();

        assert_eq!(raw, [16, 128, 240, 7]);
    }

    #[test]
    fn neutral_gray_to_rgb() {
        let rgb = Yuv444::new(128, 128, 128).to_normalized_rgb().unwrap();

        for c in [rgb.r, rgb.g, rgb.b] {
            assert!((c - 128.0 / 255.0).abs() < 1e-6);
        }
    }

    #[test]
    fn saturated_chroma_is_clamped() {
        let rgb = Yuv444::new(255, 255, 255).to_normalized_rgb().unwrap();

        assert_eq!(rgb.r, 1.0);
        assert_eq!(rgb.b, 1.0);
        assert!(rgb.g >= 0.0);
    }
}
