use super::yuv::{rgb_to_yuv, yuv_to_rgb};
use super::{ConvertError, NormalizedRgb, PairPhase, Pixel, check_group_len, quantize};
use crate::PixelFormat;

const MAX: f32 = u8::MAX as f32;

const Y0: usize = 0;
const U: usize = 1;
const Y1: usize = 2;
const V: usize = 3;

/// One pixel of a YUYV pair: its own luma and the chroma shared with its neighbour
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Yuv422 {
    y: f32,
    u: f32,
    v: f32,
}

impl_weighted_ops!(Yuv422 { y, u, v });

impl Yuv422 {
    pub fn new(y: u8, u: u8, v: u8) -> Self {
        Self {
            y: y.into(),
            u: u.into(),
            v: v.into(),
        }
    }

    pub fn luma(&self) -> f32 {
        self.y
    }

    pub fn chroma(&self) -> (f32, f32) {
        (self.u, self.v)
    }
}

impl Pixel for Yuv422 {
    const FORMAT: PixelFormat = PixelFormat::YUV422;

    fn decode(raw: &[u8], phase: PairPhase) -> Result<Self, ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        let y = match phase {
            PairPhase::Start => raw[Y0],
            PairPhase::End => raw[Y1],
        };

        Ok(Self::new(y, raw[U], raw[V]))
    }

    /// The second pixel of a pair stores the mean of both pixels' chroma, which requires the
    /// first pixel to be encoded into the same group beforehand.
    fn encode(&self, raw: &mut [u8], phase: PairPhase) -> Result<(), ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        if !self.is_finite() {
            return Err(ConvertError::NonFinite);
        }

        match phase {
            PairPhase::Start => {
                raw[Y0] = quantize(self.y, MAX) as u8;
                raw[U] = quantize(self.u, MAX) as u8;
                raw[V] = quantize(self.v, MAX) as u8;
            }
            PairPhase::End => {
                raw[Y1] = quantize(self.y, MAX) as u8;
                raw[U] = quantize((f32::from(raw[U]) + self.u) / 2.0, MAX) as u8;
                raw[V] = quantize((f32::from(raw[V]) + self.v) / 2.0, MAX) as u8;
            }
        }

        Ok(())
    }

    fn to_normalized_rgb(&self) -> Result<NormalizedRgb, ConvertError> {
        yuv_to_rgb(self.y, self.u, self.v)
    }

    fn from_normalized_rgb(rgb: NormalizedRgb) -> Result<Self, ConvertError> {
        let (y, u, v) = rgb_to_yuv(rgb)?;

        Ok(Self { y, u, v })
    }
}
