use super::{ConvertError, NormalizedRgb, PairPhase, Pixel, check_group_len, quantize};
use crate::PixelFormat;

const MAX: f32 = u8::MAX as f32;

/// 24 bit RGB pixel, R G B byte order
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rgb888 {
    r: f32,
    g: f32,
    b: f32,
}

impl_weighted_ops!(Rgb888 { r, g, b });

impl Rgb888 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r.into(),
            g: g.into(),
            b: b.into(),
        }
    }
}

impl Pixel for Rgb888 {
    const FORMAT: PixelFormat = PixelFormat::RGB888;

    fn decode(raw: &[u8], _: PairPhase) -> Result<Self, ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        Ok(Self::new(raw[0], raw[1], raw[2]))
    }

    fn encode(&self, raw: &mut [u8], _: PairPhase) -> Result<(), ConvertError> {
        check_group_len(Self::FORMAT, raw)?;

        if !self.is_finite() {
            return Err(ConvertError::NonFinite);
        }

        raw[0] = quantize(self.r, MAX) as u8;
        raw[1] = quantize(self.g, MAX) as u8;
        raw[2] = quantize(self.b, MAX) as u8;

        Ok(())
    }

    fn to_normalized_rgb(&self) -> Result<NormalizedRgb, ConvertError> {
        NormalizedRgb::new(self.r / MAX, self.g / MAX, self.b / MAX)
    }

    fn from_normalized_rgb(rgb: NormalizedRgb) -> Result<Self, ConvertError> {
        let rgb = rgb.check()?;

        Ok(Self {
            r: rgb.r * MAX,
            g: rgb.g * MAX,
            b: rgb.b * MAX,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order() {
        let px = Rgb888::decode(&[1, 2, 3], PairPhase::Start).unwrap();
        assert_eq!(px, Rgb888::new(1, 2, 3));

        let mut raw = [0; 3];
        px.encode(&mut raw, PairPhase::Start).unwrap();
        assert_eq!(raw, [1, 2, 3]);
    }

    #[test]
    fn weighted_sum() {
        let mut acc = Rgb888::default();
        acc += Rgb888::new(100, 0, 50) * 0.25;
        acc += Rgb888::new(200, 40, 50) * 0.75;

        let mut raw = [0; 3];
        acc.encode(&mut raw, PairPhase::Start).unwrap();
        assert_eq!(raw, [175, 30, 50]);
    }

    #[test]
    fn normalized_round_trip_is_exact() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            let px = Rgb888::new(v, 255 - v, v / 2);
            let back = Rgb888::from_normalized_rgb(px.to_normalized_rgb().unwrap()).unwrap();

            let (mut a, mut b) = ([0; 3], [0; 3]);
            px.encode(&mut a, PairPhase::Start).unwrap();
            back.encode(&mut b, PairPhase::Start).unwrap();
            assert_eq!(a, b);
        }
    }
}
