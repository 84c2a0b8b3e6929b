use crate::PixelFormat;
use std::fmt;
use std::ops::{AddAssign, Mul};

/// Implements the scalar weighted accumulation every [`Pixel`] needs for interpolation
macro_rules! impl_weighted_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl std::ops::AddAssign for $ty {
            #[inline(always)]
            fn add_assign(&mut self, rhs: Self) {
                $(self.$field += rhs.$field;)+
            }
        }

        impl std::ops::Mul<f32> for $ty {
            type Output = Self;

            #[inline(always)]
            fn mul(self, rhs: f32) -> Self {
                Self {
                    $($field: self.$field * rhs,)+
                }
            }
        }

        impl $ty {
            #[inline(always)]
            fn is_finite(&self) -> bool {
                true $(&& self.$field.is_finite())+
            }
        }
    };
}

mod convert;
mod rgb565;
mod rgb888;
mod yuv;
mod yuv422;
mod yuv444;

pub use convert::{convert, convert_set};
pub use rgb565::Rgb565;
pub use rgb888::Rgb888;
pub use yuv422::Yuv422;
pub use yuv444::Yuv444;

/// Everything that can go wrong when decoding, encoding or converting a single pixel
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    #[error("pixel holds a non-finite channel value")]
    NonFinite,

    #[error("{format:?} groups are {expected} bytes long, but got {got}")]
    InvalidGroupLength {
        format: PixelFormat,
        expected: usize,
        got: usize,
    },
}

/// Position of a pixel inside a sub sampled pixel pair
///
/// Formats without sub sampling always use [`PairPhase::Start`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PairPhase {
    /// First pixel of the pair, its group is accessed without moving on
    #[default]
    Start,
    /// Second pixel of the pair, completes the group
    End,
}

impl PairPhase {
    pub(crate) fn next(self) -> Self {
        match self {
            PairPhase::Start => PairPhase::End,
            PairPhase::End => PairPhase::Start,
        }
    }
}

/// Plain RGB triple with every channel in `0.0..=1.0`, the pivot between pixel formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl NormalizedRgb {
    /// Clamp the channels into `0.0..=1.0`, rejects NaN and infinities
    pub fn new(r: f32, g: f32, b: f32) -> Result<Self, ConvertError> {
        if !(r.is_finite() && g.is_finite() && b.is_finite()) {
            return Err(ConvertError::NonFinite);
        }

        Ok(Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        })
    }

    fn check(self) -> Result<Self, ConvertError> {
        Self::new(self.r, self.g, self.b)
    }
}

/// A decoded pixel of one [`PixelFormat`]
///
/// Channels are stored as floats in the native scale of the format, so the weighted sums of the
/// interpolation kernels stay exact when a single weight is `1.0`.
pub trait Pixel:
    Copy
    + Default
    + fmt::Debug
    + PartialEq
    + AddAssign
    + Mul<f32, Output = Self>
    + Send
    + Sync
    + 'static
{
    const FORMAT: PixelFormat;

    /// Decode the pixel at `phase` from exactly one group of bytes
    fn decode(raw: &[u8], phase: PairPhase) -> Result<Self, ConvertError>;

    /// Encode the pixel at `phase` into exactly one group of bytes
    fn encode(&self, raw: &mut [u8], phase: PairPhase) -> Result<(), ConvertError>;

    fn to_normalized_rgb(&self) -> Result<NormalizedRgb, ConvertError>;

    fn from_normalized_rgb(rgb: NormalizedRgb) -> Result<Self, ConvertError>;
}

fn check_group_len(format: PixelFormat, raw: &[u8]) -> Result<(), ConvertError> {
    if raw.len() != format.bytes_per_group() {
        return Err(ConvertError::InvalidGroupLength {
            format,
            expected: format.bytes_per_group(),
            got: raw.len(),
        });
    }

    Ok(())
}

/// Round and clamp a channel into `0..=max`
#[inline(always)]
fn quantize(value: f32, max: f32) -> f32 {
    value.round().clamp(0.0, max)
}
