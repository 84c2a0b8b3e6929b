//! Full range BT.601 matrices shared by the YUV pixel formats.
//!
//! Samples are in the 8 bit scale, chroma centered at 128.

use crate::formats::{ConvertError, NormalizedRgb};

pub(crate) mod mat_idxs {
    pub(crate) const Y: usize = 0;
    pub(crate) const U: usize = 1;
    pub(crate) const V: usize = 2;

    pub(crate) const R: usize = 0;
    pub(crate) const G: usize = 1;
    pub(crate) const B: usize = 2;
}

use mat_idxs::*;

const CHROMA_OFFSET: f32 = 128.0;
const MAX: f32 = 255.0;

#[rustfmt::skip]
pub(crate) const RGB_TO_YUV: [[f32; 3]; 3] = [
    [ 0.299,     0.587,     0.114   ],
    [-0.168736, -0.331264,  0.5     ],
    [ 0.5,      -0.418688, -0.081312],
];

#[rustfmt::skip]
pub(crate) const YUV_TO_RGB: [[f32; 3]; 3] = [
    [1.0,  0.0,       1.402   ],
    [1.0, -0.344136, -0.714136],
    [1.0,  1.772,     0.0     ],
];

pub(crate) fn yuv_to_rgb(y: f32, u: f32, v: f32) -> Result<NormalizedRgb, ConvertError> {
    let yuv = [y, u - CHROMA_OFFSET, v - CHROMA_OFFSET];
    let m = &YUV_TO_RGB;

    let row = |i: usize| m[i][Y] * yuv[Y] + m[i][U] * yuv[U] + m[i][V] * yuv[V];

    NormalizedRgb::new(row(R) / MAX, row(G) / MAX, row(B) / MAX)
}

pub(crate) fn rgb_to_yuv(rgb: NormalizedRgb) -> Result<(f32, f32, f32), ConvertError> {
    let rgb = rgb.check()?;
    let rgb = [rgb.r * MAX, rgb.g * MAX, rgb.b * MAX];
    let m = &RGB_TO_YUV;

    let row = |i: usize| m[i][R] * rgb[R] + m[i][G] * rgb[G] + m[i][B] * rgb[B];

    Ok((row(Y), row(U) + CHROMA_OFFSET, row(V) + CHROMA_OFFSET))
}
