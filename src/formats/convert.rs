use super::{ConvertError, Pixel};
use crate::PixelSet;
use std::any::Any;

/// Convert a pixel into another format through [`NormalizedRgb`](super::NormalizedRgb).
///
/// Identical formats are copied as is, without touching the float pivot.
pub fn convert<S: Pixel, D: Pixel>(src: &S) -> Result<D, ConvertError> {
    if let Some(same) = (src as &dyn Any).downcast_ref::<D>() {
        return Ok(*same);
    }

    D::from_normalized_rgb(src.to_normalized_rgb()?)
}

/// [`convert`] every slot of `src` into the same slot of `dst`
pub fn convert_set<S: Pixel, D: Pixel, const N: usize>(
    src: &PixelSet<S, N>,
    dst: &mut PixelSet<D, N>,
) -> Result<(), ConvertError> {
    for i in 0..N {
        dst[i] = convert(&src[i])?;
    }

    Ok(())
}
