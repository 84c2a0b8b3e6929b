//! Resampling of packed RGB and YUV images.
//!
//! An [`Image`] wraps a flat buffer of a fixed [`Pixel`] type. [`resample`] scales a source image
//! to the size of a destination image, converting between pixel formats on the way, using a
//! separable Catmull-Rom filter. Other kernels can be combined through [`Resampler`].
//!
//! ```
//! use ezk_resample::{Image, Rgb888, Yuv422, resample};
//!
//! let src = Image::<Rgb888, _>::new(vec![128u8; 8 * 8 * 3], 8, 8, 0)?;
//! let mut dst = Image::<Yuv422, _>::blank(4, 4)?;
//!
//! resample(&src, &mut dst)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use formats::{
    ConvertError, NormalizedRgb, PairPhase, Pixel, Rgb565, Rgb888, Yuv422, Yuv444, convert,
    convert_set,
};
pub use image::{Image, ImageError};
pub use pixel_format::PixelFormat;
pub use resample::{
    Bicubic, BicubicResampler, Interpolation, Linear, Nearest, ResampleError, Resampler,
    WeightCache, map_coord, resample,
};
pub use row::{Row, RowError, RowSet};
pub use window::{PixelSet, RingSet, WindowError};

pub mod bits;
mod formats;
mod image;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod pixel_format;
mod resample;
mod row;
mod util;
mod window;
