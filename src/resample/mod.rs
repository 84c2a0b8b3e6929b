use crate::formats::{ConvertError, convert_set};
use crate::image::ImageError;
use crate::row::RowError;
use crate::util::tracing_wrappers::*;
use crate::window::WindowError;
use crate::{Image, Pixel, PixelSet, RowSet};
use std::collections::HashMap;
use std::marker::PhantomData;

mod kernel;

pub use kernel::{Bicubic, Interpolation, Linear, Nearest};

/// Everything that can go wrong when calling [`Resampler::resample`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Row(#[from] RowError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Window(#[from] WindowError),
}

/// Map the output coordinate `out` into the input, returning the input index and the fraction
/// past it
#[inline]
pub fn map_coord(out: usize, ratio: f32) -> (usize, f32) {
    let position = out as f32 * ratio;
    let index = position.floor();

    (index as usize, position - index)
}

/// Kernels by fraction, keyed on the exact bit pattern of the fraction
#[derive(Debug)]
pub struct WeightCache<K, const N: usize> {
    kernels: HashMap<u32, K>,
}

impl<K: Interpolation<N>, const N: usize> WeightCache<K, N> {
    pub fn new() -> Self {
        Self {
            kernels: HashMap::new(),
        }
    }

    pub fn get(&mut self, fraction: f32) -> &K {
        self.kernels
            .entry(fraction.to_bits())
            .or_insert_with(|| K::new(fraction))
    }

    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }
}

impl<K: Interpolation<N>, const N: usize> Default for WeightCache<K, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Separable resampler, running the vertical kernel `V` over `VN` rows and then the horizontal
/// kernel `H` over `HN` columns
pub struct Resampler<V, H, const VN: usize, const HN: usize> {
    _m: PhantomData<fn() -> (V, H)>,
}

/// Catmull-Rom in both directions
pub type BicubicResampler = Resampler<Bicubic, Bicubic, 4, 4>;

/// Resample `src` into `dst` using [`BicubicResampler`]
pub fn resample<S, D, BS, BD>(
    src: &Image<S, BS>,
    dst: &mut Image<D, BD>,
) -> Result<(), ResampleError>
where
    S: Pixel,
    D: Pixel,
    BS: AsRef<[u8]>,
    BD: AsRef<[u8]> + AsMut<[u8]>,
{
    BicubicResampler::new().resample(src, dst)
}

impl<V, H, const VN: usize, const HN: usize> Clone for Resampler<V, H, VN, HN> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, H, const VN: usize, const HN: usize> Copy for Resampler<V, H, VN, HN> {}

impl<V, H, const VN: usize, const HN: usize> Default for Resampler<V, H, VN, HN>
where
    V: Interpolation<VN>,
    H: Interpolation<HN>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, H, const VN: usize, const HN: usize> Resampler<V, H, VN, HN>
where
    V: Interpolation<VN>,
    H: Interpolation<HN>,
{
    pub fn new() -> Self {
        Self { _m: PhantomData }
    }

    /// Scale `src` to the size of `dst`, converting pixels into the format of `dst`.
    ///
    /// Samples outside of `src` are replaced with the nearest edge sample. The first failure
    /// aborts, leaving the rows written so far in `dst`.
    pub fn resample<S, D, BS, BD>(
        &self,
        src: &Image<S, BS>,
        dst: &mut Image<D, BD>,
    ) -> Result<(), ResampleError>
    where
        S: Pixel,
        D: Pixel,
        BS: AsRef<[u8]>,
        BD: AsRef<[u8]> + AsMut<[u8]>,
    {
        let (src_width, src_height) = (src.width(), src.height());
        let (dst_width, dst_height) = (dst.width(), dst.height());

        let ratio_x = src_width as f32 / dst_width as f32;
        let ratio_y = src_height as f32 / dst_height as f32;

        debug!(
            src_width,
            src_height,
            dst_width,
            dst_height,
            ratio_x,
            ratio_y,
            src_format = ?S::FORMAT,
            dst_format = ?D::FORMAT,
            "resample"
        );

        let mut vertical = WeightCache::<V, VN>::new();
        let mut horizontal = WeightCache::<H, HN>::new();

        let mut rows = RowSet::<&[u8], S, VN>::new();
        let mut column = PixelSet::<S, VN>::new();
        let mut window = PixelSet::<S, HN>::new();
        let mut converted = PixelSet::<S, 1>::new();
        let mut out = PixelSet::<D, 1>::new();

        for y in 0..dst_height {
            let (src_y, fraction_y) = map_coord(y, ratio_y);
            let src_y = src_y.min(src.last_row());

            trace!(y, src_y, fraction_y, "row");

            src.fill_row_set(&mut rows, src_y, V::WINDOW_BEFORE)?;
            let v_kernel = vertical.get(fraction_y);

            let mut columns = Columns {
                rows: &mut rows,
                column: &mut column,
                kernel: v_kernel,
                read: 0,
                width: src_width,
            };

            window.reset();
            *window.insert() = columns.collapse()?;

            for _ in 0..H::WINDOW_BEFORE {
                window.duplicate_last()?;
            }

            for _ in 0..H::WINDOW_AFTER {
                columns.advance(&mut window)?;
            }

            // Input column at index WINDOW_BEFORE of the window
            let mut base = 0;

            let mut dst_rows = RowSet::<&mut [u8], D, 1>::new();
            *dst_rows.insert() = dst.row_mut(y)?;

            for x in 0..dst_width {
                let (src_x, fraction_x) = map_coord(x, ratio_x);
                let src_x = src_x.min(src_width - 1);

                while base < src_x {
                    columns.advance(&mut window)?;
                    base += 1;
                }

                *converted.insert() = horizontal.get(fraction_x).apply(&window);

                convert_set(&converted, &mut out)?;
                dst_rows.write_pixel_set(&out)?;
            }
        }

        debug!(
            vertical_kernels = vertical.len(),
            horizontal_kernels = horizontal.len(),
            "resample done"
        );

        Ok(())
    }

    /// Run every `(src, dst)` job, in parallel if more than one cpu is available.
    ///
    /// Returns the first error any of the jobs ran into.
    #[cfg(feature = "multi-thread")]
    pub fn resample_batch<S, D, BS, BD>(
        &self,
        jobs: Vec<(&Image<S, BS>, &mut Image<D, BD>)>,
    ) -> Result<(), ResampleError>
    where
        S: Pixel,
        D: Pixel,
        BS: AsRef<[u8]> + Sync,
        BD: AsRef<[u8]> + AsMut<[u8]> + Send,
    {
        crate::multi_thread::resample_batch(self, jobs)
    }
}

/// Collapses the columns of a row set into single pixels, one column at a time
struct Columns<'r, 'b, S, K, const N: usize> {
    rows: &'r mut RowSet<&'b [u8], S, N>,
    column: &'r mut PixelSet<S, N>,
    kernel: &'r K,
    read: usize,
    width: usize,
}

impl<S: Pixel, K: Interpolation<N>, const N: usize> Columns<'_, '_, S, K, N> {
    fn collapse(&mut self) -> Result<S, ResampleError> {
        self.rows.read_pixel_set(self.column)?;
        self.read += 1;

        Ok(self.kernel.apply(self.column))
    }

    /// Push the next column into `window`, repeating the last one past the right edge
    fn advance<const W: usize>(
        &mut self,
        window: &mut PixelSet<S, W>,
    ) -> Result<(), ResampleError> {
        if self.read < self.width {
            *window.insert() = self.collapse()?;
        } else {
            window.duplicate_last()?;
        }

        Ok(())
    }
}
