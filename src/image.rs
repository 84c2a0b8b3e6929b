use crate::{Pixel, PixelFormat, Row, RowSet};
use std::marker::PhantomData;
use std::ops::Range;

/// Everything that can go wrong when constructing an [`Image`] or accessing its rows
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("a width of {width} pixels cannot be represented in {format:?}")]
    InvalidWidth { format: PixelFormat, width: usize },

    #[error("invalid stride, expected it to be at least {minimum}, but got {got}")]
    InvalidStride { minimum: usize, got: usize },

    #[error("buffer too small, expected it to be at least {minimum}, but got {got}")]
    BufferTooSmall { minimum: usize, got: usize },

    #[error("image is not bound to a buffer")]
    Unbound,

    #[error("row {row} is out of range for an image of height {height}")]
    RowOutOfRange { row: usize, height: usize },
}

/// Packed image of `P` pixels inside a flat buffer with an explicit stride
#[derive(Debug, Clone)]
pub struct Image<P, B> {
    buffer: Option<B>,
    size: usize,
    width: usize,
    height: usize,
    stride: usize,

    _m: PhantomData<fn() -> P>,
}

impl<P: Pixel> Image<P, Vec<u8>> {
    /// Allocate a zeroed, tightly packed image
    pub fn blank(width: usize, height: usize) -> Result<Self, ImageError> {
        let (stride, size) = Self::layout(usize::MAX, width, height, 0)?;

        Self::new(vec![0u8; size], width, height, stride)
    }
}

impl<P: Pixel, B: AsRef<[u8]>> Image<P, B> {
    /// Wrap `buffer`, using all of it as image memory.
    ///
    /// A `stride` of `0` selects the minimal line length for `width`.
    pub fn new(buffer: B, width: usize, height: usize, stride: usize) -> Result<Self, ImageError> {
        let size = buffer.as_ref().len();
        let (stride, _) = Self::layout(size, width, height, stride)?;

        Ok(Self {
            buffer: Some(buffer),
            size,
            width,
            height,
            stride,
            _m: PhantomData,
        })
    }

    /// Bind a reading cursor to row `index`
    pub fn row(&self, index: usize) -> Result<Row<&[u8], P>, ImageError> {
        let range = self.row_range(index)?;
        let buffer = self.buffer.as_ref().ok_or(ImageError::Unbound)?;

        Ok(Row::new(&buffer.as_ref()[range], self.stride, self.width))
    }

    /// Fill `rows` with `before` rows above `base`, `base` itself and the rows below it.
    ///
    /// Rows outside the image are replaced with the first or last row.
    pub fn fill_row_set<'a, const N: usize>(
        &'a self,
        rows: &mut RowSet<&'a [u8], P, N>,
        base: usize,
        before: usize,
    ) -> Result<(), ImageError> {
        assert!(
            before < N,
            "{before} rows before the base row don't fit into {N} rows"
        );

        let after = N - 1 - before;

        for offset in (1..=before).rev() {
            *rows.insert() = self.row(base.saturating_sub(offset))?;
        }

        *rows.insert() = self.row(base)?;

        for offset in 1..=after {
            *rows.insert() = self.row(base.saturating_add(offset).min(self.last_row()))?;
        }

        Ok(())
    }
}

impl<P: Pixel, B: AsRef<[u8]> + AsMut<[u8]>> Image<P, B> {
    /// Bind a writing cursor to row `index`
    pub fn row_mut(&mut self, index: usize) -> Result<Row<&mut [u8], P>, ImageError> {
        let range = self.row_range(index)?;
        let (stride, width) = (self.stride, self.width);
        let buffer = self.buffer.as_mut().ok_or(ImageError::Unbound)?;

        Ok(Row::new(&mut buffer.as_mut()[range], stride, width))
    }
}

impl<P: Pixel, B> Image<P, B> {
    /// Image without any memory, every row access fails with [`ImageError::Unbound`]
    pub fn unbound(width: usize, height: usize) -> Result<Self, ImageError> {
        let (stride, _) = Self::layout(usize::MAX, width, height, 0)?;

        Ok(Self {
            buffer: None,
            size: 0,
            width,
            height,
            stride,
            _m: PhantomData,
        })
    }

    /// Validate the dimensions, returns the effective stride and the required buffer size
    fn layout(
        size: usize,
        width: usize,
        height: usize,
        stride: usize,
    ) -> Result<(usize, usize), ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions);
        }

        let minimum = P::FORMAT
            .line_length(width)
            .ok_or(ImageError::InvalidWidth {
                format: P::FORMAT,
                width,
            })?;

        let stride = if stride == 0 { minimum } else { stride };

        if stride < minimum {
            return Err(ImageError::InvalidStride {
                minimum,
                got: stride,
            });
        }

        let required = stride
            .checked_mul(height)
            .ok_or(ImageError::BufferTooSmall {
                minimum: usize::MAX,
                got: size,
            })?;

        if required > size {
            return Err(ImageError::BufferTooSmall {
                minimum: required,
                got: size,
            });
        }

        Ok((stride, required))
    }

    fn row_range(&self, index: usize) -> Result<Range<usize>, ImageError> {
        if self.buffer.is_none() {
            return Err(ImageError::Unbound);
        }

        let out_of_range = ImageError::RowOutOfRange {
            row: index,
            height: self.height,
        };

        if index >= self.height {
            return Err(out_of_range);
        }

        let start = index * self.stride;
        let end = start.checked_add(self.stride).ok_or(out_of_range.clone())?;

        if end > self.size {
            return Err(out_of_range);
        }

        Ok(start..end)
    }

    pub fn format(&self) -> PixelFormat {
        P::FORMAT
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Size of the whole buffer
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bytes covered by the rows of the image
    pub fn actual_size(&self) -> usize {
        self.height * self.stride
    }

    pub fn last_row(&self) -> usize {
        self.height.saturating_sub(1)
    }

    pub fn buffer(&self) -> Option<&B> {
        self.buffer.as_ref()
    }

    pub fn into_buffer(self) -> Option<B> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PixelSet, Rgb565, Rgb888, Yuv422, Yuv444};

    #[test]
    fn minimal_stride_from_zero() {
        let image = Image::<Rgb888, _>::new(vec![0u8; 3 * 4 * 2], 4, 2, 0).unwrap();

        assert_eq!(image.stride(), 12);
        assert_eq!(image.actual_size(), 24);
        assert_eq!(image.last_row(), 1);
    }

    #[test]
    fn odd_width_422_is_invalid() {
        assert_eq!(
            Image::<Yuv422, _>::new(vec![0u8; 64], 3, 2, 0).unwrap_err(),
            ImageError::InvalidWidth {
                format: PixelFormat::YUV422,
                width: 3
            }
        );

        // An explicit stride doesn't help
        assert!(Image::<Yuv422, _>::new(vec![0u8; 64], 3, 2, 8).is_err());
    }

    #[test]
    fn construction_checks() {
        assert_eq!(
            Image::<Rgb565, _>::new(vec![0u8; 8], 0, 2, 0).unwrap_err(),
            ImageError::InvalidDimensions
        );
        assert_eq!(
            Image::<Rgb565, _>::new(vec![0u8; 8], 2, 2, 3).unwrap_err(),
            ImageError::InvalidStride { minimum: 4, got: 3 }
        );
        assert_eq!(
            Image::<Rgb565, _>::new(vec![0u8; 7], 2, 2, 0).unwrap_err(),
            ImageError::BufferTooSmall { minimum: 8, got: 7 }
        );
    }

    #[test]
    fn padded_rows() {
        #[rustfmt::skip]
        let buf = [
            1u8, 2, 3, 0xAA,
            4, 5, 6, 0xAA,
        ];
        let image = Image::<Rgb888, _>::new(&buf[..], 1, 2, 4).unwrap();

        let mut row = image.row(1).unwrap();
        assert_eq!(row.read_pixel().unwrap(), Rgb888::new(4, 5, 6));
        assert!(row.read_pixel().is_err());

        assert_eq!(
            image.row(2).unwrap_err(),
            ImageError::RowOutOfRange { row: 2, height: 2 }
        );
    }

    #[test]
    fn unbound_rows_fail() {
        let image = Image::<Yuv444, Vec<u8>>::unbound(4, 4).unwrap();

        assert_eq!(image.row(0).unwrap_err(), ImageError::Unbound);
        assert!(Image::<Yuv422, Vec<u8>>::unbound(3, 4).is_err());
    }

    #[test]
    fn write_rows() {
        let mut image = Image::<Rgb888, _>::blank(2, 2).unwrap();

        let mut row = image.row_mut(1).unwrap();
        row.write_pixel(&Rgb888::new(1, 2, 3)).unwrap();

        assert_eq!(
            image.into_buffer().unwrap(),
            [0, 0, 0, 0, 0, 0, 1, 2, 3, 0, 0, 0]
        );
    }

    fn first_column<const N: usize>(rows: &mut RowSet<&[u8], Rgb888, N>) -> Vec<u8> {
        let mut pixels = PixelSet::<Rgb888, N>::new();
        rows.read_pixel_set(&mut pixels).unwrap();

        let mut out = vec![0u8; 3];
        pixels
            .iter()
            .map(|px| {
                px.encode(&mut out, crate::PairPhase::Start).unwrap();
                out[0]
            })
            .collect()
    }

    #[test]
    fn row_set_clamps_at_edges() {
        // Single column image, red channel holds the row index
        let buf: Vec<u8> = (0..3u8).flat_map(|r| [r, 0, 0]).collect();
        let image = Image::<Rgb888, _>::new(&buf[..], 1, 3, 0).unwrap();

        let mut rows = RowSet::<&[u8], Rgb888, 4>::new();

        image.fill_row_set(&mut rows, 0, 1).unwrap();
        assert_eq!(first_column(&mut rows), [0, 0, 1, 2]);

        image.fill_row_set(&mut rows, 1, 1).unwrap();
        assert_eq!(first_column(&mut rows), [0, 1, 2, 2]);

        image.fill_row_set(&mut rows, 2, 1).unwrap();
        assert_eq!(first_column(&mut rows), [1, 2, 2, 2]);
    }
}
