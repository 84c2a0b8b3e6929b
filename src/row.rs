use crate::formats::{ConvertError, PairPhase};
use crate::window::{RingSet, WindowError};
use crate::{Pixel, PixelSet};
use std::marker::PhantomData;
use std::ops::Range;

/// Everything that can go wrong when accessing pixels of a [`Row`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("row is not bound to a buffer")]
    Unbound,

    #[error(
        "row exhausted, access of {bytes} bytes / {pixels} pixels but only {remaining_bytes} bytes / {remaining_pixels} pixels remain"
    )]
    Exhausted {
        bytes: usize,
        pixels: usize,
        remaining_bytes: usize,
        remaining_pixels: usize,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

/// Sequential cursor over the pixels of a single scanline.
///
/// `B` is `&[u8]` for reading or `&mut [u8]` for writing. Sub sampled formats track the position
/// inside the current pixel pair separately for reads and writes.
#[derive(Debug)]
pub struct Row<B, P> {
    buf: Option<B>,
    pos: usize,
    remaining_bytes: usize,
    remaining_pixels: usize,

    read_phase: PairPhase,
    write_phase: PairPhase,

    _m: PhantomData<fn() -> P>,
}

impl<B, P> Default for Row<B, P> {
    fn default() -> Self {
        Self::unbound()
    }
}

impl<B: Clone, P> Clone for Row<B, P> {
    fn clone(&self) -> Self {
        Self {
            buf: self.buf.clone(),
            pos: self.pos,
            remaining_bytes: self.remaining_bytes,
            remaining_pixels: self.remaining_pixels,
            read_phase: self.read_phase,
            write_phase: self.write_phase,
            _m: PhantomData,
        }
    }
}

impl<B, P> Row<B, P> {
    /// Row without a buffer, every access fails
    pub fn unbound() -> Self {
        Self {
            buf: None,
            pos: 0,
            remaining_bytes: 0,
            remaining_pixels: 0,
            read_phase: PairPhase::Start,
            write_phase: PairPhase::Start,
            _m: PhantomData,
        }
    }

    pub fn remaining_pixels(&self) -> usize {
        self.remaining_pixels
    }

    pub fn remaining_bytes(&self) -> usize {
        self.remaining_bytes
    }

    fn check(&self, bytes: usize, pixels: usize) -> Result<Range<usize>, RowError> {
        if self.buf.is_none() {
            return Err(RowError::Unbound);
        }

        if self.remaining_bytes < bytes || self.remaining_pixels < pixels {
            return Err(RowError::Exhausted {
                bytes,
                pixels,
                remaining_bytes: self.remaining_bytes,
                remaining_pixels: self.remaining_pixels,
            });
        }

        Ok(self.pos..self.pos + bytes)
    }

    /// Byte range of the next `bytes`, consuming them and `pixels` on success
    pub(crate) fn advance(
        &mut self,
        bytes: usize,
        pixels: usize,
    ) -> Result<Range<usize>, RowError> {
        let range = self.check(bytes, pixels)?;

        self.pos += bytes;
        self.remaining_bytes -= bytes;
        self.remaining_pixels -= pixels;

        Ok(range)
    }

    /// Byte range of the next `bytes` without consuming anything
    pub(crate) fn peek(&self, bytes: usize, pixels: usize) -> Result<Range<usize>, RowError> {
        self.check(bytes, pixels)
    }
}

impl<B: AsRef<[u8]>, P: Pixel> Row<B, P> {
    /// Bind a row to `buf`, accessing at most `line_length` bytes and `width` pixels
    pub fn new(buf: B, line_length: usize, width: usize) -> Self {
        let remaining_bytes = line_length.min(buf.as_ref().len());

        Self {
            buf: Some(buf),
            pos: 0,
            remaining_bytes,
            remaining_pixels: width,
            read_phase: PairPhase::Start,
            write_phase: PairPhase::Start,
            _m: PhantomData,
        }
    }

    /// Minimal number of bytes of a row `width` pixels wide, `None` if `width` is invalid
    pub fn line_length(width: usize) -> Option<usize> {
        P::FORMAT.line_length(width)
    }

    /// Range and phase of the next access, advancing past the group when it is complete
    fn next_group(&mut self, phase: PairPhase) -> Result<Range<usize>, RowError> {
        let bytes = P::FORMAT.bytes_per_group();
        let pixels = P::FORMAT.pixels_per_group();

        if !P::FORMAT.is_subsampled() || phase == PairPhase::End {
            self.advance(bytes, pixels)
        } else {
            self.peek(bytes, pixels)
        }
    }

    pub fn read_pixel(&mut self) -> Result<P, RowError> {
        let phase = self.read_phase;
        let range = self.next_group(phase)?;

        if P::FORMAT.is_subsampled() {
            self.read_phase = phase.next();
        }

        let buf: &[u8] = self.buf.as_ref().ok_or(RowError::Unbound)?.as_ref();

        Ok(P::decode(&buf[range], phase)?)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, P: Pixel> Row<B, P> {
    pub fn write_pixel(&mut self, pixel: &P) -> Result<(), RowError> {
        let phase = self.write_phase;
        let range = self.next_group(phase)?;

        if P::FORMAT.is_subsampled() {
            self.write_phase = phase.next();
        }

        let buf: &mut [u8] = self.buf.as_mut().ok_or(RowError::Unbound)?.as_mut();

        Ok(pixel.encode(&mut buf[range], phase)?)
    }
}

/// Window over `N` rows, see [`RingSet`]
pub struct RowSet<B, P, const N: usize> {
    rows: RingSet<Row<B, P>, N>,
}

impl<B, P, const N: usize> Default for RowSet<B, P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B, P, const N: usize> RowSet<B, P, N> {
    pub fn new() -> Self {
        Self {
            rows: RingSet::new(),
        }
    }

    pub fn reset(&mut self) {
        self.rows.reset()
    }

    pub const fn len(&self) -> usize {
        N
    }

    /// Evict the oldest row and hand out its slot to be bound to a new scanline
    pub fn insert(&mut self) -> &mut Row<B, P> {
        self.rows.insert()
    }

    pub fn get(&self, index: usize) -> &Row<B, P> {
        &self.rows[index]
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Row<B, P> {
        &mut self.rows[index]
    }
}

impl<B: Clone, P, const N: usize> RowSet<B, P, N> {
    pub fn duplicate_last(&mut self) -> Result<(), WindowError> {
        self.rows.duplicate_last()
    }
}

impl<B: AsRef<[u8]>, P: Pixel, const N: usize> RowSet<B, P, N> {
    /// Read the next pixel of every row, oldest row first
    pub fn read_pixel_set(&mut self, pixels: &mut PixelSet<P, N>) -> Result<(), RowError> {
        for index in 0..N {
            pixels[index] = self.rows[index].read_pixel()?;
        }

        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>, P: Pixel, const N: usize> RowSet<B, P, N> {
    /// Write one pixel into every row, oldest row first
    pub fn write_pixel_set(&mut self, pixels: &PixelSet<P, N>) -> Result<(), RowError> {
        for index in 0..N {
            self.rows[index].write_pixel(&pixels[index])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb565, Rgb888, Yuv422, Yuv444};

    #[test]
    fn reads_consume_groups() {
        let buf = [1u8, 2, 3, 4, 5, 6, 7];
        let mut row = Row::<_, Rgb888>::new(&buf[..], buf.len(), 2);

        assert_eq!(row.read_pixel().unwrap(), Rgb888::new(1, 2, 3));
        assert_eq!(row.remaining_bytes(), 4);
        assert_eq!(row.read_pixel().unwrap(), Rgb888::new(4, 5, 6));
        assert_eq!(row.remaining_pixels(), 0);

        // Padding byte left, but the pixel budget is spent
        assert!(matches!(
            row.read_pixel(),
            Err(RowError::Exhausted {
                remaining_bytes: 1,
                ..
            })
        ));
    }

    #[test]
    fn failed_access_leaves_state() {
        let buf = [0u8; 3];
        let mut row = Row::<_, Rgb565>::new(&buf[..], buf.len(), 4);

        row.read_pixel().unwrap();
        assert!(row.read_pixel().is_err());
        assert_eq!(row.remaining_bytes(), 1);
        assert_eq!(row.remaining_pixels(), 3);
    }

    #[test]
    fn unbound_row_fails() {
        let mut row = Row::<&[u8], Yuv444>::unbound();

        assert_eq!(row.read_pixel(), Err(RowError::Unbound));
        assert_eq!(row.advance(0, 0), Err(RowError::Unbound));
    }

    #[test]
    fn two_pixel_wide_422() {
        let buf = [50u8, 100, 150, 200];
        let mut row = Row::<_, Yuv422>::new(&buf[..], buf.len(), 2);

        let first = row.read_pixel().unwrap();
        // The first pixel of a pair doesn't move the cursor
        assert_eq!(row.remaining_bytes(), 4);
        assert_eq!(row.remaining_pixels(), 2);

        let second = row.read_pixel().unwrap();
        assert_eq!(row.remaining_bytes(), 0);
        assert_eq!(row.remaining_pixels(), 0);

        assert_eq!(first.chroma(), second.chroma());
        assert_eq!(first.chroma(), (100.0, 200.0));
        assert_eq!(first.luma(), 50.0);
        assert_eq!(second.luma(), 150.0);

        assert!(row.read_pixel().is_err());
    }

    #[test]
    fn write_422_pairs() {
        let mut buf = [0u8; 8];
        let mut row = Row::<_, Yuv422>::new(&mut buf[..], 8, 4);

        row.write_pixel(&Yuv422::new(1, 10, 20)).unwrap();
        row.write_pixel(&Yuv422::new(2, 10, 20)).unwrap();
        row.write_pixel(&Yuv422::new(3, 30, 40)).unwrap();
        row.write_pixel(&Yuv422::new(4, 30, 40)).unwrap();
        assert!(row.write_pixel(&Yuv422::new(5, 0, 0)).is_err());

        assert_eq!(buf, [1, 10, 2, 20, 3, 30, 4, 40]);
    }

    #[test]
    fn line_length_of_odd_422_row() {
        assert_eq!(Row::<&[u8], Yuv422>::line_length(3), None);
        assert_eq!(Row::<&[u8], Yuv422>::line_length(4), Some(8));
        assert_eq!(Row::<&[u8], Yuv444>::line_length(3), Some(12));
    }

    #[test]
    fn read_set_across_rows() {
        let a = [1u8, 2, 3, 4, 5, 6];
        let b = [7u8, 8, 9, 10, 11, 12];

        let mut rows = RowSet::<&[u8], Rgb888, 3>::new();
        *rows.insert() = Row::new(&a[..], 6, 2);
        *rows.insert() = Row::new(&b[..], 6, 2);
        rows.duplicate_last().unwrap();

        let mut pixels = PixelSet::<Rgb888, 3>::new();
        rows.read_pixel_set(&mut pixels).unwrap();
        assert_eq!(pixels[0], Rgb888::new(1, 2, 3));
        assert_eq!(pixels[1], Rgb888::new(7, 8, 9));
        assert_eq!(pixels[2], Rgb888::new(7, 8, 9));

        rows.read_pixel_set(&mut pixels).unwrap();
        assert_eq!(pixels[0], Rgb888::new(4, 5, 6));
        assert_eq!(pixels[2], Rgb888::new(10, 11, 12));

        assert!(rows.read_pixel_set(&mut pixels).is_err());
    }

    #[test]
    fn rows_by_index() {
        let a = [1u8, 2, 3, 4, 5, 6];
        let b = [7u8, 8, 9, 10, 11, 12];

        let mut rows = RowSet::<&[u8], Rgb888, 2>::new();
        *rows.insert() = Row::new(&a[..], 6, 2);
        *rows.insert() = Row::new(&b[..], 6, 2);

        assert_eq!(rows.get_mut(1).read_pixel().unwrap(), Rgb888::new(7, 8, 9));
        assert_eq!(rows.get(0).remaining_pixels(), 2);
        assert_eq!(rows.get(1).remaining_pixels(), 1);

        // The newer row runs out first
        let mut pixels = PixelSet::<Rgb888, 2>::new();
        rows.read_pixel_set(&mut pixels).unwrap();
        assert!(rows.read_pixel_set(&mut pixels).is_err());
        assert_eq!(rows.get(0).remaining_pixels(), 0);
    }

    #[test]
    fn write_set() {
        let mut buf = [0u8; 3];

        let mut rows = RowSet::<&mut [u8], Rgb888, 1>::new();
        *rows.insert() = Row::new(&mut buf[..], 3, 1);

        let mut pixels = PixelSet::<Rgb888, 1>::new();
        *pixels.insert() = Rgb888::new(9, 8, 7);
        rows.write_pixel_set(&pixels).unwrap();
        assert!(rows.write_pixel_set(&pixels).is_err());

        drop(rows);
        assert_eq!(buf, [9, 8, 7]);
    }
}
