/// Supported packed pixel formats
///
/// Pixel types are selected at compile time through the [`Pixel`](crate::Pixel) implementations,
/// this enum describes their on-wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// 16 bit little endian word, 5 bits red, 6 bits green, 5 bits blue (from high to low)
    RGB565,

    /// Single RGB interleaved plane, 8 bits per sample
    RGB888,

    /// Y U V and one opaque byte per pixel, 4:4:4 sub sampling
    YUV444,

    /// Y0 U Y1 V (YUYV) for every pixel pair, 4:2:2 sub sampling
    YUV422,
}

impl PixelFormat {
    /// Number of bytes in the smallest addressable group of pixels
    pub const fn bytes_per_group(self) -> usize {
        match self {
            PixelFormat::RGB565 => 2,
            PixelFormat::RGB888 => 3,
            PixelFormat::YUV444 => 4,
            PixelFormat::YUV422 => 4,
        }
    }

    /// Number of pixels sharing one group of bytes
    pub const fn pixels_per_group(self) -> usize {
        match self {
            PixelFormat::RGB565 | PixelFormat::RGB888 | PixelFormat::YUV444 => 1,
            PixelFormat::YUV422 => 2,
        }
    }

    pub const fn is_subsampled(self) -> bool {
        self.pixels_per_group() > 1
    }

    /// Minimal number of bytes a line of `width` pixels occupies.
    ///
    /// Returns `None` if `width` cannot be represented in this format (odd width for
    /// [`PixelFormat::YUV422`]) or the length overflows.
    pub fn line_length(self, width: usize) -> Option<usize> {
        if width % self.pixels_per_group() != 0 {
            return None;
        }

        (width / self.pixels_per_group()).checked_mul(self.bytes_per_group())
    }

    /// Size of a tightly packed image buffer
    pub fn buffer_size(self, width: usize, height: usize) -> Option<usize> {
        self.line_length(width)?.checked_mul(height)
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        use PixelFormat::*;

        [RGB565, RGB888, YUV444, YUV422]
    }
}
