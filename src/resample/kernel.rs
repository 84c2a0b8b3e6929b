use crate::{Pixel, PixelSet};

/// Interpolation kernel over a window of `N` samples.
///
/// The sample the coordinate maps to sits at index [`WINDOW_BEFORE`](Self::WINDOW_BEFORE) of the
/// window, followed by [`WINDOW_AFTER`](Self::WINDOW_AFTER) samples.
pub trait Interpolation<const N: usize>: Sized {
    const WINDOW_BEFORE: usize;
    const WINDOW_AFTER: usize = N - 1 - Self::WINDOW_BEFORE;

    /// Build the weights for the fractional offset `t`, which must be in `0.0..=1.0`
    fn new(t: f32) -> Self;

    fn weights(&self) -> &[f32; N];

    /// Weighted sum of `pixels`, oldest sample first
    #[inline]
    fn apply<P: Pixel>(&self, pixels: &PixelSet<P, N>) -> P {
        let mut sum = P::default();

        for (pixel, weight) in pixels.iter().zip(self.weights()) {
            sum += *pixel * *weight;
        }

        sum
    }
}

fn check_fraction(t: f32) {
    assert!(
        (0.0..=1.0).contains(&t),
        "interpolation fraction {t} outside of 0..=1"
    );
}

#[rustfmt::skip]
const CATMULL_ROM: [[f32; 4]; 4] = [
    [ 0.0,  2.0,  0.0,  0.0],
    [-1.0,  0.0,  1.0,  0.0],
    [ 2.0, -5.0,  4.0, -1.0],
    [-1.0,  3.0, -3.0,  1.0],
];

/// Catmull-Rom cubic over one sample before and two samples after the mapped position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bicubic {
    weights: [f32; 4],
}

impl Interpolation<4> for Bicubic {
    const WINDOW_BEFORE: usize = 1;

    fn new(t: f32) -> Self {
        check_fraction(t);

        let powers = [1.0, t, t * t, t * t * t];

        let weights = std::array::from_fn(|col| {
            0.5 * powers
                .iter()
                .zip(&CATMULL_ROM)
                .map(|(p, row)| p * row[col])
                .sum::<f32>()
        });

        Self { weights }
    }

    fn weights(&self) -> &[f32; 4] {
        &self.weights
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    weights: [f32; 2],
}

impl Interpolation<2> for Linear {
    const WINDOW_BEFORE: usize = 0;

    fn new(t: f32) -> Self {
        check_fraction(t);

        Self {
            weights: [1.0 - t, t],
        }
    }

    fn weights(&self) -> &[f32; 2] {
        &self.weights
    }
}

/// Picks the mapped sample, ignoring the fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest;

impl Interpolation<1> for Nearest {
    const WINDOW_BEFORE: usize = 0;

    fn new(t: f32) -> Self {
        check_fraction(t);

        Self
    }

    fn weights(&self) -> &[f32; 1] {
        &[1.0]
    }
}
