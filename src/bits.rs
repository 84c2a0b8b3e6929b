//! Sub-word bit fields inside fixed-width unsigned integers.
//!
//! Used by the packed 16 bit RGB form, but works for any unsigned word.

use std::ops::{BitAnd, BitOr, Shl, Shr, Sub};

pub trait Word:
    Copy
    + Eq
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Sub<Output = Self>
    + 'static
{
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;
    const MAX: Self;
}

macro_rules! impl_word {
    ($($ty:ty),*) => {
        $(
        impl Word for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MAX: Self = <$ty>::MAX;
        }
        )*
    };
}

impl_word!(u8, u16, u32, u64);

#[inline(always)]
fn check<W: Word>(size: u32, ofs: u32) {
    assert!(
        size + ofs <= W::BITS,
        "bit field of {size} bits at offset {ofs} does not fit into {} bits",
        W::BITS
    );
}

/// Value with the `size` lowest bits set
#[inline(always)]
pub fn mask<W: Word>(size: u32) -> W {
    assert!(size <= W::BITS);

    if size == W::BITS {
        W::MAX
    } else {
        (W::ONE << size) - W::ONE
    }
}

/// Read a `size` bits wide field.
///
/// With `TOWARD_LOW` the field sits at bit `ofs` and is shifted down to bit 0, otherwise the low
/// `size` bits are taken and shifted up by `ofs`.
///
/// # Panics
///
/// If `size + ofs` exceeds the width of `W`
#[inline(always)]
pub fn get<W: Word, const TOWARD_LOW: bool>(value: W, size: u32, ofs: u32) -> W {
    check::<W>(size, ofs);

    if size == 0 {
        return W::ZERO;
    }

    if TOWARD_LOW {
        (value >> ofs) & mask(size)
    } else {
        (value & mask(size)) << ofs
    }
}

/// Inverse of [`get`]: place the `size` low bits of `value` at bit `ofs` (`TOWARD_LOW`), or move a
/// field at `ofs` down to bit 0 (`!TOWARD_LOW`).
///
/// # Panics
///
/// If `size + ofs` exceeds the width of `W`
#[inline(always)]
pub fn put<W: Word, const TOWARD_LOW: bool>(value: W, size: u32, ofs: u32) -> W {
    check::<W>(size, ofs);

    if size == 0 {
        return W::ZERO;
    }

    if TOWARD_LOW {
        (value & mask(size)) << ofs
    } else {
        (value >> ofs) & mask(size)
    }
}
