use std::fmt;
use std::ops::{Index, IndexMut};

/// Fixed size window of pixels, see [`RingSet`]
pub type PixelSet<P, const N: usize> = RingSet<P, N>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("cannot duplicate the last element of a window nothing was inserted into")]
    Empty,
}

/// Ring buffer holding the last `N` inserted elements.
///
/// Index `0` addresses the oldest retained element, `N - 1` the newest one. The set always
/// contains exactly `N` elements, initially `T::default()`.
#[derive(Clone)]
pub struct RingSet<T, const N: usize> {
    slots: [T; N],
    first: usize,
    inserted: usize,
}

impl<T: Default, const N: usize> RingSet<T, N> {
    pub fn new() -> Self {
        const { assert!(N > 0, "a window must hold at least one element") };

        Self {
            slots: std::array::from_fn(|_| T::default()),
            first: 0,
            inserted: 0,
        }
    }

    /// Restore the state of a freshly created set
    pub fn reset(&mut self) {
        self.first = 0;
        self.inserted = 0;
        self.slots.iter_mut().for_each(|slot| *slot = T::default());
    }
}

impl<T: Default, const N: usize> Default for RingSet<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> RingSet<T, N> {
    pub const fn len(&self) -> usize {
        N
    }

    /// Evict the oldest element and hand out its slot, which is now the newest one
    pub fn insert(&mut self) -> &mut T {
        let current = self.first;
        self.first = self.slot(1);
        self.inserted = self.inserted.saturating_add(1);

        &mut self.slots[current]
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..N).map(|i| &self[i])
    }

    #[inline(always)]
    fn slot(&self, index: usize) -> usize {
        (self.first + index) % N
    }
}

impl<T: Clone, const N: usize> RingSet<T, N> {
    /// Insert a copy of the newest element
    pub fn duplicate_last(&mut self) -> Result<(), WindowError> {
        if self.inserted == 0 {
            return Err(WindowError::Empty);
        }

        let last = self[N - 1].clone();
        *self.insert() = last;

        Ok(())
    }
}

impl<T, const N: usize> Index<usize> for RingSet<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        assert!(index < N, "window index {index} out of range for size {N}");

        &self.slots[self.slot(index)]
    }
}

impl<T, const N: usize> IndexMut<usize> for RingSet<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        assert!(index < N, "window index {index} out of range for size {N}");

        let slot = self.slot(index);
        &mut self.slots[slot]
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for RingSet<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Display for RingSet<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{N}:")?;

        for element in self.iter() {
            write!(f, " {element:?}")?;
        }

        write!(f, "]")
    }
}
