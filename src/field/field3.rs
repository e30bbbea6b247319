//! Dense scalar field over an allocated index box.

use std::ops::{Index, IndexMut};

use crate::types::{Axis, IndexBox, IntVect3};

/// A scalar field backed by a contiguous buffer over an allocated box.
///
/// Storage is x-fastest, so every `(j, k)` pair owns one contiguous row
/// spanning the full allocated x-extent. The field is logically indexed by
/// absolute cell coordinates; the allocation must cover every cell a kernel
/// reads or writes, including halo cells.
///
/// Reads outside the allocation are a caller error. In debug builds they
/// panic with the offending cell; in release builds an x or y overrun may
/// alias a neighbouring row before the buffer bound is hit. Accesses are
/// never clamped.
///
/// # Example
///
/// ```
/// use alap_rs::field::Field3;
/// use alap_rs::types::{IndexBox, IntVect3};
///
/// let valid = IndexBox::from_size(IntVect3::ZERO, [4, 4, 4]);
/// let mut phi = Field3::new(valid.grow(1), 0.0);
/// phi[(0, 0, 0)] = 1.5;
/// assert_eq!(phi[(0, 0, 0)], 1.5);
/// assert_eq!(phi[(-1, 0, 0)], 0.0); // halo cell
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Field3<T> {
    domain: IndexBox,
    data: Vec<T>,
}

impl<T: Copy> Field3<T> {
    /// Allocate a field over `domain` filled with `value`.
    pub fn new(domain: IndexBox, value: T) -> Self {
        Self {
            domain,
            data: vec![value; domain.num_cells()],
        }
    }

    /// Allocate a field over `domain` initialised from a function of the cell.
    pub fn from_fn<F>(domain: IndexBox, f: F) -> Self
    where
        F: FnMut(IntVect3) -> T,
    {
        Self {
            domain,
            data: domain.cells().map(f).collect(),
        }
    }

    /// Allocated index range.
    #[inline]
    pub fn domain(&self) -> &IndexBox {
        &self.domain
    }

    /// Value at `(i, j, k)`.
    #[inline]
    pub fn get(&self, i: i32, j: i32, k: i32) -> T {
        self.data[self.domain.offset(IntVect3::new(i, j, k))]
    }

    /// Overwrite the value at `(i, j, k)`.
    #[inline]
    pub fn set(&mut self, i: i32, j: i32, k: i32, value: T) {
        let n = self.domain.offset(IntVect3::new(i, j, k));
        self.data[n] = value;
    }

    /// Fill the whole allocation.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Fill the cells of `bx`.
    ///
    /// # Panics
    ///
    /// Panics if `bx` is not inside the allocated domain.
    pub fn fill_box(&mut self, bx: &IndexBox, value: T) {
        assert!(
            self.domain.contains_box(bx),
            "fill box {} outside field domain {}",
            bx,
            self.domain
        );
        for k in bx.lo.z..=bx.hi.z {
            for j in bx.lo.y..=bx.hi.y {
                let start = self.domain.offset(IntVect3::new(bx.lo.x, j, k));
                self.data[start..start + bx.len(Axis::X)].fill(value);
            }
        }
    }

    /// Length of one allocated x-row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.domain.len(Axis::X)
    }

    /// The allocated x-row at `(j, k)`, starting at `domain().lo.x`.
    #[inline]
    pub fn row(&self, j: i32, k: i32) -> &[T] {
        let start = self.domain.offset(IntVect3::new(self.domain.lo.x, j, k));
        &self.data[start..start + self.row_len()]
    }

    /// Mutable x-row at `(j, k)`, starting at `domain().lo.x`.
    #[inline]
    pub fn row_mut(&mut self, j: i32, k: i32) -> &mut [T] {
        let start = self.domain.offset(IntVect3::new(self.domain.lo.x, j, k));
        let len = self.row_len();
        &mut self.data[start..start + len]
    }

    /// Mutable raw storage in x-fastest order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Copy> Index<IntVect3> for Field3<T> {
    type Output = T;
    #[inline]
    fn index(&self, p: IntVect3) -> &T {
        &self.data[self.domain.offset(p)]
    }
}

impl<T: Copy> IndexMut<IntVect3> for Field3<T> {
    #[inline]
    fn index_mut(&mut self, p: IntVect3) -> &mut T {
        let n = self.domain.offset(p);
        &mut self.data[n]
    }
}

impl<T: Copy> Index<(i32, i32, i32)> for Field3<T> {
    type Output = T;
    #[inline]
    fn index(&self, (i, j, k): (i32, i32, i32)) -> &T {
        &self[IntVect3::new(i, j, k)]
    }
}

impl<T: Copy> IndexMut<(i32, i32, i32)> for Field3<T> {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (i32, i32, i32)) -> &mut T {
        &mut self[IntVect3::new(i, j, k)]
    }
}
