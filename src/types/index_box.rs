//! Rectangular index ranges.

use std::fmt;

use super::{Axis, IntVect3};

/// Axis-aligned inclusive range of cell indices `[lo, hi]`.
///
/// Used both for the region a kernel computes and for the region a field
/// is allocated over.
///
/// # Example
///
/// ```
/// use alap_rs::types::{Axis, IndexBox, IntVect3};
///
/// let bx = IndexBox::from_size(IntVect3::ZERO, [4, 3, 2]);
/// assert_eq!(bx.hi, IntVect3::new(3, 2, 1));
/// assert_eq!(bx.num_cells(), 24);
///
/// // One-cell halo for a second-order stencil
/// let grown = bx.grow(1);
/// assert_eq!(grown.lo, IntVect3::splat(-1));
/// assert!(grown.contains_box(&bx));
///
/// // Face box along x: one more index than cells
/// assert_eq!(bx.surrounding_nodes(Axis::X).len(Axis::X), 5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IndexBox {
    /// Lowest corner (inclusive)
    pub lo: IntVect3,
    /// Highest corner (inclusive)
    pub hi: IntVect3,
}

impl IndexBox {
    /// Create a box from its corners.
    ///
    /// # Panics
    ///
    /// Panics if `hi < lo` along any axis.
    pub fn new(lo: IntVect3, hi: IntVect3) -> Self {
        assert!(
            lo.all_le(hi),
            "box hi {} must not be below lo {} along any axis",
            hi,
            lo
        );
        Self { lo, hi }
    }

    /// Box with the given lower corner and cell counts per axis.
    ///
    /// # Panics
    ///
    /// Panics if any count is zero.
    pub fn from_size(lo: IntVect3, size: [usize; 3]) -> Self {
        assert!(
            size.iter().all(|&n| n > 0),
            "box size {:?} must be positive along every axis",
            size
        );
        let hi = IntVect3::new(
            lo.x + size[0] as i32 - 1,
            lo.y + size[1] as i32 - 1,
            lo.z + size[2] as i32 - 1,
        );
        Self::new(lo, hi)
    }

    /// Single-cell box.
    #[inline]
    pub fn cell(p: IntVect3) -> Self {
        Self { lo: p, hi: p }
    }

    /// Number of cells along an axis.
    #[inline]
    pub fn len(&self, axis: Axis) -> usize {
        (self.hi.get(axis) - self.lo.get(axis) + 1) as usize
    }

    /// Cell counts `[nx, ny, nz]`.
    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        [self.len(Axis::X), self.len(Axis::Y), self.len(Axis::Z)]
    }

    /// Total number of cells.
    #[inline]
    pub fn num_cells(&self) -> usize {
        let [nx, ny, nz] = self.shape();
        nx * ny * nz
    }

    /// Check if a cell lies inside the box (inclusive).
    #[inline]
    pub fn contains(&self, p: IntVect3) -> bool {
        self.lo.all_le(p) && p.all_le(self.hi)
    }

    /// Check if another box lies entirely inside this one.
    #[inline]
    pub fn contains_box(&self, other: &IndexBox) -> bool {
        self.contains(other.lo) && self.contains(other.hi)
    }

    /// Grow (or shrink, for negative `n`) by `n` cells on every side.
    pub fn grow(&self, n: i32) -> Self {
        Self::new(self.lo - IntVect3::splat(n), self.hi + IntVect3::splat(n))
    }

    /// Grow by `n` cells on both sides of one axis.
    pub fn grow_dir(&self, axis: Axis, n: i32) -> Self {
        Self::new(self.lo.shift(axis, -n), self.hi.shift(axis, n))
    }

    /// Translate by `n` cells along an axis.
    pub fn shift(&self, axis: Axis, n: i32) -> Self {
        Self {
            lo: self.lo.shift(axis, n),
            hi: self.hi.shift(axis, n),
        }
    }

    /// One-cell-thick slab at `index` along `axis`, keeping the transverse
    /// extents of this box.
    ///
    /// `index` need not lie inside the box.
    pub fn plane(&self, axis: Axis, index: i32) -> Self {
        Self {
            lo: self.lo.with(axis, index),
            hi: self.hi.with(axis, index),
        }
    }

    /// Face-centred box along `axis`: the cell box extended by one index on
    /// the high side, covering both bounding faces of every cell.
    pub fn surrounding_nodes(&self, axis: Axis) -> Self {
        Self {
            lo: self.lo,
            hi: self.hi.shift(axis, 1),
        }
    }

    /// Linear offset of a cell in x-fastest storage over this box.
    ///
    /// The cell must lie inside the box.
    #[inline]
    pub fn offset(&self, p: IntVect3) -> usize {
        debug_assert!(self.contains(p), "cell {} outside {}", p, self);
        let nx = self.len(Axis::X);
        let ny = self.len(Axis::Y);
        let dx = (p.x - self.lo.x) as usize;
        let dy = (p.y - self.lo.y) as usize;
        let dz = (p.z - self.lo.z) as usize;
        dx + nx * (dy + ny * dz)
    }

    /// Iterate over all cells, x fastest then y then z.
    pub fn cells(&self) -> Cells {
        Cells {
            bx: *self,
            next: Some(self.lo),
        }
    }
}

impl fmt::Display for IndexBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.lo, self.hi)
    }
}

/// Iterator over the cells of an [`IndexBox`].
#[derive(Clone, Debug)]
pub struct Cells {
    bx: IndexBox,
    next: Option<IntVect3>,
}

impl Iterator for Cells {
    type Item = IntVect3;

    fn next(&mut self) -> Option<IntVect3> {
        let current = self.next?;
        let IndexBox { lo, hi } = self.bx;
        self.next = if current.x < hi.x {
            Some(IntVect3::new(current.x + 1, current.y, current.z))
        } else if current.y < hi.y {
            Some(IntVect3::new(lo.x, current.y + 1, current.z))
        } else if current.z < hi.z {
            Some(IntVect3::new(lo.x, lo.y, current.z + 1))
        } else {
            None
        };
        Some(current)
    }
}
