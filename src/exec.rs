//! Execution backends for per-cell kernels.
//!
//! Every kernel is written once as a body that fills one x-row of its output
//! field. A [`ParallelFor`] decides how the rows of a box are visited:
//!
//! - [`Serial`]: nested `k`, `j` loops on the calling thread
//! - [`Rayon`] (feature `parallel`): rows distributed over the rayon pool
//!
//! Rows of one output field are disjoint, so any visiting order produces
//! bitwise-identical results.

use std::ops::{Index, IndexMut, RangeInclusive};

use crate::field::Field3;
use crate::types::{IndexBox, IntVect3};

/// Runtime selection of an execution backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Execution {
    /// Run on the calling thread.
    #[default]
    Serial,
    /// Distribute rows over the rayon thread pool. Falls back to serial
    /// execution when the `parallel` feature is disabled.
    Parallel,
}

/// Mutable view of one x-row of an output field.
///
/// Indexed by absolute `i`; only `xs()` is meant to be written.
pub struct Row<'a> {
    j: i32,
    k: i32,
    x0: i32,
    xs: RangeInclusive<i32>,
    data: &'a mut [f64],
}

impl<'a> Row<'a> {
    fn new(bx: &IndexBox, domain: &IndexBox, j: i32, k: i32, data: &'a mut [f64]) -> Self {
        Self {
            j,
            k,
            x0: domain.lo.x,
            xs: bx.lo.x..=bx.hi.x,
            data,
        }
    }

    /// y index of the row.
    #[inline]
    pub fn j(&self) -> i32 {
        self.j
    }

    /// z index of the row.
    #[inline]
    pub fn k(&self) -> i32 {
        self.k
    }

    /// The x-range of the box being computed.
    #[inline]
    pub fn xs(&self) -> RangeInclusive<i32> {
        self.xs.clone()
    }

    /// Cell index of position `i` in this row.
    #[inline]
    pub fn cell(&self, i: i32) -> IntVect3 {
        IntVect3::new(i, self.j, self.k)
    }

    /// The box part of the row as a slice, `[lo.x, hi.x]`.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        let start = (*self.xs.start() - self.x0) as usize;
        let end = (*self.xs.end() - self.x0) as usize;
        &mut self.data[start..=end]
    }
}

impl Index<i32> for Row<'_> {
    type Output = f64;
    #[inline]
    fn index(&self, i: i32) -> &f64 {
        &self.data[(i - self.x0) as usize]
    }
}

impl IndexMut<i32> for Row<'_> {
    #[inline]
    fn index_mut(&mut self, i: i32) -> &mut f64 {
        &mut self.data[(i - self.x0) as usize]
    }
}

/// A "parallel-for over a 3D index range" abstraction.
pub trait ParallelFor {
    /// Call `body` once for every x-row `(j, k)` of `bx`, handing it a
    /// mutable view of that row of `out`.
    ///
    /// `bx` must lie inside `out.domain()`.
    fn for_each_row<F>(&self, bx: &IndexBox, out: &mut Field3<f64>, body: F)
    where
        F: Fn(&mut Row<'_>) + Send + Sync;
}

/// Single-threaded backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Serial;

impl ParallelFor for Serial {
    fn for_each_row<F>(&self, bx: &IndexBox, out: &mut Field3<f64>, body: F)
    where
        F: Fn(&mut Row<'_>) + Send + Sync,
    {
        debug_assert!(
            out.domain().contains_box(bx),
            "output domain {} does not cover {}",
            out.domain(),
            bx
        );
        let domain = *out.domain();
        for k in bx.lo.z..=bx.hi.z {
            for j in bx.lo.y..=bx.hi.y {
                let mut row = Row::new(bx, &domain, j, k, out.row_mut(j, k));
                body(&mut row);
            }
        }
    }
}

/// Rayon backend: one task per allocated row, rows outside `bx` skipped.
#[cfg(feature = "parallel")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Rayon;

#[cfg(feature = "parallel")]
impl ParallelFor for Rayon {
    fn for_each_row<F>(&self, bx: &IndexBox, out: &mut Field3<f64>, body: F)
    where
        F: Fn(&mut Row<'_>) + Send + Sync,
    {
        use crate::types::Axis;
        use rayon::prelude::*;

        debug_assert!(
            out.domain().contains_box(bx),
            "output domain {} does not cover {}",
            out.domain(),
            bx
        );
        let domain = *out.domain();
        let nx = domain.len(Axis::X);
        let ny = domain.len(Axis::Y);

        out.as_mut_slice()
            .par_chunks_mut(nx)
            .enumerate()
            .for_each(|(r, data)| {
                let j = domain.lo.y + (r % ny) as i32;
                let k = domain.lo.z + (r / ny) as i32;
                if j < bx.lo.y || j > bx.hi.y || k < bx.lo.z || k > bx.hi.z {
                    return;
                }
                let mut row = Row::new(bx, &domain, j, k, data);
                body(&mut row);
            });
    }
}
