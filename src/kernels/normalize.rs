//! Diagonal scaling `x /= alpha*a + 2*(dhx+dhy+dhz)`.
//!
//! The divisor is the unmodified stencil diagonal. Unlike the relaxation
//! sweep, no per-face boundary elimination is folded in, so on cells next
//! to a physical boundary the scaling ignores the boundary stiffening. This
//! is the cheap interior-only Jacobi scaling and is kept that way on
//! purpose.

use crate::exec::{ParallelFor, Serial};
use crate::field::Field3;
use crate::stencil::StencilCoeffs;
use crate::types::IndexBox;

/// Divide `x` by the operator's unmodified diagonal over `bx`, in place.
pub fn normalize(
    bx: &IndexBox,
    x: &mut Field3<f64>,
    a: &Field3<f64>,
    dxinv: [f64; 3],
    alpha: f64,
    beta: f64,
) {
    normalize_with(&Serial, bx, x, a, dxinv, alpha, beta);
}

/// [`normalize`] on an explicit execution backend.
pub fn normalize_with<E: ParallelFor>(
    exec: &E,
    bx: &IndexBox,
    x: &mut Field3<f64>,
    a: &Field3<f64>,
    dxinv: [f64; 3],
    alpha: f64,
    beta: f64,
) {
    debug_assert!(a.domain().contains_box(bx), "a does not cover {}", bx);

    let c = StencilCoeffs::from_spacing(alpha, beta, dxinv);
    exec.for_each_row(bx, x, |row| {
        let (j, k) = (row.j(), row.k());
        for i in row.xs() {
            row[i] /= c.diagonal(a[(i, j, k)]);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntVect3;
    use approx::assert_relative_eq;

    #[test]
    fn test_divides_by_diagonal() {
        let bx = IndexBox::from_size(IntVect3::ZERO, [3, 3, 3]);
        let a = Field3::from_fn(bx, |p| 1.0 + p.x as f64);
        let mut x = Field3::new(bx, 10.0);

        normalize(&bx, &mut x, &a, [1.0, 2.0, 1.0], 0.5, 1.0);

        // dhfac = 2 * (1 + 4 + 1) = 12
        for p in bx.cells() {
            let gamma = 0.5 * (1.0 + p.x as f64) + 12.0;
            assert_relative_eq!(x[p], 10.0 / gamma, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_leaves_cells_outside_box() {
        let domain = IndexBox::from_size(IntVect3::ZERO, [4, 4, 4]);
        let bx = IndexBox::from_size(IntVect3::ZERO, [2, 4, 4]);
        let a = Field3::new(domain, 1.0);
        let mut x = Field3::new(domain, 3.0);

        normalize(&bx, &mut x, &a, [1.0; 3], 1.0, 0.0);

        assert_eq!(x[(1, 0, 0)], 3.0 / 1.0);
        assert_eq!(x[(2, 0, 0)], 3.0);
        assert_eq!(x[(3, 3, 3)], 3.0);
    }
}
