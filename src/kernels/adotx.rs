//! Operator application `y = alpha*a*x - beta*Laplacian(x)`.

use crate::exec::{ParallelFor, Serial};
use crate::field::Field3;
use crate::stencil::StencilCoeffs;
use crate::types::IndexBox;

/// Stencil value of the operator at `(i, j, k)`.
///
/// Reads `x` at the cell and its six face neighbours.
#[inline(always)]
pub(crate) fn apply_cell(
    c: &StencilCoeffs,
    x: &Field3<f64>,
    a: &Field3<f64>,
    i: i32,
    j: i32,
    k: i32,
) -> f64 {
    let xc = x[(i, j, k)];
    c.alpha * a[(i, j, k)] * xc
        - c.dhx * (x[(i - 1, j, k)] - 2.0 * xc + x[(i + 1, j, k)])
        - c.dhy * (x[(i, j - 1, k)] - 2.0 * xc + x[(i, j + 1, k)])
        - c.dhz * (x[(i, j, k - 1)] - 2.0 * xc + x[(i, j, k + 1)])
}

/// Apply the operator over `bx`, writing `y`.
///
/// # Arguments
/// * `bx` - Cells to compute
/// * `y` - Output field, allocated over at least `bx`
/// * `x` - Input field, valid on `bx` plus a one-cell halo
/// * `a` - Mass coefficient, valid on `bx`
/// * `dxinv` - Inverse cell widths per axis
/// * `alpha`, `beta` - Mass and diffusion multipliers
pub fn adotx(
    bx: &IndexBox,
    y: &mut Field3<f64>,
    x: &Field3<f64>,
    a: &Field3<f64>,
    dxinv: [f64; 3],
    alpha: f64,
    beta: f64,
) {
    adotx_with(&Serial, bx, y, x, a, dxinv, alpha, beta);
}

/// [`adotx`] on an explicit execution backend.
#[allow(clippy::too_many_arguments)]
pub fn adotx_with<E: ParallelFor>(
    exec: &E,
    bx: &IndexBox,
    y: &mut Field3<f64>,
    x: &Field3<f64>,
    a: &Field3<f64>,
    dxinv: [f64; 3],
    alpha: f64,
    beta: f64,
) {
    debug_assert!(x.domain().contains_box(&bx.grow(1)), "x lacks a halo around {}", bx);
    debug_assert!(a.domain().contains_box(bx), "a does not cover {}", bx);

    let c = StencilCoeffs::from_spacing(alpha, beta, dxinv);
    exec.for_each_row(bx, y, |row| {
        let (j, k) = (row.j(), row.k());
        for i in row.xs() {
            row[i] = apply_cell(&c, x, a, i, j, k);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntVect3;
    use approx::assert_relative_eq;

    fn valid() -> IndexBox {
        IndexBox::from_size(IntVect3::ZERO, [4, 3, 5])
    }

    #[test]
    fn test_constant_field_has_zero_curvature() {
        let c = 2.5;
        let x = Field3::new(valid().grow(1), c);
        let a = Field3::new(valid(), 1.0);
        let mut y = Field3::new(valid(), 0.0);

        adotx(&valid(), &mut y, &x, &a, [3.0, 1.0, 0.5], 0.7, 1.3);

        for p in valid().cells() {
            assert_relative_eq!(y[p], 0.7 * c, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_quadratic_field_has_exact_second_difference() {
        // Second difference of i^2 is exactly 2
        let x = Field3::from_fn(valid().grow(1), |p| (p.x * p.x) as f64);
        let a = Field3::new(valid(), 0.0);
        let mut y = Field3::new(valid(), 0.0);
        let dxinv = [2.0, 1.0, 1.0];

        adotx(&valid(), &mut y, &x, &a, dxinv, 1.0, 1.0);

        for p in valid().cells() {
            assert_relative_eq!(y[p], -4.0 * 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_only_box_is_written() {
        let bx = IndexBox::cell(IntVect3::new(1, 1, 1));
        let x = Field3::new(valid().grow(1), 1.0);
        let a = Field3::new(valid(), 1.0);
        let mut y = Field3::new(valid(), -9.0);

        adotx(&bx, &mut y, &x, &a, [1.0; 3], 2.0, 1.0);

        for p in valid().cells() {
            let expected = if p == bx.lo { 2.0 } else { -9.0 };
            assert_eq!(y[p], expected);
        }
    }
}
