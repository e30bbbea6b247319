//! Residual `r = rhs - (alpha*a*x - beta*Laplacian(x))`.

use crate::exec::{ParallelFor, Serial};
use crate::field::Field3;
use crate::kernels::adotx::apply_cell;
use crate::stencil::StencilCoeffs;
use crate::types::IndexBox;

/// Residual of `x` against `rhs` over `bx`, written to `res`.
///
/// Same stencil and halo requirements as [`adotx`](super::adotx).
#[allow(clippy::too_many_arguments)]
pub fn residual(
    bx: &IndexBox,
    res: &mut Field3<f64>,
    rhs: &Field3<f64>,
    x: &Field3<f64>,
    a: &Field3<f64>,
    dxinv: [f64; 3],
    alpha: f64,
    beta: f64,
) {
    residual_with(&Serial, bx, res, rhs, x, a, dxinv, alpha, beta);
}

/// [`residual`] on an explicit execution backend.
#[allow(clippy::too_many_arguments)]
pub fn residual_with<E: ParallelFor>(
    exec: &E,
    bx: &IndexBox,
    res: &mut Field3<f64>,
    rhs: &Field3<f64>,
    x: &Field3<f64>,
    a: &Field3<f64>,
    dxinv: [f64; 3],
    alpha: f64,
    beta: f64,
) {
    debug_assert!(x.domain().contains_box(&bx.grow(1)), "x lacks a halo around {}", bx);
    debug_assert!(rhs.domain().contains_box(bx), "rhs does not cover {}", bx);

    let c = StencilCoeffs::from_spacing(alpha, beta, dxinv);
    exec.for_each_row(bx, res, |row| {
        let (j, k) = (row.j(), row.k());
        for i in row.xs() {
            row[i] = rhs[(i, j, k)] - apply_cell(&c, x, a, i, j, k);
        }
    });
}
