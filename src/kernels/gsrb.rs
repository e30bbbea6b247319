//! Red-black over-relaxed Gauss-Seidel sweep with boundary elimination.
//!
//! One call updates the cells of a single color. Cells of one color are
//! never stencil neighbours, so every update within a call reads only
//! opposite-color values that the call does not write. Two calls, red then
//! black, form one full smoothing sweep.
//!
//! Per selected cell:
//!
//! ```text
//! gamma = alpha*a + 2*(dhx+dhy+dhz)
//! g_m_d = gamma - dhx*(cf0+cf3) - dhy*(cf1+cf4) - dhz*(cf2+cf5)
//! rho   = dhx*(phi[i-1]+phi[i+1]) + dhy*(phi[j-1]+phi[j+1]) + dhz*(phi[k-1]+phi[k+1])
//! res   = rhs - (gamma*phi - rho)
//! phi  += omega/g_m_d * res
//! ```
//!
//! where `cf{n}` is the eliminated-neighbour coefficient of face `n`. The
//! residual uses the uncorrected `gamma`; only the step size sees `g_m_d`.

use crate::exec::ParallelFor;
use crate::field::Field3;
use crate::kernels::boundary::BoundaryFaces;
use crate::stencil::{OMEGA, StencilCoeffs};
use crate::types::{Axis, Face, IndexBox, IntVect3, Side};

/// Checkerboard class of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Cells with even `i+j+k` (`redblack = 0`)
    Red,
    /// Cells with odd `i+j+k` (`redblack = 1`)
    Black,
}

impl Color {
    /// Both colors in sweep order.
    pub const SWEEP: [Color; 2] = [Color::Red, Color::Black];

    /// Color for an integer selector, `None` unless 0 or 1.
    pub fn from_redblack(redblack: i32) -> Option<Self> {
        match redblack {
            0 => Some(Color::Red),
            1 => Some(Color::Black),
            _ => None,
        }
    }

    /// Integer selector of the color.
    #[inline]
    pub const fn redblack(self) -> i32 {
        match self {
            Color::Red => 0,
            Color::Black => 1,
        }
    }

    /// True if `(i+j+k+redblack)` is even.
    #[inline]
    pub fn selects(self, p: IntVect3) -> bool {
        (p.sum() + self.redblack()).rem_euclid(2) == 0
    }

    /// The other color.
    #[inline]
    pub const fn other(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// Unmodified and boundary-corrected diagonals of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellDiagonal {
    /// `alpha*a + 2*(dhx+dhy+dhz)`
    pub gamma: f64,
    /// `gamma` minus the stiffening of eliminated exterior neighbours
    pub corrected: f64,
}

/// Diagonals of the operator at `p` with per-face elimination applied.
#[inline]
pub fn cell_diagonal(
    c: &StencilCoeffs,
    a: &Field3<f64>,
    bc: &BoundaryFaces<'_>,
    vbox: &IndexBox,
    p: IntVect3,
) -> CellDiagonal {
    let cf = bc.coefficients(vbox, p);
    let gamma = c.alpha * a[p] + c.dhfac;
    let corrected = Axis::ALL.into_iter().fold(gamma, |g, axis| {
        let lo = cf.get(Face::new(axis, Side::Low));
        let hi = cf.get(Face::new(axis, Side::High));
        g - c.dh(axis) * (lo + hi)
    });
    CellDiagonal { gamma, corrected }
}

/// Relaxed value of `phi` at `p` given the current neighbour values.
#[inline(always)]
fn relaxed_value(
    c: &StencilCoeffs,
    phi: &Field3<f64>,
    rhs: &Field3<f64>,
    a: &Field3<f64>,
    bc: &BoundaryFaces<'_>,
    vbox: &IndexBox,
    p: IntVect3,
) -> f64 {
    let IntVect3 { x: i, y: j, z: k } = p;
    let CellDiagonal { gamma, corrected } = cell_diagonal(c, a, bc, vbox, p);

    let rho = c.dhx * (phi[(i - 1, j, k)] + phi[(i + 1, j, k)])
        + c.dhy * (phi[(i, j - 1, k)] + phi[(i, j + 1, k)])
        + c.dhz * (phi[(i, j, k - 1)] + phi[(i, j, k + 1)]);

    let res = rhs[p] - (gamma * phi[p] - rho);
    phi[p] + OMEGA / corrected * res
}

fn debug_check_coverage(bx: &IndexBox, phi: &Field3<f64>, rhs: &Field3<f64>, a: &Field3<f64>) {
    debug_assert!(phi.domain().contains_box(&bx.grow(1)), "phi lacks a halo around {}", bx);
    debug_assert!(rhs.domain().contains_box(bx), "rhs does not cover {}", bx);
    debug_assert!(a.domain().contains_box(bx), "a does not cover {}", bx);
}

/// One colored Gauss-Seidel half-sweep over `bx`, updating `phi` in place.
///
/// # Arguments
/// * `bx` - Cells to update, normally the valid box
/// * `phi` - Solution, valid on `bx` plus a one-cell halo
/// * `rhs` - Right-hand side, valid on `bx`
/// * `a` - Mass coefficient, valid on `bx`
/// * `c` - Stencil coefficients (`alpha`, `dhx`, `dhy`, `dhz`)
/// * `bc` - Per-face elimination data laid out around `vbox`
/// * `vbox` - Valid box of the patch, used to detect boundary cells
/// * `color` - Which checkerboard class to update
#[allow(clippy::too_many_arguments)]
pub fn gsrb(
    bx: &IndexBox,
    phi: &mut Field3<f64>,
    rhs: &Field3<f64>,
    a: &Field3<f64>,
    c: &StencilCoeffs,
    bc: &BoundaryFaces<'_>,
    vbox: &IndexBox,
    color: Color,
) {
    debug_check_coverage(bx, phi, rhs, a);

    for k in bx.lo.z..=bx.hi.z {
        for j in bx.lo.y..=bx.hi.y {
            for i in bx.lo.x..=bx.hi.x {
                let p = IntVect3::new(i, j, k);
                if color.selects(p) {
                    let v = relaxed_value(c, phi, rhs, a, bc, vbox, p);
                    phi[p] = v;
                }
            }
        }
    }
}

/// [`gsrb`] on an explicit execution backend.
///
/// New values of the selected color are first computed into `scratch`
/// (allocated over at least `bx`) from a read-only `phi`, then copied back.
/// Since same-color cells never read one another, the result is bitwise
/// identical to [`gsrb`]. Opposite-color cells of `scratch` are not touched.
#[allow(clippy::too_many_arguments)]
pub fn gsrb_with<E: ParallelFor>(
    exec: &E,
    bx: &IndexBox,
    phi: &mut Field3<f64>,
    rhs: &Field3<f64>,
    a: &Field3<f64>,
    c: &StencilCoeffs,
    bc: &BoundaryFaces<'_>,
    vbox: &IndexBox,
    color: Color,
    scratch: &mut Field3<f64>,
) {
    debug_check_coverage(bx, phi, rhs, a);

    {
        let phi: &Field3<f64> = phi;
        exec.for_each_row(bx, scratch, |row| {
            for i in row.xs() {
                let p = row.cell(i);
                if color.selects(p) {
                    row[i] = relaxed_value(c, phi, rhs, a, bc, vbox, p);
                }
            }
        });
    }

    let scratch: &Field3<f64> = scratch;
    exec.for_each_row(bx, phi, |row| {
        for i in row.xs() {
            let p = row.cell(i);
            if color.selects(p) {
                row[i] = scratch[p];
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Serial;
    use crate::kernels::boundary::BoundaryData;
    use approx::assert_relative_eq;

    fn vbox() -> IndexBox {
        IndexBox::from_size(IntVect3::ZERO, [4, 4, 4])
    }

    fn pseudo_random(p: IntVect3) -> f64 {
        let h = (p.x * 73 + p.y * 19 + p.z * 7 + 11).rem_euclid(23);
        h as f64 / 23.0 - 0.5
    }

    #[test]
    fn test_color_selector() {
        assert_eq!(Color::from_redblack(0), Some(Color::Red));
        assert_eq!(Color::from_redblack(1), Some(Color::Black));
        assert_eq!(Color::from_redblack(2), None);
        assert!(Color::Red.selects(IntVect3::new(1, 1, 0)));
        assert!(Color::Black.selects(IntVect3::new(1, 0, 0)));
        // Parity must hold for ghost cells at negative indices too
        assert!(Color::Red.selects(IntVect3::new(-1, 0, -1)));
        assert!(Color::Black.selects(IntVect3::new(-1, 0, 0)));
        assert_eq!(Color::Red.other(), Color::Black);
    }

    #[test]
    fn test_single_cell_update_matches_formula() {
        let vb = vbox();
        let c = StencilCoeffs::new(0.5, 1.0, 2.0, 3.0);
        let phi0 = Field3::from_fn(vb.grow(1), pseudo_random);
        let rhs = Field3::from_fn(vb, |p| pseudo_random(p + IntVect3::splat(5)));
        let a = Field3::new(vb, 2.0);
        let bc_data = BoundaryData::new(vb);
        let bc = bc_data.faces();

        let p = IntVect3::new(1, 1, 2);
        let mut phi = phi0.clone();
        gsrb(&IndexBox::cell(p), &mut phi, &rhs, &a, &c, &bc, &vb, Color::Red);

        let gamma = 0.5 * 2.0 + 2.0 * 6.0;
        let rho = 1.0 * (phi0[(0, 1, 2)] + phi0[(2, 1, 2)])
            + 2.0 * (phi0[(1, 0, 2)] + phi0[(1, 2, 2)])
            + 3.0 * (phi0[(1, 1, 1)] + phi0[(1, 1, 3)]);
        let res = rhs[p] - (gamma * phi0[p] - rho);
        assert_relative_eq!(phi[p], phi0[p] + OMEGA / gamma * res, epsilon = 1e-14);
    }

    #[test]
    fn test_corrected_diagonal_on_low_x_face() {
        let vb = IndexBox::from_size(IntVect3::ZERO, [2, 2, 2]);
        let c = StencilCoeffs::from_spacing(1.0, 1.0, [2.0, 1.0, 1.0]);
        let a = Field3::new(vb, 1.0);
        let mut bc_data = BoundaryData::new(vb);
        bc_data.set_uniform(Face::XLO, 1, 0.4);
        let bc = bc_data.faces();

        let on_face = cell_diagonal(&c, &a, &bc, &vb, IntVect3::new(0, 1, 0));
        assert_relative_eq!(on_face.gamma - on_face.corrected, c.dhx * 0.4, epsilon = 1e-12);

        let off_face = cell_diagonal(&c, &a, &bc, &vb, IntVect3::new(1, 1, 0));
        assert_eq!(off_face.gamma, off_face.corrected);
    }

    #[test]
    fn test_corrected_diagonal_in_corner_scales_each_axis() {
        let vb = IndexBox::from_size(IntVect3::ZERO, [2, 2, 2]);
        let c = StencilCoeffs::from_spacing(0.0, 1.0, [2.0, 1.0, 3.0]);
        let a = Field3::new(vb, 1.0);
        let mut bc_data = BoundaryData::new(vb);
        bc_data.set_uniform(Face::XLO, 1, 0.4);
        bc_data.set_uniform(Face::YLO, 1, 0.2);
        bc_data.set_uniform(Face::ZHI, 1, 0.3);
        let bc = bc_data.faces();

        let corner = cell_diagonal(&c, &a, &bc, &vb, IntVect3::new(0, 0, 1));
        let stiffening = 4.0 * 0.4 + 0.2 + 9.0 * 0.3;
        assert_relative_eq!(corner.gamma - corner.corrected, stiffening, epsilon = 1e-12);
    }

    #[test]
    fn test_residual_uses_uncorrected_diagonal() {
        let vb = IndexBox::from_size(IntVect3::ZERO, [2, 2, 2]);
        let c = StencilCoeffs::new(1.0, 1.0, 1.0, 1.0);
        let a = Field3::new(vb, 1.0);
        let rhs = Field3::new(vb, 1.0);
        let mut bc_data = BoundaryData::new(vb);
        bc_data.set_uniform(Face::XLO, 1, 0.5);
        let bc = bc_data.faces();

        // With phi = 0 everywhere, res = rhs = 1 regardless of elimination,
        // so the step is exactly omega / g_m_d.
        let mut phi = Field3::new(vb.grow(1), 0.0);
        gsrb(&vb, &mut phi, &rhs, &a, &c, &bc, &vb, Color::Red);

        let gamma = 7.0;
        assert_relative_eq!(phi[(0, 0, 0)], OMEGA / (gamma - 0.5), epsilon = 1e-14);
        assert_relative_eq!(phi[(1, 1, 0)], OMEGA / gamma, epsilon = 1e-14);
        assert_eq!(phi[(1, 0, 0)], 0.0);
    }

    #[test]
    fn test_only_selected_color_changes() {
        let vb = vbox();
        let c = StencilCoeffs::new(1.0, 1.0, 1.0, 1.0);
        let rhs = Field3::new(vb, 1.0);
        let a = Field3::new(vb, 1.0);
        let bc_data = BoundaryData::new(vb);
        let bc = bc_data.faces();

        for color in Color::SWEEP {
            let mut phi = Field3::new(vb.grow(1), 0.0);
            gsrb(&vb, &mut phi, &rhs, &a, &c, &bc, &vb, color);
            for p in vb.grow(1).cells() {
                if vb.contains(p) && color.selects(p) {
                    assert!(phi[p] > 0.0, "cell {} not updated", p);
                } else {
                    assert_eq!(phi[p], 0.0, "cell {} changed", p);
                }
            }
        }
    }

    #[test]
    fn test_two_phase_matches_in_place() {
        let vb = vbox();
        let c = StencilCoeffs::from_spacing(0.3, 1.0, [1.0, 2.0, 0.5]);
        let rhs = Field3::from_fn(vb, pseudo_random);
        let a = Field3::from_fn(vb, |p| 1.0 + pseudo_random(p).abs());
        let mut bc_data = BoundaryData::new(vb);
        bc_data.set_uniform(Face::YHI, 1, 0.2);
        bc_data.set_uniform(Face::ZLO, 1, -0.7);
        let bc = bc_data.faces();

        let mut in_place = Field3::from_fn(vb.grow(1), |p| pseudo_random(p + IntVect3::splat(3)));
        let mut two_phase = in_place.clone();
        let mut scratch = Field3::new(vb, 0.0);

        for color in [Color::Red, Color::Black, Color::Red, Color::Black] {
            gsrb(&vb, &mut in_place, &rhs, &a, &c, &bc, &vb, color);
            gsrb_with(&Serial, &vb, &mut two_phase, &rhs, &a, &c, &bc, &vb, color, &mut scratch);
        }
        assert_eq!(in_place, two_phase);
    }
}
