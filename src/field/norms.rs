//! Reductions over a box of a field.
//!
//! Used by drivers to monitor smoothing progress; the kernels themselves
//! never reduce.

use super::Field3;
use crate::types::IndexBox;

/// Maximum absolute value over the cells of `bx`.
pub fn norm_inf(f: &Field3<f64>, bx: &IndexBox) -> f64 {
    bx.cells().fold(0.0_f64, |acc, p| acc.max(f[p].abs()))
}

/// Discrete L2 norm `sqrt(sum f^2)` over the cells of `bx` (unweighted).
pub fn norm_l2(f: &Field3<f64>, bx: &IndexBox) -> f64 {
    bx.cells().map(|p| f[p] * f[p]).sum::<f64>().sqrt()
}

/// Sum of values over the cells of `bx`.
pub fn sum(f: &Field3<f64>, bx: &IndexBox) -> f64 {
    bx.cells().map(|p| f[p]).sum()
}

/// Maximum absolute difference between two fields over `bx`.
pub fn max_abs_diff(f: &Field3<f64>, g: &Field3<f64>, bx: &IndexBox) -> f64 {
    bx.cells()
        .fold(0.0_f64, |acc, p| acc.max((f[p] - g[p]).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntVect3;
    use approx::assert_relative_eq;

    #[test]
    fn test_norms_restricted_to_box() {
        let domain = IndexBox::from_size(IntVect3::splat(-1), [4, 4, 4]);
        let mut f = Field3::new(domain, 100.0);
        let bx = IndexBox::from_size(IntVect3::ZERO, [2, 1, 1]);
        f[(0, 0, 0)] = 3.0;
        f[(1, 0, 0)] = -4.0;

        assert_eq!(norm_inf(&f, &bx), 4.0);
        assert_relative_eq!(norm_l2(&f, &bx), 5.0, epsilon = 1e-15);
        assert_eq!(sum(&f, &bx), -1.0);
    }

    #[test]
    fn test_max_abs_diff() {
        let bx = IndexBox::from_size(IntVect3::ZERO, [3, 3, 3]);
        let f = Field3::from_fn(bx, |p| p.x as f64);
        let mut g = f.clone();
        g[(2, 1, 0)] += 0.25;
        assert_eq!(max_abs_diff(&f, &g, &bx), 0.25);
        assert_eq!(max_abs_diff(&f, &f, &bx), 0.0);
    }
}
