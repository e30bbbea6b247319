//! SIMD-optimized x-row kernel for operator application.
//!
//! The x-loop of [`adotx`](super::adotx) reads seven contiguous, equally
//! long slices (the centre row shifted by -1/0/+1 and the four transverse
//! neighbour rows) and writes one, which vectorises directly. The kernel
//! uses the `pulp` crate for portable SIMD with runtime feature detection
//! and evaluates the same operation sequence as the scalar stencil.
//!
//! # Usage
//!
//! ```ignore
//! use alap_rs::exec::Serial;
//! use alap_rs::kernels::simd::adotx_simd_with;
//!
//! adotx_simd_with(&Serial, &bx, &mut y, &x, &a, dxinv, alpha, beta);
//! ```

use pulp::{Arch, Simd, WithSimd};

use crate::exec::ParallelFor;
use crate::field::Field3;
use crate::stencil::StencilCoeffs;
use crate::types::{Axis, IndexBox};

/// Input rows of one x-row of the operator.
///
/// All slices have the length of the output row. `xm`/`xp` are the centre
/// row shifted by one cell down/up in x.
#[derive(Clone, Copy, Debug)]
pub struct StencilRows<'a> {
    pub a: &'a [f64],
    pub xc: &'a [f64],
    pub xm: &'a [f64],
    pub xp: &'a [f64],
    pub ym: &'a [f64],
    pub yp: &'a [f64],
    pub zm: &'a [f64],
    pub zp: &'a [f64],
}

/// Scalar reference implementation of one operator row.
///
/// This is the reference the SIMD version must match.
pub fn adotx_row_scalar(c: &StencilCoeffs, rows: &StencilRows<'_>, out: &mut [f64]) {
    debug_assert_eq!(rows.xc.len(), out.len());

    for n in 0..out.len() {
        let xc = rows.xc[n];
        out[n] = c.alpha * rows.a[n] * xc
            - c.dhx * (rows.xm[n] - 2.0 * xc + rows.xp[n])
            - c.dhy * (rows.ym[n] - 2.0 * xc + rows.yp[n])
            - c.dhz * (rows.zm[n] - 2.0 * xc + rows.zp[n]);
    }
}

/// Operator row with SIMD.
///
/// Uses pulp's width-agnostic SIMD API.
#[inline]
fn adotx_row_simd_inner<S: Simd>(
    simd: S,
    c: &StencilCoeffs,
    rows: &StencilRows<'_>,
    out: &mut [f64],
) {
    let alpha_v = simd.f64s_splat(c.alpha);
    let dhx_v = simd.f64s_splat(c.dhx);
    let dhy_v = simd.f64s_splat(c.dhy);
    let dhz_v = simd.f64s_splat(c.dhz);
    let two = simd.f64s_splat(2.0);

    let (a_head, a_tail) = S::f64s_as_simd(rows.a);
    let (xc_head, xc_tail) = S::f64s_as_simd(rows.xc);
    let (xm_head, xm_tail) = S::f64s_as_simd(rows.xm);
    let (xp_head, xp_tail) = S::f64s_as_simd(rows.xp);
    let (ym_head, ym_tail) = S::f64s_as_simd(rows.ym);
    let (yp_head, yp_tail) = S::f64s_as_simd(rows.yp);
    let (zm_head, zm_tail) = S::f64s_as_simd(rows.zm);
    let (zp_head, zp_tail) = S::f64s_as_simd(rows.zp);
    let (out_head, out_tail) = S::f64s_as_mut_simd(out);

    for (n, out_v) in out_head.iter_mut().enumerate() {
        let xc = xc_head[n];
        let two_xc = simd.f64s_mul(two, xc);
        let lap_x = simd.f64s_add(simd.f64s_sub(xm_head[n], two_xc), xp_head[n]);
        let lap_y = simd.f64s_add(simd.f64s_sub(ym_head[n], two_xc), yp_head[n]);
        let lap_z = simd.f64s_add(simd.f64s_sub(zm_head[n], two_xc), zp_head[n]);

        let mut y = simd.f64s_mul(simd.f64s_mul(alpha_v, a_head[n]), xc);
        y = simd.f64s_sub(y, simd.f64s_mul(dhx_v, lap_x));
        y = simd.f64s_sub(y, simd.f64s_mul(dhy_v, lap_y));
        y = simd.f64s_sub(y, simd.f64s_mul(dhz_v, lap_z));
        *out_v = y;
    }

    // Scalar tail
    let tail = StencilRows {
        a: a_tail,
        xc: xc_tail,
        xm: xm_tail,
        xp: xp_tail,
        ym: ym_tail,
        yp: yp_tail,
        zm: zm_tail,
        zp: zp_tail,
    };
    adotx_row_scalar(c, &tail, out_tail);
}

/// Operator row with automatic SIMD dispatch.
pub fn adotx_row_simd(c: &StencilCoeffs, rows: &StencilRows<'_>, out: &mut [f64]) {
    struct Impl<'a, 'b> {
        c: &'a StencilCoeffs,
        rows: &'a StencilRows<'b>,
        out: &'a mut [f64],
    }

    impl WithSimd for Impl<'_, '_> {
        type Output = ();

        #[inline(always)]
        fn with_simd<S: Simd>(self, simd: S) -> Self::Output {
            adotx_row_simd_inner(simd, self.c, self.rows, self.out);
        }
    }

    Arch::new().dispatch(Impl { c, rows, out });
}

/// [`adotx_with`](super::adotx_with) with SIMD row evaluation.
///
/// Same contract and halo requirements as the scalar kernel.
#[allow(clippy::too_many_arguments)]
pub fn adotx_simd_with<E: ParallelFor>(
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
    let n = bx.len(Axis::X);
    let ox = (bx.lo.x - x.domain().lo.x) as usize;
    let oa = (bx.lo.x - a.domain().lo.x) as usize;

    exec.for_each_row(bx, y, |row| {
        let (j, k) = (row.j(), row.k());
        let centre = x.row(j, k);
        let rows = StencilRows {
            a: &a.row(j, k)[oa..oa + n],
            xc: &centre[ox..ox + n],
            xm: &centre[ox - 1..ox - 1 + n],
            xp: &centre[ox + 1..ox + 1 + n],
            ym: &x.row(j - 1, k)[ox..ox + n],
            yp: &x.row(j + 1, k)[ox..ox + n],
            zm: &x.row(j, k - 1)[ox..ox + n],
            zp: &x.row(j, k + 1)[ox..ox + n],
        };
        adotx_row_simd(&c, &rows, row.as_mut_slice());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::Serial;
    use crate::kernels::adotx;
    use crate::types::IntVect3;
    use approx::assert_relative_eq;

    fn random_vec(n: usize, seed: u64) -> Vec<f64> {
        // Simple deterministic pseudo-random for testing
        let mut v = Vec::with_capacity(n);
        let mut x = seed;
        for _ in 0..n {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            let val = (x as f64) / (u64::MAX as f64) * 2.0 - 1.0;
            v.push(val);
        }
        v
    }

    #[test]
    fn test_row_simd_matches_scalar() {
        // Odd length exercises the scalar tail
        let n = 19;
        let centre = random_vec(n + 2, 1);
        let a = random_vec(n, 2);
        let ym = random_vec(n, 3);
        let yp = random_vec(n, 4);
        let zm = random_vec(n, 5);
        let zp = random_vec(n, 6);
        let rows = StencilRows {
            a: &a,
            xc: &centre[1..n + 1],
            xm: &centre[0..n],
            xp: &centre[2..n + 2],
            ym: &ym,
            yp: &yp,
            zm: &zm,
            zp: &zp,
        };
        let c = StencilCoeffs::from_spacing(0.9, 1.2, [1.0, 3.0, 2.0]);

        let mut out_scalar = vec![0.0; n];
        let mut out_simd = vec![0.0; n];
        adotx_row_scalar(&c, &rows, &mut out_scalar);
        adotx_row_simd(&c, &rows, &mut out_simd);

        for i in 0..n {
            assert_relative_eq!(out_simd[i], out_scalar[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_adotx_simd_matches_adotx() {
        let bx = IndexBox::new(IntVect3::new(1, 0, -1), IntVect3::new(10, 3, 2));
        let seed = random_vec(bx.grow(2).num_cells(), 7);
        let x = Field3::from_fn(bx.grow(2), |p| seed[bx.grow(2).offset(p)]);
        let a = Field3::from_fn(bx.grow(1), |p| 1.0 + 0.5 * seed[bx.grow(2).offset(p)].abs());
        let dxinv = [2.0, 1.0, 0.5];

        let mut y_scalar = Field3::new(bx, 0.0);
        let mut y_simd = Field3::new(bx.grow(1), 0.0);
        adotx(&bx, &mut y_scalar, &x, &a, dxinv, 0.4, 1.5);
        adotx_simd_with(&Serial, &bx, &mut y_simd, &x, &a, dxinv, 0.4, 1.5);

        for p in bx.cells() {
            assert_relative_eq!(y_simd[p], y_scalar[p], epsilon = 1e-12);
        }
    }
}
