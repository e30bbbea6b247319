//! Directional face fluxes `f = -fac * (sol(cell) - sol(cell - e_d))`.
//!
//! The flux stored at index `p` belongs to the face between `p - e_d` and
//! `p`; boxes passed here are therefore usually face-centred (see
//! [`IndexBox::surrounding_nodes`]). `fac` is the caller's diffusion factor
//! for the axis, typically `beta * dxinv[d]`.
//!
//! The `*face` variants only evaluate two planes, `lo.d` and `lo.d + len`,
//! which is all that coarse/fine flux matching at patch boundaries needs.

use crate::exec::{ParallelFor, Serial};
use crate::field::Field3;
use crate::types::{Axis, IndexBox, IntVect3};

/// Flux along `axis` over every index of `bx`.
pub fn flux(axis: Axis, bx: &IndexBox, f: &mut Field3<f64>, sol: &Field3<f64>, fac: f64) {
    flux_with(&Serial, axis, bx, f, sol, fac);
}

/// [`flux`] on an explicit execution backend.
pub fn flux_with<E: ParallelFor>(
    exec: &E,
    axis: Axis,
    bx: &IndexBox,
    f: &mut Field3<f64>,
    sol: &Field3<f64>,
    fac: f64,
) {
    debug_assert!(
        sol.domain().contains_box(bx) && sol.domain().contains_box(&bx.shift(axis, -1)),
        "sol does not cover {} and its lower {} neighbours",
        bx,
        axis
    );

    let step = IntVect3::unit(axis);
    exec.for_each_row(bx, f, |row| {
        for i in row.xs() {
            let p = row.cell(i);
            row[i] = -fac * (sol[p] - sol[p - step]);
        }
    });
}

/// Flux along `axis` on the two planes `bx.lo.d` and `bx.lo.d + len` only.
///
/// All other entries of `f` are left untouched. With `len == 0` both planes
/// coincide.
pub fn flux_face(
    axis: Axis,
    bx: &IndexBox,
    f: &mut Field3<f64>,
    sol: &Field3<f64>,
    fac: f64,
    len: i32,
) {
    flux_face_with(&Serial, axis, bx, f, sol, fac, len);
}

/// [`flux_face`] on an explicit execution backend.
pub fn flux_face_with<E: ParallelFor>(
    exec: &E,
    axis: Axis,
    bx: &IndexBox,
    f: &mut Field3<f64>,
    sol: &Field3<f64>,
    fac: f64,
    len: i32,
) {
    let lo = bx.lo.get(axis);
    flux_with(exec, axis, &bx.plane(axis, lo), f, sol, fac);
    flux_with(exec, axis, &bx.plane(axis, lo + len), f, sol, fac);
}

/// x-flux over the whole box.
pub fn flux_x(bx: &IndexBox, fx: &mut Field3<f64>, sol: &Field3<f64>, fac: f64) {
    flux(Axis::X, bx, fx, sol, fac);
}

/// x-flux on the planes `lo.x` and `lo.x + xlen`.
pub fn flux_xface(bx: &IndexBox, fx: &mut Field3<f64>, sol: &Field3<f64>, fac: f64, xlen: i32) {
    flux_face(Axis::X, bx, fx, sol, fac, xlen);
}

/// y-flux over the whole box.
pub fn flux_y(bx: &IndexBox, fy: &mut Field3<f64>, sol: &Field3<f64>, fac: f64) {
    flux(Axis::Y, bx, fy, sol, fac);
}

/// y-flux on the planes `lo.y` and `lo.y + ylen`.
pub fn flux_yface(bx: &IndexBox, fy: &mut Field3<f64>, sol: &Field3<f64>, fac: f64, ylen: i32) {
    flux_face(Axis::Y, bx, fy, sol, fac, ylen);
}

/// z-flux over the whole box.
pub fn flux_z(bx: &IndexBox, fz: &mut Field3<f64>, sol: &Field3<f64>, fac: f64) {
    flux(Axis::Z, bx, fz, sol, fac);
}

/// z-flux on the planes `lo.z` and `lo.z + zlen`.
pub fn flux_zface(bx: &IndexBox, fz: &mut Field3<f64>, sol: &Field3<f64>, fac: f64, zlen: i32) {
    flux_face(Axis::Z, bx, fz, sol, fac, zlen);
}
