//! Per-patch numerical kernels of the variable-coefficient operator
//! `alpha*a(x)*phi - beta*div(grad phi)`.
//!
//! # Kernels
//!
//! - [`adotx`]: operator application
//! - [`normalize`]: division by the unmodified diagonal
//! - [`flux`] / [`flux_face`] and the named `flux_{x,y,z}[face]` variants:
//!   directional face fluxes, full box or two boundary planes
//! - [`gsrb`]: one red or black over-relaxed Gauss-Seidel half-sweep with
//!   per-face boundary elimination
//! - [`residual`]: `rhs - A x`
//!
//! Every kernel has a `*_with` form taking a [`ParallelFor`](crate::exec::ParallelFor)
//! backend. Kernels never allocate, never log and signal no errors; field
//! coverage is the caller's responsibility and is only `debug_assert!`ed.

mod adotx;
mod boundary;
mod flux;
mod gsrb;
mod normalize;
mod residual;
#[cfg(feature = "simd")]
pub mod simd;

pub use adotx::{adotx, adotx_with};
pub use boundary::{BoundaryData, BoundaryFaces, FaceBc};
pub use flux::{
    flux, flux_face, flux_face_with, flux_with, flux_x, flux_xface, flux_y, flux_yface, flux_z,
    flux_zface,
};
pub use gsrb::{CellDiagonal, Color, cell_diagonal, gsrb, gsrb_with};
pub use normalize::{normalize, normalize_with};
pub use residual::{residual, residual_with};
