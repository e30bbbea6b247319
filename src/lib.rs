//! # alap-rs
//!
//! Matrix-free kernels for the variable-coefficient elliptic operator
//!
//! ```text
//! A(phi) = alpha * a(x) * phi - beta * Laplacian(phi)
//! ```
//!
//! on uniform 3D cell-centred patches, as used inside geometric multigrid.
//!
//! This crate provides:
//! - Integer index space (`IntVect3`, `IndexBox`) and face addressing
//! - Cell-indexed fields over arbitrary index boxes (`Field3`)
//! - Operator application, diagonal normalization and residual
//! - Directional face fluxes over full boxes or boundary planes only
//! - Red-black over-relaxed Gauss-Seidel smoothing with per-face boundary
//!   elimination
//! - Serial and rayon-parallel execution of every kernel
//! - A checked per-patch driver (`ALapPatch`)

pub mod error;
pub mod exec;
pub mod field;
pub mod kernels;
pub mod patch;
pub mod stencil;
pub mod types;

// Re-export main types for convenience
pub use error::{AlapError, Result};
pub use exec::{Execution, ParallelFor, Row, Serial};
pub use field::Field3;
pub use kernels::{
    BoundaryData, BoundaryFaces, Color, FaceBc, adotx, flux_x, flux_xface, flux_y, flux_yface,
    flux_z, flux_zface, gsrb, normalize, residual,
};
pub use patch::{ALapConfig, ALapPatch, SmoothReport, SmootherConfig};
pub use stencil::{OMEGA, StencilCoeffs};
pub use types::{Axis, Face, FaceArray, IndexBox, IntVect3, Side};

#[cfg(feature = "parallel")]
pub use exec::Rayon;
