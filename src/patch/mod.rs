//! Checked per-patch driver.
//!
//! [`ALapPatch`] bundles the operator scalars, the mass coefficient and
//! the boundary elimination data of one patch, validates field coverage
//! and runs the kernels over the valid box.

mod config;
mod driver;

pub use config::{ALapConfig, SmootherConfig};
pub use driver::{ALapPatch, SmoothReport};
