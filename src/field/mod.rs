//! Scalar fields over structured-grid index space.
//!
//! - [`Field3`]: dense x-fastest storage over an allocated [`IndexBox`](crate::types::IndexBox)
//! - [`norms`]: reductions (max-norm, L2-norm, sums) restricted to a box

mod field3;
pub mod norms;

pub use field3::Field3;
