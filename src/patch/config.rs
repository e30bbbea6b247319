//! Operator and smoother configuration.

use crate::exec::Execution;
use crate::stencil::StencilCoeffs;

/// Scalars defining the operator `alpha*a*phi - beta*Laplacian(phi)` on one
/// patch.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ALapConfig {
    /// Mass-term multiplier
    pub alpha: f64,
    /// Diffusion multiplier
    pub beta: f64,
    /// Inverse cell widths per axis
    pub dxinv: [f64; 3],
}

impl Default for ALapConfig {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            beta: 1.0,
            dxinv: [1.0; 3],
        }
    }
}

impl ALapConfig {
    /// Create a new configuration.
    pub fn new(alpha: f64, beta: f64, dxinv: [f64; 3]) -> Self {
        Self { alpha, beta, dxinv }
    }

    /// Isotropic cells of width `dx`.
    pub fn uniform_spacing(alpha: f64, beta: f64, dx: f64) -> Self {
        Self::new(alpha, beta, [1.0 / dx; 3])
    }

    /// Set the mass multiplier.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the diffusion multiplier.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the inverse cell widths.
    pub fn with_dxinv(mut self, dxinv: [f64; 3]) -> Self {
        self.dxinv = dxinv;
        self
    }

    /// Stencil coefficients derived from this configuration.
    pub fn coeffs(&self) -> StencilCoeffs {
        StencilCoeffs::from_spacing(self.alpha, self.beta, self.dxinv)
    }
}

/// How many relaxation sweeps to run and on which backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmootherConfig {
    /// Number of red+black sweep pairs per call
    pub n_sweeps: usize,
    /// Execution backend
    #[cfg_attr(feature = "serde", serde(default))]
    pub execution: Execution,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            n_sweeps: 2,
            execution: Execution::Serial,
        }
    }
}

impl SmootherConfig {
    /// Set the number of sweep pairs.
    pub fn with_sweeps(mut self, n_sweeps: usize) -> Self {
        self.n_sweeps = n_sweeps;
        self
    }

    /// Set the execution backend.
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }
}
