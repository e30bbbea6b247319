//! Coefficients of the seven-point `alpha*a - beta*Laplacian` stencil.

use crate::types::Axis;

/// Over-relaxation factor of the red-black smoother.
pub const OMEGA: f64 = 1.15;

/// Scalar coefficients shared by every stencil kernel.
///
/// `dh{x,y,z} = beta * dxinv[axis]^2` are the directional diffusion
/// coefficients; `dhfac = 2 * (dhx + dhy + dhz)` is the diffusive part of
/// the diagonal.
///
/// # Example
///
/// ```
/// use alap_rs::stencil::StencilCoeffs;
///
/// let c = StencilCoeffs::from_spacing(1.0, 2.0, [1.0, 2.0, 0.5]);
/// assert_eq!(c.dhx, 2.0);
/// assert_eq!(c.dhy, 8.0);
/// assert_eq!(c.dhz, 0.5);
/// assert_eq!(c.diagonal(3.0), 3.0 + 21.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StencilCoeffs {
    /// Mass-term multiplier
    pub alpha: f64,
    /// x diffusion coefficient
    pub dhx: f64,
    /// y diffusion coefficient
    pub dhy: f64,
    /// z diffusion coefficient
    pub dhz: f64,
    /// `2 * (dhx + dhy + dhz)`
    pub dhfac: f64,
}

impl StencilCoeffs {
    /// Create from already-scaled diffusion coefficients.
    pub fn new(alpha: f64, dhx: f64, dhy: f64, dhz: f64) -> Self {
        Self {
            alpha,
            dhx,
            dhy,
            dhz,
            dhfac: 2.0 * (dhx + dhy + dhz),
        }
    }

    /// Create from `beta` and inverse grid spacings.
    pub fn from_spacing(alpha: f64, beta: f64, dxinv: [f64; 3]) -> Self {
        Self::new(
            alpha,
            beta * dxinv[0] * dxinv[0],
            beta * dxinv[1] * dxinv[1],
            beta * dxinv[2] * dxinv[2],
        )
    }

    /// Diffusion coefficient along an axis.
    #[inline]
    pub fn dh(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.dhx,
            Axis::Y => self.dhy,
            Axis::Z => self.dhz,
        }
    }

    /// Unmodified diagonal `alpha*a + 2*(dhx+dhy+dhz)` for a cell with
    /// coefficient `a`.
    #[inline]
    pub fn diagonal(&self, a: f64) -> f64 {
        self.alpha * a + self.dhfac
    }
}
