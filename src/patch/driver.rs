//! Checked per-patch entry points over the raw kernels.

use log::{debug, trace, warn};

use crate::error::{AlapError, Result};
use crate::exec::{Execution, Serial};
use crate::field::{Field3, norms};
use crate::kernels::{self, BoundaryData, BoundaryFaces, Color};
use crate::stencil::StencilCoeffs;
use crate::types::{Axis, Face, IndexBox};

use super::config::{ALapConfig, SmootherConfig};

#[cfg(feature = "parallel")]
use crate::exec::Rayon;

/// Outcome of [`ALapPatch::smooth`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothReport {
    /// Red+black sweep pairs performed
    pub sweeps: usize,
    /// L2 residual norm before smoothing
    pub initial_residual: f64,
    /// L2 residual norm after smoothing
    pub final_residual: f64,
}

impl SmoothReport {
    /// Ratio `final / initial`, 0 when the initial residual is already 0.
    pub fn reduction(&self) -> f64 {
        if self.initial_residual > 0.0 {
            self.final_residual / self.initial_residual
        } else {
            0.0
        }
    }
}

fn require<T: Copy>(name: &str, field: &Field3<T>, required: &IndexBox) -> Result<()> {
    if field.domain().contains_box(required) {
        Ok(())
    } else {
        warn!(
            "rejecting call: field `{}` over {} does not cover {}",
            name,
            field.domain(),
            required
        );
        Err(AlapError::field_too_small(name, *required, *field.domain()))
    }
}

/// The operator on one patch: its configuration, valid box, mass
/// coefficient and boundary elimination data.
///
/// Every method validates that the fields it is handed cover the cells the
/// kernel will touch, then runs the kernel over the valid box. Validation
/// refuses the call; it never clamps.
///
/// # Example
///
/// ```
/// use alap_rs::field::Field3;
/// use alap_rs::kernels::BoundaryData;
/// use alap_rs::patch::{ALapConfig, ALapPatch};
/// use alap_rs::types::{IndexBox, IntVect3};
///
/// let vbox = IndexBox::from_size(IntVect3::ZERO, [4, 4, 4]);
/// let a = Field3::new(vbox, 1.0);
/// let bc = BoundaryData::new(vbox);
/// let patch = ALapPatch::from_data(ALapConfig::default().with_alpha(2.0), &a, &bc).unwrap();
///
/// let x = Field3::new(vbox.grow(1), 1.0);
/// let mut y = Field3::new(vbox, 0.0);
/// patch.apply(&mut y, &x).unwrap();
/// assert_eq!(y[(1, 2, 3)], 2.0);
///
/// // Missing halo is refused
/// let no_halo = Field3::new(vbox, 1.0);
/// assert!(patch.apply(&mut y, &no_halo).is_err());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ALapPatch<'a> {
    config: ALapConfig,
    coeffs: StencilCoeffs,
    vbox: IndexBox,
    a: &'a Field3<f64>,
    bc: BoundaryFaces<'a>,
}

impl<'a> ALapPatch<'a> {
    /// Assemble a patch from borrowed boundary arrays.
    ///
    /// Fails if `a` does not cover `vbox` or a face's mask/coefficient
    /// arrays do not cover its ghost/boundary layer.
    pub fn new(
        config: ALapConfig,
        vbox: IndexBox,
        a: &'a Field3<f64>,
        bc: BoundaryFaces<'a>,
    ) -> Result<Self> {
        require("a", a, &vbox)?;
        for face in Face::ALL {
            let arrays = bc.face(face);
            require(&format!("mask{}", face.index()), arrays.mask, &face.ghost_plane(&vbox))?;
            require(&format!("coef{}", face.index()), arrays.coef, &face.boundary_plane(&vbox))?;
        }
        Ok(Self {
            config,
            coeffs: config.coeffs(),
            vbox,
            a,
            bc,
        })
    }

    /// Assemble a patch from owned boundary data; the valid box is taken
    /// from the data.
    pub fn from_data(config: ALapConfig, a: &'a Field3<f64>, bc: &'a BoundaryData) -> Result<Self> {
        Self::new(config, *bc.vbox(), a, bc.faces())
    }

    /// Operator configuration.
    pub fn config(&self) -> &ALapConfig {
        &self.config
    }

    /// Stencil coefficients.
    pub fn coeffs(&self) -> &StencilCoeffs {
        &self.coeffs
    }

    /// Valid box of the patch.
    pub fn vbox(&self) -> &IndexBox {
        &self.vbox
    }

    /// `y = A x` over the valid box.
    pub fn apply(&self, y: &mut Field3<f64>, x: &Field3<f64>) -> Result<()> {
        self.apply_on(&self.vbox, y, x)
    }

    /// `y = A x` over a tile `bx` of the valid box.
    pub fn apply_on(&self, bx: &IndexBox, y: &mut Field3<f64>, x: &Field3<f64>) -> Result<()> {
        if !self.vbox.contains_box(bx) {
            return Err(AlapError::BoxOutsideValid {
                bx: *bx,
                vbox: self.vbox,
            });
        }
        require("y", y, bx)?;
        require("x", x, &bx.grow(1))?;
        let ALapConfig { alpha, beta, dxinv } = self.config;
        kernels::adotx(bx, y, x, self.a, dxinv, alpha, beta);
        Ok(())
    }

    /// Divide `x` by the unmodified diagonal over the valid box.
    pub fn normalize(&self, x: &mut Field3<f64>) -> Result<()> {
        require("x", x, &self.vbox)?;
        let ALapConfig { alpha, beta, dxinv } = self.config;
        kernels::normalize(&self.vbox, x, self.a, dxinv, alpha, beta);
        Ok(())
    }

    /// `res = rhs - A x` over the valid box.
    pub fn residual(
        &self,
        res: &mut Field3<f64>,
        rhs: &Field3<f64>,
        x: &Field3<f64>,
    ) -> Result<()> {
        require("res", res, &self.vbox)?;
        require("rhs", rhs, &self.vbox)?;
        require("x", x, &self.vbox.grow(1))?;
        self.residual_on(Execution::Serial, res, rhs, x);
        Ok(())
    }

    /// Face fluxes `-beta*dxinv[d]*(sol - sol[-e_d])` on every face of the
    /// valid box, one face-centred field per axis.
    pub fn fluxes(&self, flux: [&mut Field3<f64>; 3], sol: &Field3<f64>) -> Result<()> {
        for (axis, f) in Axis::ALL.into_iter().zip(flux) {
            let nodes = self.vbox.surrounding_nodes(axis);
            require(&format!("flux_{}", axis), f, &nodes)?;
            require("sol", sol, &self.vbox.grow_dir(axis, 1))?;
            kernels::flux(axis, &nodes, f, sol, self.flux_factor(axis));
        }
        Ok(())
    }

    /// Face fluxes on the two bounding planes of the valid box per axis
    /// only, for coarse/fine flux matching.
    pub fn boundary_fluxes(&self, flux: [&mut Field3<f64>; 3], sol: &Field3<f64>) -> Result<()> {
        for (axis, f) in Axis::ALL.into_iter().zip(flux) {
            let nodes = self.vbox.surrounding_nodes(axis);
            require(&format!("flux_{}", axis), f, &nodes)?;
            require("sol", sol, &self.vbox.grow_dir(axis, 1))?;
            let len = self.vbox.len(axis) as i32;
            kernels::flux_face(axis, &nodes, f, sol, self.flux_factor(axis), len);
        }
        Ok(())
    }

    /// One colored half-sweep selected by an integer `redblack` in {0, 1}.
    ///
    /// `scratch` must cover the valid box. Only the parallel backend writes
    /// it, but it is checked on every path so that callers can switch
    /// execution without reallocating.
    pub fn relax(
        &self,
        phi: &mut Field3<f64>,
        rhs: &Field3<f64>,
        redblack: i32,
        scratch: &mut Field3<f64>,
        execution: Execution,
    ) -> Result<()> {
        let color = Color::from_redblack(redblack).ok_or(AlapError::InvalidColor(redblack))?;
        self.check_smoothing_fields(phi, rhs, scratch)?;
        warn_on_serial_fallback(execution);
        self.sweep_on(execution, phi, rhs, color, scratch);
        Ok(())
    }

    /// Run `cfg.n_sweeps` red+black sweep pairs on `phi`.
    ///
    /// `scratch` must cover the valid box; it holds residuals and, on the
    /// parallel backend, the two-phase color updates. Its contents on return
    /// are unspecified.
    pub fn smooth(
        &self,
        phi: &mut Field3<f64>,
        rhs: &Field3<f64>,
        scratch: &mut Field3<f64>,
        cfg: &SmootherConfig,
    ) -> Result<SmoothReport> {
        self.check_smoothing_fields(phi, rhs, scratch)?;
        warn_on_serial_fallback(cfg.execution);

        let initial_residual = self.residual_norm(cfg.execution, scratch, rhs, phi);
        for sweep in 0..cfg.n_sweeps {
            for color in Color::SWEEP {
                self.sweep_on(cfg.execution, phi, rhs, color, scratch);
            }
            trace!("sweep {} of {} on {}", sweep + 1, cfg.n_sweeps, self.vbox);
        }
        let final_residual = self.residual_norm(cfg.execution, scratch, rhs, phi);

        if !final_residual.is_finite() {
            return Err(AlapError::NonFiniteResidual {
                sweeps: cfg.n_sweeps,
            });
        }

        debug!(
            "smoothed {}: {} sweeps, residual {:.3e} -> {:.3e}",
            self.vbox, cfg.n_sweeps, initial_residual, final_residual
        );

        Ok(SmoothReport {
            sweeps: cfg.n_sweeps,
            initial_residual,
            final_residual,
        })
    }

    fn flux_factor(&self, axis: Axis) -> f64 {
        self.config.beta * self.config.dxinv[axis.index()]
    }

    fn check_smoothing_fields(
        &self,
        phi: &Field3<f64>,
        rhs: &Field3<f64>,
        scratch: &Field3<f64>,
    ) -> Result<()> {
        require("phi", phi, &self.vbox.grow(1))?;
        require("rhs", rhs, &self.vbox)?;
        require("scratch", scratch, &self.vbox)
    }

    fn residual_norm(
        &self,
        execution: Execution,
        res: &mut Field3<f64>,
        rhs: &Field3<f64>,
        x: &Field3<f64>,
    ) -> f64 {
        self.residual_on(execution, res, rhs, x);
        norms::norm_l2(res, &self.vbox)
    }

    fn residual_on(
        &self,
        execution: Execution,
        res: &mut Field3<f64>,
        rhs: &Field3<f64>,
        x: &Field3<f64>,
    ) {
        let ALapConfig { alpha, beta, dxinv } = self.config;
        match execution {
            #[cfg(feature = "parallel")]
            Execution::Parallel => {
                kernels::residual_with(&Rayon, &self.vbox, res, rhs, x, self.a, dxinv, alpha, beta)
            }
            _ => {
                kernels::residual_with(&Serial, &self.vbox, res, rhs, x, self.a, dxinv, alpha, beta)
            }
        }
    }

    fn sweep_on(
        &self,
        execution: Execution,
        phi: &mut Field3<f64>,
        rhs: &Field3<f64>,
        color: Color,
        scratch: &mut Field3<f64>,
    ) {
        let vbox = &self.vbox;
        match execution {
            #[cfg(feature = "parallel")]
            Execution::Parallel => kernels::gsrb_with(
                &Rayon,
                vbox,
                phi,
                rhs,
                self.a,
                &self.coeffs,
                &self.bc,
                vbox,
                color,
                scratch,
            ),
            _ => {
                let _ = scratch;
                kernels::gsrb(vbox, phi, rhs, self.a, &self.coeffs, &self.bc, vbox, color)
            }
        }
    }
}

fn warn_on_serial_fallback(execution: Execution) {
    if cfg!(not(feature = "parallel")) && execution == Execution::Parallel {
        warn!("parallel execution requested without the `parallel` feature, running serially");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntVect3;

    fn vbox() -> IndexBox {
        IndexBox::from_size(IntVect3::ZERO, [4, 4, 4])
    }

    #[test]
    fn test_rejects_short_boundary_arrays() {
        let a = Field3::new(vbox(), 1.0);
        let bc = BoundaryData::new(vbox().grow(-1));
        let err = ALapPatch::new(ALapConfig::default(), vbox(), &a, bc.faces()).unwrap_err();
        assert!(matches!(err, AlapError::FieldTooSmall { ref field, .. } if field == "mask0"));
    }

    #[test]
    fn test_relax_rejects_bad_selector() {
        let a = Field3::new(vbox(), 1.0);
        let bc = BoundaryData::new(vbox());
        let patch = ALapPatch::from_data(ALapConfig::default(), &a, &bc).unwrap();
        let mut phi = Field3::new(vbox().grow(1), 0.0);
        let rhs = Field3::new(vbox(), 1.0);
        let mut scratch = Field3::new(vbox(), 0.0);

        let err = patch
            .relax(&mut phi, &rhs, 2, &mut scratch, Execution::Serial)
            .unwrap_err();
        assert_eq!(err, AlapError::InvalidColor(2));
        assert!(patch.relax(&mut phi, &rhs, 1, &mut scratch, Execution::Serial).is_ok());
    }

    #[test]
    fn test_smooth_requires_phi_halo() {
        let a = Field3::new(vbox(), 1.0);
        let bc = BoundaryData::new(vbox());
        let patch = ALapPatch::from_data(ALapConfig::default(), &a, &bc).unwrap();
        let mut phi = Field3::new(vbox(), 0.0);
        let rhs = Field3::new(vbox(), 1.0);
        let mut scratch = Field3::new(vbox(), 0.0);

        let err = patch
            .smooth(&mut phi, &rhs, &mut scratch, &SmootherConfig::default())
            .unwrap_err();
        assert!(matches!(err, AlapError::FieldTooSmall { ref field, .. } if field == "phi"));
    }

    #[test]
    fn test_smooth_reduces_residual() {
        let a = Field3::new(vbox(), 1.0);
        let bc = BoundaryData::new(vbox());
        let patch = ALapPatch::from_data(ALapConfig::default().with_alpha(1.0), &a, &bc).unwrap();
        let mut phi = Field3::new(vbox().grow(1), 0.0);
        let rhs = Field3::new(vbox(), 1.0);
        let mut scratch = Field3::new(vbox(), 0.0);

        let report = patch
            .smooth(&mut phi, &rhs, &mut scratch, &SmootherConfig::default().with_sweeps(3))
            .unwrap();
        assert_eq!(report.sweeps, 3);
        assert!(report.final_residual < report.initial_residual);
        assert!(report.reduction() < 1.0);
    }

    #[test]
    fn test_smooth_reports_non_finite_residual() {
        // alpha = 0 and an XLO coefficient of 6 cancel the whole diagonal on
        // the low x layer, so the first step there divides by zero
        let vbox = IndexBox::from_size(IntVect3::ZERO, [2, 2, 2]);
        let a = Field3::new(vbox, 0.0);
        let mut bc = BoundaryData::new(vbox);
        bc.set_uniform(Face::XLO, 1, 6.0);
        let patch = ALapPatch::from_data(ALapConfig::default(), &a, &bc).unwrap();
        assert_eq!(
            kernels::cell_diagonal(&patch.coeffs, &a, &patch.bc, &vbox, IntVect3::ZERO).corrected,
            0.0
        );

        let mut phi = Field3::new(vbox.grow(1), 0.0);
        let rhs = Field3::new(vbox, 1.0);
        let mut scratch = Field3::new(vbox, 0.0);
        let cfg = SmootherConfig::default();

        let err = patch.smooth(&mut phi, &rhs, &mut scratch, &cfg).unwrap_err();
        assert_eq!(err, AlapError::NonFiniteResidual { sweeps: cfg.n_sweeps });
    }

    #[test]
    fn test_relax_parallel_request_matches_serial() {
        let a = Field3::from_fn(vbox(), |p| 1.0 + 0.1 * p.x as f64);
        let mut bc = BoundaryData::new(vbox());
        bc.set_uniform(Face::ZHI, 1, 0.5);
        let patch = ALapPatch::from_data(ALapConfig::default().with_alpha(1.0), &a, &bc).unwrap();
        let rhs = Field3::from_fn(vbox(), |p| (p.y - p.z) as f64);
        let mut serial = Field3::new(vbox().grow(1), 0.25);
        let mut parallel = serial.clone();
        let mut scratch = Field3::new(vbox(), 0.0);

        for color in Color::SWEEP {
            let rb = color.redblack();
            patch.relax(&mut serial, &rhs, rb, &mut scratch, Execution::Serial).unwrap();
            patch.relax(&mut parallel, &rhs, rb, &mut scratch, Execution::Parallel).unwrap();
        }
        assert_eq!(norms::max_abs_diff(&serial, &parallel, serial.domain()), 0.0);
    }

    #[test]
    fn test_apply_on_rejects_tile_outside_valid_box() {
        let a = Field3::new(vbox(), 1.0);
        let bc = BoundaryData::new(vbox());
        let patch = ALapPatch::from_data(ALapConfig::default(), &a, &bc).unwrap();
        let x = Field3::new(vbox().grow(2), 1.0);
        let mut y = Field3::new(vbox().grow(1), 0.0);

        let tile = IndexBox::new(IntVect3::new(2, 0, 0), IntVect3::new(4, 1, 1));
        let err = patch.apply_on(&tile, &mut y, &x).unwrap_err();
        assert!(matches!(err, AlapError::BoxOutsideValid { .. }));

        let tile = IndexBox::new(IntVect3::new(2, 0, 0), IntVect3::new(3, 1, 1));
        patch.apply_on(&tile, &mut y, &x).unwrap();
        assert_eq!(y[(3, 1, 1)], 0.0);
    }

    #[test]
    fn test_flux_factor_uses_beta_dxinv() {
        let a = Field3::new(vbox(), 1.0);
        let bc = BoundaryData::new(vbox());
        let cfg = ALapConfig::new(0.0, 2.0, [1.0, 3.0, 0.5]);
        let patch = ALapPatch::from_data(cfg, &a, &bc).unwrap();
        assert_eq!(patch.flux_factor(Axis::X), 2.0);
        assert_eq!(patch.flux_factor(Axis::Y), 6.0);
        assert_eq!(patch.flux_factor(Axis::Z), 1.0);
    }
}
