//! Relax a Helmholtz problem with homogeneous Dirichlet walls.
//!
//! The walls sit on the faces of the valid box. Ghost values are eliminated
//! as `phi_ghost = c * phi_boundary` with `c = -1` on every face, which the
//! smoother sees through the same per-face coefficient.
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --example poisson_relax
//! RUST_LOG=info cargo run --release --features parallel --example poisson_relax
//! ```

use std::f64::consts::PI;
use std::time::Instant;

use alap_rs::field::norms;
use alap_rs::{
    ALapConfig, ALapPatch, BoundaryData, Color, Execution, FaceArray, Field3, IndexBox, IntVect3,
};

const N: usize = 32;
const SWEEPS: usize = 1000;
const REPORT_EVERY: usize = 100;

/// Refresh every ghost layer as `walls[face]` times the boundary layer.
fn fill_wall_ghosts(phi: &mut Field3<f64>, vbox: &IndexBox, walls: &FaceArray<f64>) {
    for (face, &c) in walls.iter() {
        let inward = -face.outward();
        for g in face.ghost_plane(vbox).cells() {
            phi[g] = c * phi[g + inward];
        }
    }
}

fn main() -> alap_rs::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let vbox = IndexBox::from_size(IntVect3::ZERO, [N, N, N]);
    let h = 1.0 / N as f64;
    let centre = |i: i32| (i as f64 + 0.5) * h;

    let config = ALapConfig::uniform_spacing(1.0, 1.0, h);
    let execution = if cfg!(feature = "parallel") {
        Execution::Parallel
    } else {
        Execution::Serial
    };

    // Homogeneous Dirichlet on every wall
    let walls = FaceArray::uniform(-1.0);
    let mut bc = BoundaryData::new(vbox);
    for (face, &c) in walls.iter() {
        bc.set_uniform(face, 1, c);
    }
    let a = Field3::new(vbox, 1.0);
    let patch = ALapPatch::from_data(config, &a, &bc)?;

    // Smooth source: product of half-waves vanishing on the walls
    let rhs = Field3::from_fn(vbox, |p| {
        (PI * centre(p.x)).sin() * (PI * centre(p.y)).sin() * (PI * centre(p.z)).sin()
    });

    let mut phi = Field3::new(vbox.grow(1), 0.0);
    let mut res = Field3::new(vbox, 0.0);
    let mut scratch = Field3::new(vbox, 0.0);

    patch.residual(&mut res, &rhs, &phi)?;
    let r0 = norms::norm_l2(&res, &vbox);
    log::info!("{}^3 cells, {:?} execution, initial residual {:.4e}", N, execution, r0);

    let start = Instant::now();
    for sweep in 1..=SWEEPS {
        for color in Color::SWEEP {
            patch.relax(&mut phi, &rhs, color.redblack(), &mut scratch, execution)?;
            fill_wall_ghosts(&mut phi, &vbox, &walls);
        }

        if sweep % REPORT_EVERY == 0 {
            patch.residual(&mut res, &rhs, &phi)?;
            let r = norms::norm_l2(&res, &vbox);
            let mean = norms::sum(&phi, &vbox) / vbox.num_cells() as f64;
            log::info!(
                "sweep {:4}: residual {:.4e} (reduction {:.3e}), mean phi {:.6e}",
                sweep,
                r,
                r / r0,
                mean
            );
        }
    }
    let elapsed = start.elapsed();

    // Continuous solution of (1 + 3*pi^2) u = f for the same source
    let scale = 1.0 / (1.0 + 3.0 * PI * PI);
    let mut max_err: f64 = 0.0;
    for p in vbox.cells() {
        max_err = max_err.max((phi[p] - scale * rhs[p]).abs());
    }

    log::info!(
        "{} sweeps in {:.2?}, max deviation from continuous solution {:.3e}",
        SWEEPS,
        elapsed,
        max_err
    );

    Ok(())
}
