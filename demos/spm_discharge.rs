//! Demo: SPM 1C discharge
//!
//! Builds a synthetic single-particle discharge (what a simulation layer would
//! hand over), lists the plots it supports and writes each of them as PNG.
//!
//! ```bash
//! cargo run --example spm_discharge
//! ```
//!
//! Output goes to `batpost_out/spm/`.

use batpost::postutils::{self, spm};
use batpost::prelude::*;
use nalgebra::DMatrix;
use std::error::Error;
use std::fs;
use std::path::Path;

const N_TIME: usize = 121;
const N_R: usize = 15;
const I_EXT: f64 = -18.0; // [A/m^2]

fn build_solution() -> Solution {
    let time: Vec<f64> = (0..N_TIME).map(|i| i as f64 * 30.0).collect();
    let tau: Vec<f64> = time.iter().map(|t| t / 3600.0).collect();

    let r_an: Vec<f64> = (0..N_R).map(|j| 8.0 * j as f64 / (N_R - 1) as f64).collect();
    let r_ca: Vec<f64> = (0..N_R).map(|j| 4.0 * j as f64 / (N_R - 1) as f64).collect();

    // Surface depletes first: deviation grows with r^2 and with time
    let cs_an = DMatrix::from_fn(N_TIME, N_R, |i, j| {
        let depth = (r_an[j] / 8.0).powi(2);
        30.0 * (0.8 - 0.55 * tau[i] - 0.05 * depth * (1.0 - (-tau[i] * 20.0).exp()))
    });
    let cs_ca = DMatrix::from_fn(N_TIME, N_R, |i, j| {
        let depth = (r_ca[j] / 4.0).powi(2);
        49.0 * (0.45 + 0.45 * tau[i] + 0.04 * depth * (1.0 - (-tau[i] * 20.0).exp()))
    });

    Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
        .time(time.clone())
        .series(FieldId::AnodeIntercalation, tau.iter().map(|s| 0.8 - 0.55 * s).collect())
        .series(FieldId::CathodeIntercalation, tau.iter().map(|s| 0.45 + 0.45 * s).collect())
        .series(FieldId::AnodePotential, tau.iter().map(|s| 0.08 + 0.12 * s).collect())
        .series(
            FieldId::CathodePotential,
            tau.iter().map(|s| 4.15 - 0.6 * s - 0.4 * s.powi(6)).collect(),
        )
        .series(FieldId::ElectrolytePotential, tau.iter().map(|s| -0.07 - 0.01 * s).collect())
        .series(FieldId::CurrentDensity, vec![I_EXT; N_TIME])
        .map(FieldId::AnodeParticleConcentration, cs_an)
        .map(FieldId::CathodeParticleConcentration, cs_ca)
        .grid(GridId::AnodeParticle, SpatialGrid::new("r", "um", r_an))
        .grid(GridId::CathodeParticle, SpatialGrid::new("r", "um", r_ca))
        .status(SolverStatus {
            success: true,
            onroot: false,
            message: "Successful function return.".to_string(),
            solve_time_s: 0.42,
        })
        .build()
}

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = Path::new("batpost_out/spm");
    fs::create_dir_all(out_dir)?;

    let sol = build_solution();
    println!("{}\n", sol);

    let config = PlotConfig::titled("SPM, constant-current discharge");

    for kind in postutils::available_plots(&sol) {
        let path = out_dir.join(format!("{}.png", kind));
        postutils::plot_to_file(&sol, kind, &path, Some(&config))?;
        println!("  {:<14} → {}", kind.name(), path.display());
    }

    // Plots that do not apply come back as typed errors
    match postutils::render(ModelFamily::Spm, PlotKind::Electrolyte, &sol) {
        Err(e) if e.is_unsupported() => println!("\n  skipped: {}", e),
        Err(e) => return Err(e.into()),
        Ok(_) => println!("\n  unexpected electrolyte figure"),
    }

    // A jet-coloured copy of the particle maps
    let mut jet = PlotConfig::default();
    jet.colormap = Colormap::Jet;
    spm::pixels(&sol)?.save(out_dir.join("pixels_jet.svg"), &jet)?;

    Ok(())
}
