//! Demo: P2D 1C discharge
//!
//! Builds a synthetic pseudo-two-dimensional discharge resolved across anode,
//! separator and cathode, then writes every available plot. A second pass
//! drops the electrolyte concentration to show how capability checks behave.
//!
//! ```bash
//! cargo run --example p2d_discharge
//! cargo run --example p2d_discharge -- plot.toml   # custom PlotConfig
//! ```
//!
//! Output goes to `batpost_out/p2d/`.

use batpost::postutils::{self, p2d};
use batpost::prelude::*;
use nalgebra::DMatrix;
use std::error::Error;
use std::fs;
use std::path::Path;

const N_TIME: usize = 91;
const N_AN: usize = 12;
const N_SEP: usize = 6;
const N_CA: usize = 12;
const L_AN: f64 = 85.0; // [um]
const L_SEP: f64 = 25.0;
const L_CA: f64 = 75.0;
const I_EXT: f64 = -25.0; // [A/m^2]

fn uniform(a: f64, b: f64, n: usize) -> Vec<f64> {
    (0..=n).map(|k| a + (b - a) * k as f64 / n as f64).collect()
}

fn build_solution(with_electrolyte: bool) -> Solution {
    let time: Vec<f64> = (0..N_TIME).map(|i| i as f64 * 40.0).collect();
    let tau: Vec<f64> = time.iter().map(|t| t / 3600.0).collect();

    let mut faces = uniform(0.0, L_AN, N_AN);
    faces.extend(uniform(L_AN, L_AN + L_SEP, N_SEP).into_iter().skip(1));
    faces.extend(uniform(L_AN + L_SEP, L_AN + L_SEP + L_CA, N_CA).into_iter().skip(1));
    let x: Vec<f64> = faces.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
    let x_an = x[..N_AN].to_vec();
    let x_ca = x[N_AN + N_SEP..].to_vec();
    let total = L_AN + L_SEP + L_CA;

    let on = |coords: &[f64], f: &dyn Fn(f64, f64) -> f64| {
        DMatrix::from_fn(N_TIME, coords.len(), |i, j| f(tau[i], coords[j]))
    };

    // Concentration polarization builds up over the first minutes
    let c_el = on(&x, &|s, x| 1.2 + 0.35 * (1.0 - (-s * 12.0).exp()) * (x / total - 0.5));
    let phi_el = on(&x, &|s, x| -0.1 - 0.03 * (1.0 - (-s * 12.0).exp()) * x / total);
    let i_el = on(&faces, &|_, x| {
        if x <= L_AN {
            I_EXT * x / L_AN
        } else if x <= L_AN + L_SEP {
            I_EXT
        } else {
            I_EXT * (total - x) / L_CA
        }
    });

    let mut builder = Solution::builder(ModelFamily::P2d, ExperimentKind::ConstantCurrent)
        .time(time.clone())
        .series(FieldId::AnodeIntercalation, tau.iter().map(|s| 0.78 - 0.5 * s).collect())
        .series(FieldId::CathodeIntercalation, tau.iter().map(|s| 0.42 + 0.46 * s).collect())
        .series(FieldId::AnodePotential, vec![0.0; N_TIME])
        .series(FieldId::CathodePotential, tau.iter().map(|s| 4.1 - 0.55 * s - 0.3 * s.powi(5)).collect())
        .series(FieldId::CurrentDensity, vec![I_EXT; N_TIME])
        .map(FieldId::ElectrolytePotentialProfile, phi_el)
        .map(FieldId::IonicCurrent, i_el)
        .map(FieldId::AnodeSurfaceConcentration, on(&x_an, &|s, x| 30.0 * (0.78 - 0.5 * s) - 0.02 * (L_AN - x)))
        .map(FieldId::AnodeSolidPotential, on(&x_an, &|_, x| -2e-4 * x))
        .map(FieldId::AnodeFaradaicCurrent, on(&x_an, &|_, x| 2e-6 * (1.0 + 2.0 * x / L_AN)))
        .map(FieldId::CathodeSurfaceConcentration, on(&x_ca, &|s, x| 49.0 * (0.42 + 0.46 * s) + 0.03 * (x - L_AN - L_SEP)))
        .map(FieldId::CathodeSolidPotential, on(&x_ca, &|s, x| 4.1 - 0.55 * s + 1e-4 * (x - total)))
        .map(FieldId::CathodeFaradaicCurrent, on(&x_ca, &|_, x| -2e-6 * (1.0 + 2.0 * (total - x) / L_CA)))
        .grid(GridId::Cell, SpatialGrid::new("x", "um", x.clone()).with_boundaries(vec![L_AN, L_AN + L_SEP]))
        .grid(GridId::CellFaces, SpatialGrid::new("x", "um", faces.clone()))
        .grid(GridId::Anode, SpatialGrid::new("x", "um", x_an.clone()))
        .grid(GridId::Cathode, SpatialGrid::new("x", "um", x_ca.clone()));

    if with_electrolyte {
        builder = builder.map(FieldId::ElectrolyteConcentration, c_el);
    }

    builder.build()
}

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = Path::new("batpost_out/p2d");
    fs::create_dir_all(out_dir)?;

    let config = match std::env::args().nth(1) {
        Some(path) => PlotConfig::from_toml_file(path)?,
        None => PlotConfig::default(),
    };

    // ── full solution ────────────────────────────────────────────────────────
    let sol = build_solution(true);
    println!("{}\n", sol);

    for kind in postutils::available_plots(&sol) {
        let path = out_dir.join(format!("{}.png", kind));
        postutils::plot_to_file(&sol, kind, &path, Some(&config))?;
        println!("  {:<14} → {}", kind.name(), path.display());
    }

    // ── without electrolyte concentration ────────────────────────────────────
    let partial = build_solution(false);
    match p2d::electrolyte(&partial) {
        Err(e) if e.is_unsupported() => println!("\n  skipped: {}", e),
        Err(e) => return Err(e.into()),
        Ok(_) => println!("\n  unexpected electrolyte figure"),
    }

    let figure = p2d::pixels(&partial)?;
    println!(
        "  pixels without c_el: {} panel(s) on a {}x{} grid",
        figure.panel_count(),
        figure.layout.rows,
        figure.layout.cols
    );

    Ok(())
}
