//! Synthetic SPM / P2D solutions
//!
//! Smooth, physically plausible shapes for a 1 h constant-current discharge.
//! Every fixture accepts a list of fields to leave out so that tests can build
//! partial solutions.

use batpost::prelude::*;
use nalgebra::DMatrix;

/// Anode, separator and cathode control volumes of the P2D fixture
pub const P2D_CELLS: (usize, usize, usize) = (8, 4, 8);

/// Applied current density [A/m^2] (negative = discharge)
const I_EXT: f64 = -20.0;

/// `n` evenly spaced points on `[a, b]`
pub fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![a],
        _ => (0..n)
            .map(|i| a + (b - a) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

fn series(time: &[f64], f: impl Fn(f64) -> f64) -> FieldData {
    FieldData::from_vec(time.iter().map(|&t| f(t)).collect())
}

fn map(time: &[f64], x: &[f64], f: impl Fn(f64, f64) -> f64) -> FieldData {
    FieldData::from_matrix(DMatrix::from_fn(time.len(), x.len(), |i, j| f(time[i], x[j])))
}

fn assemble(
    family: ModelFamily,
    time: Vec<f64>,
    fields: Vec<(FieldId, FieldData)>,
    grids: Vec<(GridId, SpatialGrid)>,
    skip: &[FieldId],
) -> Solution {
    let mut builder = Solution::builder(family, ExperimentKind::ConstantCurrent)
        .time(time)
        .status(SolverStatus {
            success: true,
            onroot: false,
            message: "Successful function return.".to_string(),
            solve_time_s: 0.25,
        });

    for (id, data) in fields {
        if !skip.contains(&id) {
            builder = builder.field(id, data);
        }
    }
    for (id, grid) in grids {
        builder = builder.grid(id, grid);
    }

    builder.build()
}

/// SPM discharge with `n` saved times and both particle maps
pub fn spm_solution(n: usize, skip: &[FieldId]) -> Solution {
    let time = linspace(0.0, 3600.0, n);
    let r_an = linspace(0.0, 8.0, 10);
    let r_ca = linspace(0.0, 4.0, 8);
    let tau = |t: f64| t / 3600.0;

    let fields = vec![
        (FieldId::AnodeIntercalation, series(&time, |t| 0.8 - 0.6 * tau(t))),
        (FieldId::CathodeIntercalation, series(&time, |t| 0.4 + 0.5 * tau(t))),
        (FieldId::AnodePotential, series(&time, |t| 0.1 + 0.15 * tau(t))),
        (FieldId::CathodePotential, series(&time, |t| 4.15 - 0.8 * tau(t) - 0.2 * tau(t).powi(4))),
        (FieldId::ElectrolytePotential, series(&time, |t| -0.08 - 0.01 * tau(t))),
        (FieldId::CurrentDensity, series(&time, |_| I_EXT)),
        (
            FieldId::AnodeParticleConcentration,
            map(&time, &r_an, |t, r| 24.0 * (0.8 - 0.6 * tau(t) * (0.6 + 0.05 * r))),
        ),
        (
            FieldId::CathodeParticleConcentration,
            map(&time, &r_ca, |t, r| 49.0 * (0.4 + 0.5 * tau(t) * (0.7 + 0.08 * r))),
        ),
    ];

    let grids = vec![
        (GridId::AnodeParticle, SpatialGrid::new("r", "um", r_an)),
        (GridId::CathodeParticle, SpatialGrid::new("r", "um", r_ca)),
    ];

    assemble(ModelFamily::Spm, time, fields, grids, skip)
}

/// P2D discharge with `n` saved times and every registered map
pub fn p2d_solution(n: usize, skip: &[FieldId]) -> Solution {
    let (n_an, n_sep, n_ca) = P2D_CELLS;
    let (l_an, l_sep, l_ca) = (80.0, 20.0, 80.0);

    let time = linspace(0.0, 3600.0, n);
    let tau = |t: f64| t / 3600.0;

    // Control-volume faces and centres across the cell
    let mut faces = linspace(0.0, l_an, n_an + 1);
    faces.extend(linspace(l_an, l_an + l_sep, n_sep + 1).into_iter().skip(1));
    faces.extend(linspace(l_an + l_sep, l_an + l_sep + l_ca, n_ca + 1).into_iter().skip(1));
    let centres: Vec<f64> = faces.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();

    let x_an = centres[..n_an].to_vec();
    let x_ca = centres[n_an + n_sep..].to_vec();
    let boundaries = vec![l_an, l_an + l_sep];
    let total = l_an + l_sep + l_ca;

    let fields = vec![
        (FieldId::AnodeIntercalation, series(&time, |t| 0.8 - 0.6 * tau(t))),
        (FieldId::CathodeIntercalation, series(&time, |t| 0.4 + 0.5 * tau(t))),
        (FieldId::AnodePotential, series(&time, |_| 0.0)),
        (FieldId::CathodePotential, series(&time, |t| 4.1 - 0.9 * tau(t))),
        (FieldId::CurrentDensity, series(&time, |_| I_EXT)),
        (
            FieldId::ElectrolyteConcentration,
            map(&time, &centres, |t, x| 1.2 + 0.3 * (1.0 - (-t / 600.0).exp()) * (x / total - 0.5)),
        ),
        (
            FieldId::ElectrolytePotentialProfile,
            map(&time, &centres, |t, x| -0.1 - 0.02 * tau(t) * x / total),
        ),
        (FieldId::IonicCurrent, map(&time, &faces, |_, x| I_EXT * (1.0 - ((x - 90.0) / 90.0).powi(2)))),
        (FieldId::AnodeSurfaceConcentration, map(&time, &x_an, |t, x| 24.0 * (0.8 - 0.6 * tau(t)) + 0.01 * x)),
        (FieldId::AnodeSolidPotential, map(&time, &x_an, |_, x| -1e-4 * x)),
        (FieldId::AnodeFaradaicCurrent, map(&time, &x_an, |_, x| 1e-6 * (1.0 + x / l_an))),
        (
            FieldId::CathodeSurfaceConcentration,
            map(&time, &x_ca, |t, x| 49.0 * (0.4 + 0.5 * tau(t)) - 0.01 * x),
        ),
        (FieldId::CathodeSolidPotential, map(&time, &x_ca, |t, x| 4.1 - 0.9 * tau(t) + 1e-4 * x)),
        (FieldId::CathodeFaradaicCurrent, map(&time, &x_ca, |_, x| -1e-6 * x / total)),
    ];

    let grids = vec![
        (GridId::Cell, SpatialGrid::new("x", "um", centres).with_boundaries(boundaries)),
        (GridId::CellFaces, SpatialGrid::new("x", "um", faces)),
        (GridId::Anode, SpatialGrid::new("x", "um", x_an)),
        (GridId::Cathode, SpatialGrid::new("x", "um", x_ca)),
    ];

    assemble(ModelFamily::P2d, time, fields, grids, skip)
}
