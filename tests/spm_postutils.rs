//! Integration tests: SPM post-processing
//!
//! Resolution, extraction and layout of every SPM plot, run against synthetic
//! discharge solutions.

use batpost::output::{Layout, PanelContent};
use batpost::postutils::{self, spm};
use batpost::prelude::*;

mod common;
use common::{assert_malformed, assert_unsupported, spm_solution};

// =================================================================================================
// Applicable plots
// =================================================================================================

#[test]
fn test_every_spm_plot_yields_a_figure() {
    let sol = spm_solution(40, &[]);

    let cases: [(&str, PlotResult<Figure>, usize); 7] = [
        ("intercalation", spm::intercalation(&sol), 2),
        ("pixels", spm::pixels(&sol), 2),
        ("potentials", spm::potentials(&sol), 3),
        ("current", spm::current(&sol), 1),
        ("voltage", spm::voltage(&sol), 1),
        ("power", spm::power(&sol), 1),
        ("ivp", spm::ivp(&sol), 3),
    ];

    for (name, result, panels) in cases {
        let figure = result.unwrap_or_else(|e| panic!("{} failed: {}", name, e));
        assert_eq!(figure.panel_count(), panels, "{}", name);
        assert_eq!(figure.family, ModelFamily::Spm);
    }
}

#[test]
fn test_intercalation_layout_and_labels() {
    let sol = spm_solution(20, &[]);
    let figure = spm::intercalation(&sol).unwrap();

    assert_eq!(figure.layout, Layout::row(2));
    assert_eq!(figure.fields(), vec!["x_an", "x_ca"]);

    match &figure.panels[0].content {
        PanelContent::Line(line) => {
            assert_eq!(line.x_label, "t [s]");
            assert_eq!(line.y_label, "X_Li,an [-]");
            assert_eq!(line.x.len(), 20);
            assert!(line.flagged.is_empty());
        }
        other => panic!("expected a line panel, got {:?}", other),
    }
}

#[test]
fn test_potentials_use_distinct_colours() {
    let sol = spm_solution(20, &[]);
    let figure = spm::potentials(&sol).unwrap();

    let colours: Vec<usize> = figure
        .panels
        .iter()
        .filter_map(|p| match &p.content {
            PanelContent::Line(line) => Some(line.color_index),
            PanelContent::Pixel(_) => None,
        })
        .collect();
    assert_eq!(colours, vec![1, 2, 3]);
    assert_eq!(figure.fields(), vec!["phi_an", "phi_ca", "phi_el"]);
}

#[test]
fn test_pixels_follow_registry_order() {
    let sol = spm_solution(20, &[]);
    let figure = spm::pixels(&sol).unwrap();

    assert_eq!(figure.fields(), vec!["cs_an", "cs_ca"]);
    assert_eq!(figure.layout, Layout { rows: 1, cols: 2 });
    assert!(figure.panels.iter().all(|p| p.is_pixel()));

    match &figure.panels[0].content {
        PanelContent::Pixel(pixel) => {
            assert_eq!(pixel.x_label, "r [um]");
            assert_eq!(pixel.y_label, "t [s]");
            assert_eq!(pixel.x_edges.len(), 11);
            assert_eq!(pixel.t_edges.len(), 21);
            assert_eq!(pixel.values.shape(), (20, 10));
        }
        other => panic!("expected a pixel panel, got {:?}", other),
    }
}

#[test]
fn test_pixels_with_one_map() {
    let sol = spm_solution(20, &[FieldId::AnodeParticleConcentration]);
    let figure = spm::pixels(&sol).unwrap();
    assert_eq!(figure.fields(), vec!["cs_ca"]);
    assert_eq!(figure.layout, Layout { rows: 1, cols: 1 });
}

#[test]
fn test_out_of_range_intercalation_is_flagged_not_clamped() {
    let base = spm_solution(5, &[]);
    let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
        .time(base.time().to_vec())
        .series(FieldId::AnodeIntercalation, vec![0.9, 0.7, 0.5, 0.2, -0.02])
        .series(FieldId::CathodeIntercalation, vec![0.5, 0.7, 0.9, 1.01, 1.05])
        .build();

    let figure = spm::intercalation(&sol).unwrap();

    match (&figure.panels[0].content, &figure.panels[1].content) {
        (PanelContent::Line(an), PanelContent::Line(ca)) => {
            assert_eq!(an.flagged, vec![4]);
            assert_eq!(an.y[4], -0.02);
            assert_eq!(ca.flagged, vec![3, 4]);
            assert_eq!(ca.y[4], 1.05);
            assert!(ca.y_range.1 > 1.05);
        }
        other => panic!("expected two line panels, got {:?}", other),
    }
}

#[test]
fn test_current_title_reports_areal_capacity() {
    let sol = spm_solution(61, &[]);
    let figure = spm::current(&sol).unwrap();

    match &figure.panels[0].content {
        // 20 A/m^2 for 1 h
        PanelContent::Line(line) => assert!(line.title.contains("Q = 20.000 A·h/m^2"), "{}", line.title),
        other => panic!("expected a line panel, got {:?}", other),
    }
}

// =================================================================================================
// Failures
// =================================================================================================

#[test]
fn test_cc_solution_without_maps() {
    let sol = spm_solution(
        30,
        &[FieldId::AnodeParticleConcentration, FieldId::CathodeParticleConcentration],
    );

    assert!(spm::intercalation(&sol).is_ok());
    assert!(spm::potentials(&sol).is_ok());
    assert_unsupported(spm::pixels(&sol), "pixels without maps");
}

#[test]
fn test_missing_current_disables_current_plots() {
    let sol = spm_solution(10, &[FieldId::CurrentDensity]);

    assert_unsupported(spm::current(&sol), "current");
    assert_unsupported(spm::power(&sol), "power");
    assert_unsupported(spm::ivp(&sol), "ivp");
    assert!(spm::voltage(&sol).is_ok());
}

#[test]
fn test_electrolyte_is_not_an_spm_plot() {
    let sol = spm_solution(10, &[]);
    assert_unsupported(
        postutils::render(ModelFamily::Spm, PlotKind::Electrolyte, &sol),
        "electrolyte on SPM",
    );
}

#[test]
fn test_spm_plot_of_p2d_solution_is_unsupported() {
    let sol = common::p2d_solution(10, &[]);
    assert_unsupported(spm::intercalation(&sol), "SPM intercalation of a P2D solution");
}

#[test]
fn test_short_potential_is_malformed() {
    let base = spm_solution(10, &[]);
    let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
        .time(base.time().to_vec())
        .series(FieldId::AnodePotential, vec![0.1; 9])
        .series(FieldId::CathodePotential, vec![4.0; 10])
        .series(FieldId::ElectrolytePotential, vec![-0.1; 10])
        .build();

    assert_malformed(spm::potentials(&sol), "phi_an");
}

#[test]
fn test_all_nan_potential_is_a_render_error() {
    let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
        .time(vec![0.0, 1.0, 2.0])
        .series(FieldId::AnodePotential, vec![0.1; 3])
        .series(FieldId::CathodePotential, vec![f64::NAN; 3])
        .series(FieldId::ElectrolytePotential, vec![-0.1; 3])
        .build();

    match spm::potentials(&sol) {
        Err(PlotError::Render { plot, field, .. }) => {
            assert_eq!(plot, PlotKind::Potentials);
            assert_eq!(field, "phi_ca");
        }
        other => panic!("expected a Render error, got {:?}", other),
    }
}

#[test]
fn test_potential_range_beyond_f64_is_a_render_error() {
    let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
        .time(vec![0.0, 1.0, 2.0])
        .series(FieldId::AnodePotential, vec![0.1; 3])
        .series(FieldId::CathodePotential, vec![-1e308, 1e308, 0.0])
        .series(FieldId::ElectrolytePotential, vec![-0.1; 3])
        .build();

    match spm::potentials(&sol) {
        Err(PlotError::Render { field, reason, .. }) => {
            assert_eq!(field, "phi_ca");
            assert_eq!(reason, "value range is not representable");
        }
        other => panic!("expected a Render error, got {:?}", other),
    }
}

#[test]
fn test_ragged_particle_map_is_malformed() {
    let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
        .time(vec![0.0, 1.0])
        .field(
            FieldId::AnodeParticleConcentration,
            FieldData::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]),
        )
        .grid(GridId::AnodeParticle, SpatialGrid::new("r", "um", vec![0.0, 1.0]))
        .build();

    assert_malformed(spm::pixels(&sol), "cs_an");
}

// =================================================================================================
// Capability listing
// =================================================================================================

#[test]
fn test_available_plots_full_solution() {
    let sol = spm_solution(10, &[]);
    assert_eq!(
        postutils::available_plots(&sol),
        vec![
            PlotKind::Intercalation,
            PlotKind::Pixels,
            PlotKind::Potentials,
            PlotKind::Current,
            PlotKind::Voltage,
            PlotKind::Power,
            PlotKind::Ivp,
        ]
    );
}

#[test]
fn test_capabilities_follow_registry_order() {
    let sol = spm_solution(10, &[FieldId::ElectrolytePotential]);
    let keys: Vec<_> = sol.capabilities().iter().map(|id| id.key()).collect();
    assert_eq!(keys, vec!["x_an", "x_ca", "phi_an", "phi_ca", "i_ext", "cs_an", "cs_ca"]);
}
