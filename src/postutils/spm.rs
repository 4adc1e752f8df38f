//! Plots of single-particle model (SPM) solutions
//!
//! The SPM lumps each electrode into one particle, so its space-resolved
//! fields are radial concentration profiles inside the particles.

use crate::error::PlotResult;
use crate::output::Figure;
use crate::registry::PlotKind;
use crate::solution::{ModelFamily, Solution};

use super::render;

/// Anode and cathode intercalation fractions vs time (1 × 2)
///
/// Samples outside `[0, 1]` are drawn as-is and marked with the flag colour.
pub fn intercalation(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Intercalation, sol)
}

/// One colour map per populated particle concentration field
///
/// # Errors
///
/// `UnsupportedPlot` when no space-time field is populated.
pub fn pixels(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Pixels, sol)
}

/// Anode, cathode and electrolyte potentials vs time (1 × 3)
pub fn potentials(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Potentials, sol)
}

/// External current density, titled with the delivered areal capacity
pub fn current(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Current, sol)
}

pub fn voltage(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Voltage, sol)
}

/// Power density `i_ext * V_cell`
pub fn power(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Power, sol)
}

/// Current, voltage and power side by side (1 × 3)
pub fn ivp(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::Spm, PlotKind::Ivp, sol)
}
