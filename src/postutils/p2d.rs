//! Plots of pseudo-two-dimensional model (P2D) solutions
//!
//! The P2D resolves the cell thickness: electrolyte fields live on the full
//! cell grid (with separator boundaries), solid-phase fields on the anode and
//! cathode grids.

use crate::error::PlotResult;
use crate::output::Figure;
use crate::registry::PlotKind;
use crate::solution::{ModelFamily, Solution};

use super::render;

/// Electrolyte Li-ion concentration across the cell over time (1 × 1)
///
/// Separator interfaces from the cell grid are drawn as vertical markers.
pub fn electrolyte(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Electrolyte, sol)
}

/// Anode and cathode intercalation fractions vs time (1 × 2)
pub fn intercalation(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Intercalation, sol)
}

/// One colour map per populated space-time field, in registry order
///
/// # Errors
///
/// `UnsupportedPlot` when no space-time field is populated.
pub fn pixels(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Pixels, sol)
}

/// Terminal potentials (row 0) and electrolyte/solid potential maps (row 1)
pub fn potentials(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Potentials, sol)
}

pub fn current(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Current, sol)
}

pub fn voltage(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Voltage, sol)
}

pub fn power(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Power, sol)
}

/// Current, voltage and power side by side (1 × 3)
pub fn ivp(sol: &Solution) -> PlotResult<Figure> {
    render(ModelFamily::P2d, PlotKind::Ivp, sol)
}
