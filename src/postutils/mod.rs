//! Post-processing entry points
//!
//! One module per model family, both backed by the same pipeline:
//!
//! ```text
//! Solution ─► FieldResolver ─► VariableSet ─► PlotRenderer ─► Figure
//! ```
//!
//! | Module | Plots |
//! |--------|-------|
//! | [`spm`] | intercalation, pixels, potentials, current, voltage, power, ivp |
//! | [`p2d`] | electrolyte, intercalation, pixels, potentials, current, voltage, power, ivp |
//!
//! Every function returns a caller-owned [`Figure`] or a typed [`PlotError`];
//! nothing is drawn until the caller asks for it.
//!
//! # Example
//!
//! ```rust,ignore
//! use batpost::postutils::{self, spm};
//!
//! for kind in postutils::available_plots(&sol) {
//!     postutils::plot_to_file(&sol, kind, format!("{}.png", kind), None)?;
//! }
//!
//! match spm::pixels(&sol) {
//!     Ok(figure) => figure.save("pixels.png", &PlotConfig::default())?,
//!     Err(e) if e.is_unsupported() => println!("skipped: {}", e),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! [`PlotError`]: crate::error::PlotError

pub mod spm;
pub mod p2d;

use std::path::Path;

use crate::error::PlotResult;
use crate::output::{Figure, PlotConfig, PlotRenderer};
use crate::registry::PlotKind;
use crate::resolver::FieldResolver;
use crate::solution::{ModelFamily, Solution};
use crate::variables::VariableSet;

/// Build the figure of a plot request
///
/// # Errors
///
/// - `UnsupportedPlot` if the plot does not apply to the solution
/// - `MalformedSolution` if a required field breaks a structural invariant
/// - `Render` if a variable has nothing finite to draw
pub fn render(family: ModelFamily, kind: PlotKind, sol: &Solution) -> PlotResult<Figure> {
    let resolved = FieldResolver::new(family, sol).resolve(kind)?;
    let variables = VariableSet::extract(&resolved)?;
    PlotRenderer::layout(&variables)
}

/// Plot kinds that currently apply to a solution, in `PlotKind::ALL` order
pub fn available_plots(sol: &Solution) -> Vec<PlotKind> {
    FieldResolver::for_solution(sol).available()
}

/// Build a plot for the solution's own family and save it
///
/// `.svg` → vector output, anything else → bitmap. `None` uses the default
/// configuration.
pub fn plot_to_file<P: AsRef<Path>>(
    sol: &Solution,
    kind: PlotKind,
    path: P,
    config: Option<&PlotConfig>,
) -> PlotResult<()> {
    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    render(sol.family(), kind, sol)?.save(path, config)
}
