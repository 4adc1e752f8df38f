//! batpost: Post-processing for battery simulation solutions
//!
//! Turns finished single-particle (SPM) and pseudo-two-dimensional (P2D)
//! battery simulation solutions into deterministic diagnostic figures:
//! intercalation fractions, potentials, electrolyte concentration, and
//! space-time "pixel" maps of every spatially resolved field.
//!
//! # Architecture
//!
//! batpost is built on two core principles:
//!
//! 1. **Capabilities, not probing**
//!    - A solution declares which fields it carries
//!    - A per-family registry declares what each field is (label, unit, grid)
//!    - Plot applicability is decided from those two, before any drawing
//!
//! 2. **Figures are values**
//!    - Every plot call returns a caller-owned [`output::Figure`]
//!    - Drawing, saving and rasterizing are explicit, repeatable steps
//!    - No global plotting state
//!
//! ```text
//! Solution ─► FieldResolver ─► VariableSet ─► PlotRenderer ─► Figure
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use batpost::prelude::*;
//!
//! # fn main() -> Result<(), PlotError> {
//! let t: Vec<f64> = (0..50).map(|i| i as f64 * 60.0).collect();
//!
//! // 1. Build (or receive) a solution
//! let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
//!     .time(t.clone())
//!     .series(FieldId::AnodePotential, t.iter().map(|t| 0.1 + 1e-5 * t).collect())
//!     .series(FieldId::CathodePotential, t.iter().map(|t| 4.1 - 1e-4 * t).collect())
//!     .series(FieldId::ElectrolytePotential, vec![-0.08; 50])
//!     .build();
//!
//! // 2. Ask for a plot
//! let figure = postutils::spm::potentials(&sol)?;
//! assert_eq!(figure.panel_count(), 3);
//!
//! // 3. Plots that do not apply fail with a typed error
//! assert!(postutils::spm::pixels(&sol).unwrap_err().is_unsupported());
//!
//! // 4. Draw when needed
//! // figure.save("potentials.png", &PlotConfig::default())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`solution`]: Simulation results (input)
//! - [`registry`]: Field declarations and plot requirements
//! - [`resolver`]: Plot applicability and structural validation
//! - [`variables`]: Plot-ready variables and derived quantities
//! - [`output`]: Figures, configuration and drawing
//! - [`postutils`]: SPM / P2D plotting entry points
//! - [`error`]: Error types

// Core modules
pub mod error;
pub mod solution;
pub mod registry;

pub mod resolver;
pub mod variables;
pub mod output;
pub mod postutils;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use batpost::prelude::*;
    //! ```
    pub use crate::error::{ConfigError,
                           PlotError,
                           PlotResult};
    pub use crate::solution::{ExperimentKind,
                              FieldData,
                              GridId,
                              ModelFamily,
                              Solution,
                              SolverStatus,
                              SpatialGrid};
    pub use crate::registry::{FieldId,
                              PlotKind};
    pub use crate::output::{Colormap,
                            Figure,
                            PlotConfig,
                            NO_TITLE};
    pub use crate::postutils;
}
