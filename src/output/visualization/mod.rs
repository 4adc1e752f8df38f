//! Visualization of post-processed solutions
//!
//! This module turns plot variables into figures and figures into pixels using
//! the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared figure configuration (`PlotConfig`)
//! - **colormap**: Colormaps and value scaling for pixel panels
//! - **figure**: Figure data model and layout policy (`PlotRenderer`)
//! - **render**: Drawing onto plotters backends (PNG, SVG, in-memory RGB)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use batpost::output::visualization::{PlotConfig, PlotRenderer};
//! use batpost::variables::VariableSet;
//!
//! let variables = VariableSet::extract(&resolved)?;
//! let figure = PlotRenderer::layout(&variables)?;
//! figure.save("pixels.svg", &PlotConfig::default())?;
//! ```
//!
//! # Panel Kinds
//!
//! | Panel | Data | Drawn as |
//! |-------|------|----------|
//! | `LinePanel` | one series vs time | line, flagged samples as dots |
//! | `PixelPanel` | `[time × space]` map | coloured cells + colour bar |

pub mod config;
pub mod colormap;
pub mod figure;
pub mod render;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use colormap::{ColorScale, Colormap};
pub use figure::{Figure, Layout, LinePanel, Panel, PanelContent, PixelPanel, PlotRenderer};
pub use render::RgbBuffer;
