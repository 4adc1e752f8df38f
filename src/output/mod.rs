//! Output of post-processed solutions
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── visualization/      ← Figures and drawing
//!     ├── mod.rs
//!     ├── config.rs
//!     ├── colormap.rs
//!     ├── figure.rs
//!     └── render.rs
//! ```
//!
//! Figures are values: build one with the postutils entry points, then draw
//! it onto a plotters area, save it as PNG/SVG or rasterize it into memory.

pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    Colormap,
    Figure,
    IntoOptionalTitle,
    Layout,
    Panel,
    PanelContent,
    PlotConfig,
    PlotRenderer,
    RgbBuffer,
    NO_TITLE,
};
