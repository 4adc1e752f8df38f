//! Field registry
//!
//! Each model family declares its fields once: identifier, label, unit,
//! dimensionality and grid. Plot kinds declare which fields they need. The
//! resolver and the renderer read both and never hard-code field lists.
//!
//! # Organization
//!
//! - **fields**: `FieldId`, `FieldSpec`, `Shape`, `FieldRegistry`
//! - **plot_kind**: `PlotKind` and its per-family requirements

pub mod fields;
pub mod plot_kind;

pub use fields::{FieldId, FieldRegistry, FieldSpec, Shape};
pub use plot_kind::PlotKind;
