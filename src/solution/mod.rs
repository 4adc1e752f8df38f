//! Simulation solutions
//!
//! This module defines the read-only input of the post-processing layer: the
//! result bundle handed over by an SPM or P2D simulation.
//!
//! # Core Concepts
//!
//! - **Solution**: saved times, populated fields, spatial grids, solver status
//! - **FieldData**: a time series or a `[time × space]` map
//! - **SpatialGrid**: coordinates (and region boundaries) of a map's space axis
//!
//! Solutions are never mutated by this crate and may be shared freely between
//! threads.

pub mod data;
pub mod grid;
pub mod bundle;

pub use data::FieldData;
pub use grid::{GridId, SpatialGrid};
pub use bundle::{
    ExperimentKind,
    ModelFamily,
    Solution,
    SolutionBuilder,
    SolverStatus, };
