//! Solution bundle
//!
//! A `Solution` is the immutable result of running one model family for one
//! experiment. It is produced by an external simulation layer and consumed
//! read-only by the post-processing pipeline.
//!
//! # Capability Descriptor
//!
//! Which plots apply to a solution is decided by *which fields are populated*,
//! not by probing for attributes at call time. [`Solution::capabilities`]
//! returns that set in registry declaration order.
//!
//! # Example
//!
//! ```rust
//! use batpost::prelude::*;
//!
//! let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
//!     .time(vec![0.0, 10.0, 20.0])
//!     .series(FieldId::AnodeIntercalation, vec![0.8, 0.7, 0.6])
//!     .series(FieldId::CathodeIntercalation, vec![0.4, 0.5, 0.6])
//!     .build();
//!
//! assert_eq!(
//!     sol.capabilities(),
//!     vec![FieldId::AnodeIntercalation, FieldId::CathodeIntercalation]
//! );
//! ```

use nalgebra::DMatrix;
use std::collections::BTreeMap;
use std::fmt;

use super::data::FieldData;
use super::grid::{GridId, SpatialGrid};
use crate::registry::{FieldId, FieldRegistry};

// =================================================================================================
// Model family and experiment
// =================================================================================================

/// Model family that produced a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Single-particle model (lumped, one particle per electrode)
    Spm,

    /// Pseudo-two-dimensional model (resolved across electrode thickness)
    P2d,
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFamily::Spm => write!(f, "SPM"),
            ModelFamily::P2d => write!(f, "P2D"),
        }
    }
}

/// Simulated scenario
///
/// Informational: plot availability follows populated fields, the experiment
/// is reported in error messages and figure titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperimentKind {
    /// Constant current (galvanostatic) charge or discharge
    ConstantCurrent,

    /// Constant voltage (potentiostatic) hold
    ConstantVoltage,

    /// Constant power draw
    ConstantPower,

    /// Any other scenario
    Custom(&'static str),
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentKind::ConstantCurrent => write!(f, "constant current"),
            ExperimentKind::ConstantVoltage => write!(f, "constant voltage"),
            ExperimentKind::ConstantPower => write!(f, "constant power"),
            ExperimentKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Exit information reported by the solver that produced the solution
#[derive(Debug, Clone, PartialEq)]
pub struct SolverStatus {
    /// Overall exit status
    pub success: bool,

    /// Exit triggered by a root (event) function
    pub onroot: bool,

    /// Solver exit message
    pub message: String,

    /// Integration wall time [s]
    pub solve_time_s: f64,
}

// =================================================================================================
// Solution
// =================================================================================================

/// Immutable simulation result bundle
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    family: ModelFamily,
    experiment: ExperimentKind,
    time: Vec<f64>,
    fields: BTreeMap<FieldId, FieldData>,
    grids: BTreeMap<GridId, SpatialGrid>,
    status: Option<SolverStatus>,
}

impl Solution {
    /// Start building a solution for a model family and experiment
    pub fn builder(family: ModelFamily, experiment: ExperimentKind) -> SolutionBuilder {
        SolutionBuilder {
            solution: Solution {
                family,
                experiment,
                time: Vec::new(),
                fields: BTreeMap::new(),
                grids: BTreeMap::new(),
                status: None,
            },
        }
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub fn experiment(&self) -> ExperimentKind {
        self.experiment
    }

    /// Saved solution times [s]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Raw field lookup (may be empty)
    pub fn field(&self, id: FieldId) -> Option<&FieldData> {
        self.fields.get(&id)
    }

    /// `true` when the field is present and holds at least one value
    pub fn has_field(&self, id: FieldId) -> bool {
        self.fields.get(&id).is_some_and(|data| !data.is_empty())
    }

    pub fn grid(&self, id: GridId) -> Option<&SpatialGrid> {
        self.grids.get(&id)
    }

    pub fn status(&self) -> Option<&SolverStatus> {
        self.status.as_ref()
    }

    /// Populated fields known to this family's registry, in declaration order
    pub fn capabilities(&self) -> Vec<FieldId> {
        FieldRegistry::for_family(self.family)
            .specs()
            .iter()
            .map(|spec| spec.id)
            .filter(|id| self.has_field(*id))
            .collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution(family = {},", self.family)?;
        writeln!(f, "         experiment = {},", self.experiment)?;
        writeln!(f, "         samples = {},", self.time.len())?;

        let fields = self
            .capabilities()
            .iter()
            .map(|id| id.key())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "         fields = [{}]", fields)?;

        match &self.status {
            Some(status) => write!(
                f,
                ",\n         success = {},\n         onroot = {},\n         message = {},\n         solvetime = {:.3} s)",
                status.success, status.onroot, status.message, status.solve_time_s
            ),
            None => write!(f, ")"),
        }
    }
}

// =================================================================================================
// Builder
// =================================================================================================

/// Builder for [`Solution`]
///
/// The builder performs no validation: structural checks belong to the
/// resolver, which reports them as `MalformedSolution` at plot time.
#[derive(Debug, Clone)]
pub struct SolutionBuilder {
    solution: Solution,
}

impl SolutionBuilder {
    /// Set the saved times [s]
    pub fn time(mut self, time: Vec<f64>) -> Self {
        self.solution.time = time;
        self
    }

    /// Insert a field of any shape
    pub fn field(mut self, id: FieldId, data: impl Into<FieldData>) -> Self {
        self.solution.fields.insert(id, data.into());
        self
    }

    /// Insert a time series
    pub fn series(self, id: FieldId, values: Vec<f64>) -> Self {
        self.field(id, FieldData::from_vec(values))
    }

    /// Insert a `[time × space]` map
    pub fn map(self, id: FieldId, values: DMatrix<f64>) -> Self {
        self.field(id, FieldData::from_matrix(values))
    }

    /// Register a spatial grid
    pub fn grid(mut self, id: GridId, grid: SpatialGrid) -> Self {
        self.solution.grids.insert(id, grid);
        self
    }

    /// Attach solver exit information
    pub fn status(mut self, status: SolverStatus) -> Self {
        self.solution.status = Some(status);
        self
    }

    pub fn build(self) -> Solution {
        self.solution
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn spm() -> Solution {
        Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
            .time(vec![0.0, 1.0])
            .series(FieldId::CathodeIntercalation, vec![0.4, 0.5])
            .series(FieldId::AnodeIntercalation, vec![0.8, 0.7])
            .series(FieldId::CurrentDensity, vec![])
            .build()
    }

    #[test]
    fn test_family_and_experiment_are_fixed() {
        let sol = spm();
        assert_eq!(sol.family(), ModelFamily::Spm);
        assert_eq!(sol.experiment(), ExperimentKind::ConstantCurrent);
    }

    #[test]
    fn test_empty_field_is_not_a_capability() {
        let sol = spm();
        assert!(sol.field(FieldId::CurrentDensity).is_some());
        assert!(!sol.has_field(FieldId::CurrentDensity));
    }

    #[test]
    fn test_capabilities_follow_registry_order() {
        let sol = spm();
        assert_eq!(
            sol.capabilities(),
            vec![FieldId::AnodeIntercalation, FieldId::CathodeIntercalation]
        );
    }

    #[test]
    fn test_fields_of_other_family_are_not_capabilities() {
        let sol = Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
            .time(vec![0.0])
            .map(FieldId::ElectrolyteConcentration, DMatrix::zeros(1, 3))
            .build();
        assert!(sol.capabilities().is_empty());
    }

    #[test]
    fn test_display_report() {
        let sol = Solution::builder(ModelFamily::P2d, ExperimentKind::ConstantVoltage)
            .time(vec![0.0, 1.0, 2.0])
            .status(SolverStatus {
                success: true,
                onroot: false,
                message: "Successful function return.".to_string(),
                solve_time_s: 1.5,
            })
            .build();
        let report = sol.to_string();
        assert!(report.contains("family = P2D"));
        assert!(report.contains("experiment = constant voltage"));
        assert!(report.contains("samples = 3"));
        assert!(report.contains("solvetime = 1.500 s"));
    }

    #[test]
    fn test_experiment_display() {
        assert_eq!(ExperimentKind::ConstantPower.to_string(), "constant power");
        assert_eq!(ExperimentKind::Custom("GITT").to_string(), "GITT");
    }
}
