//! Field resolution and structural validation
//!
//! The resolver turns a `(family, plot kind, solution)` request into concrete
//! references to the fields the plot needs, or fails fast. It is pure: it
//! never copies data and never draws.
//!
//! # Check Order
//!
//! 1. The solution comes from the requested model family
//! 2. The family offers the plot kind
//! 3. The time axis is non-empty, finite and strictly increasing
//! 4. Every required field is populated (else `UnsupportedPlot`)
//! 5. Every required field has the registered shape, one sample per saved
//!    time, and (for maps) a strictly increasing grid of matching length
//!    (else `MalformedSolution`)
//!
//! Steps 4 and 5 run as two passes so that "not applicable" always wins over
//! "malformed" when both are true.
//!
//! # Example
//!
//! ```rust,ignore
//! use batpost::resolver::FieldResolver;
//!
//! let resolved = FieldResolver::new(ModelFamily::Spm, &sol).resolve(PlotKind::Potentials)?;
//! assert_eq!(resolved.fields.len(), 3);
//! ```

use crate::error::{PlotError, PlotResult};
use crate::registry::{FieldId, FieldRegistry, FieldSpec, PlotKind, Shape};
use crate::solution::grid::first_non_increasing;
use crate::solution::{FieldData, ModelFamily, Solution, SpatialGrid};

/// Key used for time-axis errors
pub const TIME_KEY: &str = "t";

// =================================================================================================
// Resolved references
// =================================================================================================

/// A validated field reference
#[derive(Debug, Clone, Copy)]
pub struct ResolvedField<'a> {
    pub spec: &'static FieldSpec,
    pub data: &'a FieldData,

    /// Spatial grid for map fields
    pub grid: Option<&'a SpatialGrid>,
}

/// Everything a plot needs, validated against the solution invariants
#[derive(Debug, Clone)]
pub struct ResolvedPlot<'a> {
    pub kind: PlotKind,
    pub family: ModelFamily,
    pub time: &'a [f64],

    /// Fields in requirement order (registry order for `Pixels`)
    pub fields: Vec<ResolvedField<'a>>,
}

impl<'a> ResolvedPlot<'a> {
    /// Reference to a resolved field
    pub fn get(&self, id: FieldId) -> Option<&ResolvedField<'a>> {
        self.fields.iter().find(|field| field.spec.id == id)
    }
}

// =================================================================================================
// Resolver
// =================================================================================================

/// Resolves plot requests against one solution for one model family
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    family: ModelFamily,
    registry: &'static FieldRegistry,
    solution: &'a Solution,
}

impl<'a> FieldResolver<'a> {
    /// Create a resolver for the given family
    ///
    /// The family is the one the caller *asked for* (i.e. which postutils
    /// module was used); a mismatch with the solution is reported by
    /// [`resolve`](Self::resolve).
    pub fn new(family: ModelFamily, solution: &'a Solution) -> Self {
        Self {
            family,
            registry: FieldRegistry::for_family(family),
            solution,
        }
    }

    /// Resolver for the solution's own family
    pub fn for_solution(solution: &'a Solution) -> Self {
        Self::new(solution.family(), solution)
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Resolve a plot request
    ///
    /// # Errors
    ///
    /// - `UnsupportedPlot` when the family mismatches, the family does not offer
    ///   the plot, or a required field is absent/empty
    /// - `MalformedSolution` when the time axis or a required field breaks a
    ///   structural invariant
    pub fn resolve(&self, kind: PlotKind) -> PlotResult<ResolvedPlot<'a>> {
        let solution = self.solution;

        if solution.family() != self.family {
            return Err(self.unsupported(
                kind,
                format!("solution was produced by the {} model", solution.family()),
            ));
        }

        let required = kind
            .required_fields(self.family)
            .ok_or_else(|| self.unsupported(kind, format!("not offered by the {} model family", self.family)))?;

        validate_time(solution.time())?;

        // Pass 1: applicability
        let specs: Vec<&'static FieldSpec> = if kind == PlotKind::Pixels {
            let populated: Vec<_> = self
                .registry
                .map_specs()
                .filter(|spec| solution.has_field(spec.id))
                .collect();
            if populated.is_empty() {
                return Err(self.unsupported(kind, "no space-time fields are populated"));
            }
            populated
        } else {
            let missing: Vec<&str> = required
                .iter()
                .filter(|id| !solution.has_field(**id))
                .map(|id| id.key())
                .collect();
            if !missing.is_empty() {
                return Err(self.unsupported(
                    kind,
                    format!("required field(s) absent or empty: {}", missing.join(", ")),
                ));
            }
            required
                .iter()
                .map(|id| {
                    self.registry.spec(*id).ok_or_else(|| {
                        self.unsupported(kind, format!("field '{}' is not registered", id.key()))
                    })
                })
                .collect::<PlotResult<_>>()?
        };

        // Pass 2: structure
        let fields = specs
            .into_iter()
            .map(|spec| self.check_field(spec))
            .collect::<PlotResult<Vec<_>>>()?;

        log::debug!(
            "resolved {} plot for {} solution: [{}]",
            kind,
            self.family,
            fields.iter().map(|f| f.spec.key()).collect::<Vec<_>>().join(", ")
        );

        Ok(ResolvedPlot {
            kind,
            family: self.family,
            time: solution.time(),
            fields,
        })
    }

    /// Plot kinds that currently resolve for this solution
    pub fn available(&self) -> Vec<PlotKind> {
        PlotKind::ALL
            .into_iter()
            .filter(|kind| self.resolve(*kind).is_ok())
            .collect()
    }

    fn check_field(&self, spec: &'static FieldSpec) -> PlotResult<ResolvedField<'a>> {
        let key = spec.key();
        let data = self
            .solution
            .field(spec.id)
            .ok_or_else(|| PlotError::malformed(key, "field vanished during resolution"))?;
        let n_time = self.solution.time().len();

        match (spec.shape, data) {
            (Shape::Series, FieldData::Series(_)) => {
                check_time_len(key, n_time, data.time_len())?;
                Ok(ResolvedField { spec, data, grid: None })
            }
            (Shape::Map(grid_id), FieldData::Map(_)) => {
                check_time_len(key, n_time, data.time_len())?;

                let grid = self.solution.grid(grid_id).ok_or_else(|| {
                    PlotError::malformed(key, format!("spatial grid '{}' is not defined", grid_id))
                })?;

                if grid.is_empty() {
                    return Err(PlotError::malformed(key, format!("spatial grid '{}' is empty", grid_id)));
                }
                if let Some(i) = grid.first_non_increasing() {
                    return Err(PlotError::malformed(
                        key,
                        format!("spatial grid '{}' is not strictly increasing at index {}", grid_id, i),
                    ));
                }
                if data.space_len() != grid.len() {
                    return Err(PlotError::malformed(
                        key,
                        format!(
                            "expected {} spatial points on grid '{}', found {}",
                            grid.len(),
                            grid_id,
                            data.space_len()
                        ),
                    ));
                }

                Ok(ResolvedField { spec, data, grid: Some(grid) })
            }
            (Shape::Map(_), FieldData::Ragged(_)) => {
                let (row, len, expected) = data.first_ragged_row().unwrap_or((0, 0, 0));
                Err(PlotError::malformed(
                    key,
                    format!("ragged map: row {} has {} values, row 0 has {}", row, len, expected),
                ))
            }
            (Shape::Series, other) => Err(PlotError::malformed(
                key,
                format!("expected a time series, found {}", other),
            )),
            (Shape::Map(_), other) => Err(PlotError::malformed(
                key,
                format!("expected a space-time map, found {}", other),
            )),
        }
    }

    fn unsupported(&self, kind: PlotKind, reason: impl Into<String>) -> PlotError {
        PlotError::unsupported(kind, self.family, self.solution.experiment(), reason)
    }
}

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Validate the shared time axis
fn validate_time(time: &[f64]) -> PlotResult<()> {
    if time.is_empty() {
        return Err(PlotError::malformed(TIME_KEY, "time axis is empty"));
    }
    if let Some(i) = first_non_increasing(time) {
        return Err(PlotError::malformed(
            TIME_KEY,
            format!("time axis is not finite and strictly increasing at index {}", i),
        ));
    }
    Ok(())
}

fn check_time_len(key: &str, expected: usize, found: usize) -> PlotResult<()> {
    if expected != found {
        return Err(PlotError::malformed(
            key,
            format!("expected {} time samples, found {}", expected, found),
        ));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
