//! Plot variables
//!
//! Turns a [`ResolvedPlot`] into owned, plot-ready variables: time series with
//! their axis labels and flagged samples, and space-time maps with the cell
//! edges needed to draw them on a regular lattice.
//!
//! Time is always in seconds. Spatial coordinates keep the symbol and unit
//! declared by the grid; nothing is rescaled.
//!
//! # Derived Quantities
//!
//! | Quantity | Definition | Unit |
//! |----------|------------|------|
//! | power density | $p = i_{ext} \cdot V_{cell}$ | W/m^2 |
//! | areal capacity | $Q(t) = \left\| \int_0^t i_{ext}\, dt' \right\| / 3600$ | A·h/m^2 |

use nalgebra::DMatrix;

use crate::error::{PlotError, PlotResult};
use crate::registry::{FieldId, FieldSpec, PlotKind};
use crate::resolver::{ResolvedField, ResolvedPlot};
use crate::solution::ModelFamily;

/// Seconds per hour
const SECONDS_PER_HOUR: f64 = 3600.0;

// =================================================================================================
// Time series
// =================================================================================================

/// One value per saved time
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    /// Machine key of the source (or derived) field
    pub key: &'static str,

    /// Panel title
    pub title: String,

    /// Value-axis label, e.g. `phi_an [V]`
    pub axis_label: String,

    pub values: Vec<f64>,

    /// Conventional range; samples outside it are flagged, not clamped
    pub expected_range: Option<(f64, f64)>,
}

impl TimeSeries {
    fn from_spec(spec: &FieldSpec, values: Vec<f64>) -> Self {
        Self {
            key: spec.key(),
            title: spec.title.to_string(),
            axis_label: spec.axis_label(),
            values,
            expected_range: spec.expected_range,
        }
    }

    /// Indices of finite samples outside the expected range
    pub fn flagged(&self) -> Vec<usize> {
        match self.expected_range {
            Some((lo, hi)) => self
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite() && (**v < lo || **v > hi))
                .map(|(i, _)| i)
                .collect(),
            None => Vec::new(),
        }
    }

    /// `(min, max)` over finite samples, `None` if there is none
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        finite_min_max(self.values.iter().copied())
    }
}

// =================================================================================================
// Space-time maps
// =================================================================================================

/// `[time × space]` values with the lattice needed to draw them
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialMap {
    pub key: &'static str,
    pub title: String,

    /// Colour-bar label, e.g. `C_Li+ [kmol/m^3]`
    pub value_label: String,

    /// Spatial axis label, e.g. `x [um]`
    pub x_label: String,

    /// Spatial coordinates (cell centres)
    pub x: Vec<f64>,

    /// `x.len() + 1` cell edges along space
    pub x_edges: Vec<f64>,

    /// `n_time + 1` cell edges along time
    pub t_edges: Vec<f64>,

    /// Rows = time, columns = space
    pub values: DMatrix<f64>,

    /// Region boundaries drawn as vertical markers
    pub boundaries: Vec<f64>,
}

impl SpatialMap {
    /// `(min, max)` over finite cells, `None` if there is none
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        finite_min_max(self.values.iter().copied())
    }

    /// Number of non-finite cells
    pub fn non_finite_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_finite()).count()
    }
}

// =================================================================================================
// Variable set
// =================================================================================================

/// A plot-ready variable
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    Series(TimeSeries),
    Map(SpatialMap),
}

impl Variable {
    pub fn key(&self) -> &'static str {
        match self {
            Variable::Series(series) => series.key,
            Variable::Map(map) => map.key,
        }
    }

    pub fn finite_range(&self) -> Option<(f64, f64)> {
        match self {
            Variable::Series(series) => series.finite_range(),
            Variable::Map(map) => map.finite_range(),
        }
    }
}

/// Normalized variables of one plot request
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSet {
    pub kind: PlotKind,
    pub family: ModelFamily,

    /// Saved times [s]
    pub time: Vec<f64>,

    /// Variables in panel order
    pub variables: Vec<Variable>,
}

impl VariableSet {
    /// Extract the variables of a resolved plot
    ///
    /// `Power` and `Ivp` derive the power density from current and cell
    /// voltage; the current density series carries its areal capacity in its
    /// title.
    pub fn extract(resolved: &ResolvedPlot<'_>) -> PlotResult<Self> {
        let time = resolved.time.to_vec();

        let variables = match resolved.kind {
            PlotKind::Current => vec![Variable::Series(current_series(resolved, &time)?)],
            PlotKind::Voltage => vec![Variable::Series(voltage_series(resolved)?)],
            PlotKind::Power => vec![Variable::Series(power_series(resolved)?)],
            PlotKind::Ivp => vec![
                Variable::Series(current_series(resolved, &time)?),
                Variable::Series(voltage_series(resolved)?),
                Variable::Series(power_series(resolved)?),
            ],
            _ => resolved
                .fields
                .iter()
                .map(|field| extract_field(field, &time))
                .collect::<PlotResult<Vec<_>>>()?,
        };

        for variable in &variables {
            match variable {
                Variable::Series(series) => {
                    let flagged = series.flagged();
                    if let Some((lo, hi)) = series.expected_range.filter(|_| !flagged.is_empty()) {
                        log::warn!(
                            "{} sample(s) of '{}' fall outside [{}, {}]",
                            flagged.len(),
                            series.key,
                            lo,
                            hi
                        );
                    }
                }
                Variable::Map(map) => {
                    let n = map.non_finite_count();
                    if n > 0 {
                        log::warn!("{} non-finite cell(s) in '{}' are left blank", n, map.key);
                    }
                }
            }
        }

        Ok(Self {
            kind: resolved.kind,
            family: resolved.family,
            time,
            variables,
        })
    }

    /// Variable by key
    pub fn get(&self, key: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.key() == key)
    }

    pub fn series(&self) -> impl Iterator<Item = &TimeSeries> {
        self.variables.iter().filter_map(|v| match v {
            Variable::Series(series) => Some(series),
            Variable::Map(_) => None,
        })
    }

    pub fn maps(&self) -> impl Iterator<Item = &SpatialMap> {
        self.variables.iter().filter_map(|v| match v {
            Variable::Map(map) => Some(map),
            Variable::Series(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

// =================================================================================================
// Numerical helpers
// =================================================================================================

/// Cell edges of a strictly increasing coordinate vector
///
/// Interior edges are midpoints; the outer edges mirror the first and last
/// half-spacing. A single coordinate gets a unit-wide cell.
///
/// ```rust
/// use batpost::variables::cell_edges;
///
/// assert_eq!(cell_edges(&[0.0, 1.0, 3.0]), vec![-0.5, 0.5, 2.0, 4.0]);
/// ```
pub fn cell_edges(coords: &[f64]) -> Vec<f64> {
    match coords {
        [] => Vec::new(),
        [c] => vec![c - 0.5, c + 0.5],
        [first, second, ..] => {
            let n = coords.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(first - 0.5 * (second - first));
            edges.extend(coords.windows(2).map(|w| 0.5 * (w[0] + w[1])));
            edges.push(coords[n - 1] + 0.5 * (coords[n - 1] - coords[n - 2]));
            edges
        }
    }
}

/// Cumulative areal capacity [A·h/m^2]
///
/// Trapezoidal integral of the current density over time in hours, starting
/// at 0 and reported as a magnitude.
pub fn areal_capacity(time: &[f64], current: &[f64]) -> Vec<f64> {
    let n = time.len().min(current.len());
    if n == 0 {
        return Vec::new();
    }

    let mut capacity = Vec::with_capacity(n);
    let mut acc = 0.0;
    capacity.push(0.0);
    for k in 1..n {
        let dt_h = (time[k] - time[k - 1]) / SECONDS_PER_HOUR;
        acc += 0.5 * (current[k] + current[k - 1]) * dt_h;
        capacity.push(acc.abs());
    }
    capacity
}

/// Power density [W/m^2]
pub fn power_density(current: &[f64], voltage: &[f64]) -> Vec<f64> {
    current.iter().zip(voltage).map(|(i, v)| i * v).collect()
}

fn finite_min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

// =================================================================================================
// Extraction
// =================================================================================================

fn extract_field(field: &ResolvedField<'_>, time: &[f64]) -> PlotResult<Variable> {
    let spec = field.spec;

    if let Some(values) = field.data.try_as_series() {
        return Ok(Variable::Series(TimeSeries::from_spec(spec, values.iter().copied().collect())));
    }

    let values = field
        .data
        .try_as_map()
        .ok_or_else(|| PlotError::malformed(spec.key(), "unexpected field shape"))?;
    let grid = field
        .grid
        .ok_or_else(|| PlotError::malformed(spec.key(), "map field without spatial grid"))?;

    Ok(Variable::Map(SpatialMap {
        key: spec.key(),
        title: spec.title.to_string(),
        value_label: spec.axis_label(),
        x_label: grid.axis_label(),
        x: grid.coords().to_vec(),
        x_edges: cell_edges(grid.coords()),
        t_edges: cell_edges(time),
        values: values.clone(),
        boundaries: grid.boundaries().to_vec(),
    }))
}

fn series_values(resolved: &ResolvedPlot<'_>, id: FieldId) -> PlotResult<(&'static FieldSpec, Vec<f64>)> {
    let field = resolved
        .get(id)
        .ok_or_else(|| PlotError::malformed(id.key(), "field was not resolved"))?;
    let values = field
        .data
        .try_as_series()
        .ok_or_else(|| PlotError::malformed(id.key(), "expected a time series"))?;
    Ok((field.spec, values.iter().copied().collect()))
}

fn current_series(resolved: &ResolvedPlot<'_>, time: &[f64]) -> PlotResult<TimeSeries> {
    let (spec, values) = series_values(resolved, FieldId::CurrentDensity)?;
    let capacity = areal_capacity(time, &values).last().copied().unwrap_or(0.0);

    let mut series = TimeSeries::from_spec(spec, values);
    series.title = format!("{} (Q = {:.3} A·h/m^2)", spec.title, capacity);
    Ok(series)
}

fn voltage_series(resolved: &ResolvedPlot<'_>) -> PlotResult<TimeSeries> {
    let (spec, values) = series_values(resolved, FieldId::CathodePotential)?;

    let mut series = TimeSeries::from_spec(spec, values);
    series.title = "Cell voltage".to_string();
    series.axis_label = format!("V_cell [{}]", spec.unit);
    Ok(series)
}

fn power_series(resolved: &ResolvedPlot<'_>) -> PlotResult<TimeSeries> {
    let (_, current) = series_values(resolved, FieldId::CurrentDensity)?;
    let (_, voltage) = series_values(resolved, FieldId::CathodePotential)?;

    Ok(TimeSeries {
        key: "p_ext",
        title: "Power density".to_string(),
        axis_label: "p_ext [W/m^2]".to_string(),
        values: power_density(&current, &voltage),
        expected_range: None,
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::FieldResolver;
    use crate::solution::{ExperimentKind, GridId, Solution, SpatialGrid};
    use approx::assert_relative_eq;

    fn ivp_solution() -> Solution {
        Solution::builder(ModelFamily::Spm, ExperimentKind::ConstantCurrent)
            .time(vec![0.0, 1800.0, 3600.0])
            .series(FieldId::CurrentDensity, vec![-10.0, -10.0, -10.0])
            .series(FieldId::CathodePotential, vec![4.0, 3.8, 3.6])
            .build()
    }

    #[test]
    fn test_cell_edges() {
        assert_eq!(cell_edges(&[0.0, 1.0, 3.0]), vec![-0.5, 0.5, 2.0, 4.0]);
        assert_eq!(cell_edges(&[2.0]), vec![1.5, 2.5]);
        assert!(cell_edges(&[]).is_empty());
    }

    #[test]
    fn test_areal_capacity_constant_current() {
        let q = areal_capacity(&[0.0, 1800.0, 3600.0], &[-10.0, -10.0, -10.0]);
        assert_eq!(q.len(), 3);
        assert_relative_eq!(q[0], 0.0);
        assert_relative_eq!(q[1], 5.0);
        assert_relative_eq!(q[2], 10.0);
    }

    #[test]
    fn test_power_density() {
        assert_eq!(power_density(&[2.0, -1.0], &[4.0, 3.0]), vec![8.0, -3.0]);
    }

    #[test]
    fn test_flagged_samples_are_not_clamped() {
        let series = TimeSeries {
            key: "x_an",
            title: "Anode intercalation".to_string(),
            axis_label: "X_Li,an [-]".to_string(),
            values: vec![0.5, 1.2, -0.1, f64::NAN],
            expected_range: Some((0.0, 1.0)),
        };
        assert_eq!(series.flagged(), vec![1, 2]);
        assert_eq!(series.values[1], 1.2);
        assert_eq!(series.finite_range(), Some((-0.1, 1.2)));
    }

    #[test]
    fn test_finite_range_of_all_nan_is_none() {
        assert_eq!(finite_min_max([f64::NAN, f64::INFINITY].into_iter()), None);
    }

    #[test]
    fn test_ivp_derives_power_and_capacity() {
        let sol = ivp_solution();
        let resolved = FieldResolver::for_solution(&sol).resolve(PlotKind::Ivp).unwrap();
        let set = VariableSet::extract(&resolved).unwrap();

        let keys: Vec<_> = set.variables.iter().map(Variable::key).collect();
        assert_eq!(keys, vec!["i_ext", "phi_ca", "p_ext"]);

        let current = set.series().next().unwrap();
        assert!(current.title.contains("Q = 10.000 A·h/m^2"));

        match set.get("p_ext") {
            Some(Variable::Series(power)) => assert_eq!(power.values, vec![-40.0, -38.0, -36.0]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_voltage_is_labelled_as_cell_voltage() {
        let sol = ivp_solution();
        let resolved = FieldResolver::for_solution(&sol).resolve(PlotKind::Voltage).unwrap();
        let set = VariableSet::extract(&resolved).unwrap();
        let voltage = set.series().next().unwrap();
        assert_eq!(voltage.title, "Cell voltage");
        assert_eq!(voltage.axis_label, "V_cell [V]");
    }

    #[test]
    fn test_map_extraction_carries_lattice() {
        let sol = Solution::builder(ModelFamily::P2d, ExperimentKind::ConstantCurrent)
            .time(vec![0.0, 10.0])
            .map(
                FieldId::ElectrolyteConcentration,
                DMatrix::from_row_slice(2, 3, &[1.0, 1.0, 1.0, 0.9, 1.0, 1.1]),
            )
            .grid(
                GridId::Cell,
                SpatialGrid::new("x", "um", vec![5.0, 15.0, 25.0]).with_boundaries(vec![10.0, 20.0]),
            )
            .build();
        let resolved = FieldResolver::for_solution(&sol).resolve(PlotKind::Electrolyte).unwrap();
        let set = VariableSet::extract(&resolved).unwrap();

        let map = set.maps().next().unwrap();
        assert_eq!(map.x_label, "x [um]");
        assert_eq!(map.value_label, "C_Li+ [kmol/m^3]");
        assert_eq!(map.x_edges, vec![0.0, 10.0, 20.0, 30.0]);
        assert_eq!(map.t_edges, vec![-5.0, 5.0, 15.0]);
        assert_eq!(map.boundaries, vec![10.0, 20.0]);
        assert_eq!(map.finite_range(), Some((0.9, 1.1)));
    }
}
