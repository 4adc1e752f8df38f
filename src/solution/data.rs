//! Field data container
//!
//! A solution field is either a time series (one sample per saved time) or a
//! space×time map. Maps are stored with **rows = time, columns = space**, which
//! is the natural layout of a solver's saved-state matrix sliced to one variable.

use nalgebra::{DMatrix, DVector};
use std::fmt;

/// Data of a single solution field
///
/// # Storage Types
///
/// - **Series**: `DVector` of length `n_time`
/// - **Map**: `DMatrix` of shape `[n_time × n_space]`
/// - **Ragged**: time-major rows of unequal length, kept whole so the resolver
///   can report them
///
/// # Example
///
/// ```rust
/// use batpost::solution::FieldData;
///
/// let phi = FieldData::from_vec(vec![3.9, 3.8, 3.7]);
/// assert!(phi.is_series());
/// assert_eq!(phi.time_len(), 3);
///
/// let c = FieldData::from_rows(&[vec![1.0, 1.0], vec![0.9, 1.1]]);
/// assert_eq!(c.shape(), vec![2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldData {
    /// One value per saved time
    Series(DVector<f64>),

    /// `[time, space]` values on a spatial grid
    Map(DMatrix<f64>),

    /// Rows of unequal length; never plotted
    Ragged(Vec<Vec<f64>>),
}

impl FieldData {

    // ======================================= constructors =======================================

    /// Create a series from a `Vec`
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Series(DVector::from_vec(values))
    }

    /// Create a series from a `DVector`
    pub fn from_vector(values: DVector<f64>) -> Self {
        Self::Series(values)
    }

    /// Create a map from a `DMatrix` (`[time × space]`)
    pub fn from_matrix(values: DMatrix<f64>) -> Self {
        Self::Map(values)
    }

    /// Create a map from time-major rows, one row per saved time
    ///
    /// Rows of unequal length are stored as [`FieldData::Ragged`] without
    /// dropping any value.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let n_time = rows.len();
        let n_space = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_space) {
            return Self::Ragged(rows.to_vec());
        }
        Self::Map(DMatrix::from_fn(n_time, n_space, |i, j| rows[i][j]))
    }

    // ========================================== Queries ==========================================

    /// Check data is a series
    pub fn is_series(&self) -> bool {
        matches!(self, Self::Series(_))
    }

    /// Check data is a map
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// First row whose length differs from row 0, as `(row, len, expected)`
    pub fn first_ragged_row(&self) -> Option<(usize, usize, usize)> {
        match self {
            FieldData::Ragged(rows) => {
                let expected = rows.first().map_or(0, Vec::len);
                rows.iter()
                    .position(|row| row.len() != expected)
                    .map(|i| (i, rows[i].len(), expected))
            }
            _ => None,
        }
    }

    /// 1 for series, 2 for maps
    pub fn ndim(&self) -> usize {
        match self {
            FieldData::Series(_) => 1,
            FieldData::Map(_) | FieldData::Ragged(_) => 2,
        }
    }

    /// Shape as a vector
    pub fn shape(&self) -> Vec<usize> {
        match self {
            FieldData::Series(v) => vec![v.len()],
            FieldData::Map(m) => vec![m.nrows(), m.ncols()],
            FieldData::Ragged(rows) => vec![rows.len(), rows.first().map_or(0, Vec::len)],
        }
    }

    /// Number of time samples
    pub fn time_len(&self) -> usize {
        match self {
            FieldData::Series(v) => v.len(),
            FieldData::Map(m) => m.nrows(),
            FieldData::Ragged(rows) => rows.len(),
        }
    }

    /// Number of spatial points (0 for series)
    pub fn space_len(&self) -> usize {
        match self {
            FieldData::Series(_) => 0,
            FieldData::Map(m) => m.ncols(),
            FieldData::Ragged(rows) => rows.first().map_or(0, Vec::len),
        }
    }

    /// Total number of stored values
    pub fn len(&self) -> usize {
        match self {
            FieldData::Series(v) => v.len(),
            FieldData::Map(m) => m.len(),
            FieldData::Ragged(rows) => rows.iter().map(Vec::len).sum(),
        }
    }

    /// A field with no values counts as absent
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every stored value
    pub fn values(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            FieldData::Series(v) => Box::new(v.iter().copied()),
            FieldData::Map(m) => Box::new(m.iter().copied()),
            FieldData::Ragged(rows) => Box::new(rows.iter().flatten().copied()),
        }
    }

    /// Number of finite values
    pub fn finite_count(&self) -> usize {
        self.values().filter(|x| x.is_finite()).count()
    }

    // ======================================== Extractions ========================================

    /// Try to extract as a series
    pub fn try_as_series(&self) -> Option<&DVector<f64>> {
        match self {
            FieldData::Series(values) => Some(values),
            _ => None,
        }
    }

    /// Try to extract as a map
    pub fn try_as_map(&self) -> Option<&DMatrix<f64>> {
        match self {
            FieldData::Map(values) => Some(values),
            _ => None,
        }
    }
}

impl From<Vec<f64>> for FieldData {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl From<DVector<f64>> for FieldData {
    fn from(values: DVector<f64>) -> Self {
        Self::Series(values)
    }
}

impl From<DMatrix<f64>> for FieldData {
    fn from(values: DMatrix<f64>) -> Self {
        Self::Map(values)
    }
}

// ======================== Display ============================

impl fmt::Display for FieldData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldData::Series(v) => write!(f, "Series [{}]", v.len()),
            FieldData::Map(m) => write!(f, "Map [{} * {}]", m.nrows(), m.ncols()),
            FieldData::Ragged(rows) => write!(f, "Ragged map [{} rows]", rows.len()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series() {
        let data = FieldData::from_vec(vec![1.0, 2.0, 3.0]);
        assert!(data.is_series());
        assert_eq!(data.ndim(), 1);
        assert_eq!(data.time_len(), 3);
        assert_eq!(data.space_len(), 0);
    }

    #[test]
    fn test_map_is_time_major() {
        let data = FieldData::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert!(data.is_map());
        assert_eq!(data.shape(), vec![2, 3]);
        let m = data.try_as_map().unwrap();
        assert_eq!(m[(1, 0)], 4.0);
        assert_eq!(m[(0, 2)], 3.0);
    }

    #[test]
    fn test_ragged_rows_keep_every_value() {
        let data = FieldData::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]);
        assert!(!data.is_map());
        assert!(data.try_as_map().is_none());
        assert_eq!(data.len(), 5);
        assert_eq!(data.first_ragged_row(), Some((1, 2, 3)));
        assert_eq!(data.to_string(), "Ragged map [2 rows]");
    }

    #[test]
    fn test_rectangular_rows_are_not_ragged() {
        let data = FieldData::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(data.first_ragged_row(), None);
    }

    #[test]
    fn test_empty() {
        assert!(FieldData::from_vec(vec![]).is_empty());
        assert!(FieldData::from_rows(&[]).is_empty());
    }

    #[test]
    fn test_finite_count_ignores_nan_and_inf() {
        let data = FieldData::from_vec(vec![1.0, f64::NAN, f64::INFINITY, 2.0]);
        assert_eq!(data.finite_count(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldData::from_vec(vec![0.0; 4]).to_string(), "Series [4]");
        let map = FieldData::from_matrix(DMatrix::zeros(3, 5));
        assert_eq!(map.to_string(), "Map [3 * 5]");
    }

    #[test]
    fn test_extraction_mismatch_returns_none() {
        let data = FieldData::from_vec(vec![1.0]);
        assert!(data.try_as_map().is_none());
        assert!(data.try_as_series().is_some());
    }
}
