//! Spatial grids
//!
//! Space-resolved fields are sampled on a fixed grid owned by the solution.
//! SPM maps live on particle-radius grids; P2D maps live on electrode-thickness
//! grids (full cell, cell faces, anode only, cathode only).

use std::fmt;

/// Identifier of a spatial grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GridId {
    /// Radial mesh of the SPM anode particle
    AnodeParticle,

    /// Radial mesh of the SPM cathode particle
    CathodeParticle,

    /// Control-volume centres across anode, separator and cathode
    Cell,

    /// Control-volume faces across the whole cell (one more than `Cell`)
    CellFaces,

    /// Control-volume centres of the anode
    Anode,

    /// Control-volume centres of the cathode
    Cathode,
}

impl fmt::Display for GridId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridId::AnodeParticle => "anode particle",
            GridId::CathodeParticle => "cathode particle",
            GridId::Cell => "cell",
            GridId::CellFaces => "cell faces",
            GridId::Anode => "anode",
            GridId::Cathode => "cathode",
        };
        write!(f, "{}", name)
    }
}

/// Coordinates of a spatial grid with their axis metadata
///
/// The unit is whatever the producing model declared; it is passed through to
/// axis labels untouched.
///
/// # Example
///
/// ```rust
/// use batpost::solution::SpatialGrid;
///
/// let x = SpatialGrid::new("x", "um", vec![5.0, 15.0, 25.0, 35.0])
///     .with_boundaries(vec![10.0, 30.0]);
/// assert_eq!(x.len(), 4);
/// assert_eq!(x.axis_label(), "x [um]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialGrid {
    symbol: String,
    unit: String,
    coords: Vec<f64>,
    boundaries: Vec<f64>,
}

impl SpatialGrid {
    /// Create a grid from its axis symbol, unit and coordinates
    pub fn new(symbol: impl Into<String>, unit: impl Into<String>, coords: Vec<f64>) -> Self {
        Self {
            symbol: symbol.into(),
            unit: unit.into(),
            coords,
            boundaries: Vec::new(),
        }
    }

    /// Attach region boundaries (e.g. anode/separator and separator/cathode)
    pub fn with_boundaries(mut self, boundaries: Vec<f64>) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Axis label such as `x [um]`
    pub fn axis_label(&self) -> String {
        format!("{} [{}]", self.symbol, self.unit)
    }

    /// Index of the first coordinate that breaks strict monotonicity
    ///
    /// Non-finite coordinates also count as a break.
    pub fn first_non_increasing(&self) -> Option<usize> {
        first_non_increasing(&self.coords)
    }
}

/// Index of the first element that is non-finite or not strictly greater
/// than its predecessor
pub(crate) fn first_non_increasing(values: &[f64]) -> Option<usize> {
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Some(i);
    }
    values
        .windows(2)
        .position(|w| w[1] <= w[0])
        .map(|i| i + 1)
}
