//! Figure description and layout policy
//!
//! A [`Figure`] is plain data: a title, a `rows × cols` grid and the panels
//! placed on it, each carrying everything needed to draw it. Building a figure
//! touches no drawing backend, so two figures built from the same solution
//! compare equal and rasterize to the same pixels.
//!
//! # Layout Policy
//!
//! | Plot | Grid |
//! |------|------|
//! | intercalation | 1 × 2 |
//! | potentials (SPM) | 1 × 3 |
//! | potentials (P2D) | 2 × 3, series on row 0, maps on row 1 |
//! | pixels | `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)` |
//! | electrolyte, current, voltage, power | 1 × 1 |
//! | ivp | 1 × 3 |

use nalgebra::DMatrix;

use crate::error::{PlotError, PlotResult};
use crate::registry::PlotKind;
use crate::solution::ModelFamily;
use crate::variables::{SpatialMap, TimeSeries, Variable, VariableSet};

/// Time axis label shared by every panel
pub const TIME_LABEL: &str = "t [s]";

// =================================================================================================
// Figure data
// =================================================================================================

/// Panel grid of a figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows: usize,
    pub cols: usize,
}

impl Layout {
    /// One row of `n` panels
    pub fn row(n: usize) -> Self {
        Self { rows: 1, cols: n.max(1) }
    }

    /// Near-square grid for `n` panels
    pub fn square(n: usize) -> Self {
        let n = n.max(1);
        let mut cols = 1;
        while cols * cols < n {
            cols += 1;
        }
        Self {
            rows: n.div_ceil(cols),
            cols,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major cell index of `(row, col)`
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

/// Line plot of one series against time
#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub field: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,

    /// Index into the configured palette
    pub color_index: usize,

    /// Samples drawn with the flag marker
    pub flagged: Vec<usize>,

    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Colour map of one space-time field (space on x, time on y)
#[derive(Debug, Clone, PartialEq)]
pub struct PixelPanel {
    pub field: &'static str,
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Colour-bar label
    pub value_label: String,

    pub x_edges: Vec<f64>,
    pub t_edges: Vec<f64>,

    /// Rows = time, columns = space
    pub values: DMatrix<f64>,

    /// Finite `(min, max)` mapped onto the colormap
    pub value_range: (f64, f64),

    /// Vertical region markers
    pub boundaries: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    Line(LinePanel),
    Pixel(PixelPanel),
}

/// A panel placed on the figure grid
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    pub content: PanelContent,
}

impl Panel {
    /// Key of the drawn field
    pub fn field(&self) -> &'static str {
        match &self.content {
            PanelContent::Line(line) => line.field,
            PanelContent::Pixel(pixel) => pixel.field,
        }
    }

    pub fn is_pixel(&self) -> bool {
        matches!(self.content, PanelContent::Pixel(_))
    }
}

/// Caller-owned description of a rendered plot
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub kind: PlotKind,
    pub family: ModelFamily,
    pub title: String,
    pub layout: Layout,
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Field keys in panel order
    pub fn fields(&self) -> Vec<&'static str> {
        self.panels.iter().map(Panel::field).collect()
    }

    /// Panel drawing a given field
    pub fn panel(&self, field: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.field() == field)
    }
}

// =================================================================================================
// Renderer
// =================================================================================================

/// Lays out a [`VariableSet`] into a [`Figure`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlotRenderer;

impl PlotRenderer {
    /// Build the figure of a variable set
    ///
    /// # Errors
    ///
    /// `Render` when a variable has no finite sample, or when its finite
    /// values span more than an `f64` can hold. The checks run on every
    /// variable before any panel is built.
    pub fn layout(variables: &VariableSet) -> PlotResult<Figure> {
        let kind = variables.kind;

        let ranges = variables
            .variables
            .iter()
            .map(|v| {
                let range = v
                    .finite_range()
                    .ok_or_else(|| PlotError::render(kind, v.key(), "no finite sample to draw"))?;
                if !is_representable(range) {
                    return Err(PlotError::render(kind, v.key(), "value range is not representable"));
                }
                Ok(range)
            })
            .collect::<PlotResult<Vec<_>>>()?;

        let split_rows = kind == PlotKind::Potentials && variables.family == ModelFamily::P2d;
        let layout = match kind {
            PlotKind::Pixels => Layout::square(variables.len()),
            _ if split_rows => Layout {
                rows: 2,
                cols: variables.series().count().max(variables.maps().count()).max(1),
            },
            _ => Layout::row(variables.len()),
        };

        let mut next_series = 0;
        let mut next_map = 0;
        let mut panels = Vec::with_capacity(variables.len());

        for (i, (variable, range)) in variables.variables.iter().zip(ranges).enumerate() {
            let (row, col) = if split_rows {
                match variable {
                    Variable::Series(_) => {
                        next_series += 1;
                        (0, next_series - 1)
                    }
                    Variable::Map(_) => {
                        next_map += 1;
                        (1, next_map - 1)
                    }
                }
            } else {
                (i / layout.cols, i % layout.cols)
            };

            let color_index = if kind == PlotKind::Potentials { i + 1 } else { 0 };
            let content = match variable {
                Variable::Series(series) => {
                    PanelContent::Line(line_panel(series, &variables.time, range, color_index))
                }
                Variable::Map(map) => PanelContent::Pixel(pixel_panel(map, range)),
            };

            panels.push(Panel { row, col, content });
        }

        log::debug!(
            "laid out {} {} figure on a {}x{} grid with {} panel(s)",
            variables.family,
            kind,
            layout.rows,
            layout.cols,
            panels.len()
        );

        Ok(Figure {
            kind,
            family: variables.family,
            title: default_title(variables.family, kind),
            layout,
            panels,
        })
    }
}

// =================================================================================================
// Helper Functions
// =================================================================================================

fn default_title(family: ModelFamily, kind: PlotKind) -> String {
    let name = match kind {
        PlotKind::Electrolyte => "electrolyte concentration",
        PlotKind::Intercalation => "intercalation",
        PlotKind::Pixels => "space-time fields",
        PlotKind::Potentials => "potentials",
        PlotKind::Current => "current",
        PlotKind::Voltage => "voltage",
        PlotKind::Power => "power",
        PlotKind::Ivp => "current, voltage and power",
    };
    format!("{} {}", family, name)
}

/// Axis range of `[lo, hi]` padded by 5 % (a flat range gets a fixed pad)
pub(crate) fn padded((lo, hi): (f64, f64)) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        0.05 * span
    } else {
        (0.05 * lo.abs()).max(1e-3)
    };
    (lo - pad, hi + pad)
}

/// Span and padded bounds of a value range are all finite
fn is_representable(range: (f64, f64)) -> bool {
    let (lo, hi) = padded(range);
    (range.1 - range.0).is_finite() && lo.is_finite() && hi.is_finite()
}

fn line_panel(series: &TimeSeries, time: &[f64], range: (f64, f64), color_index: usize) -> LinePanel {
    let x_range = match (time.first(), time.last()) {
        (Some(first), Some(last)) if last > first => (*first, *last),
        (Some(t), _) => (t - 0.5, t + 0.5),
        _ => (0.0, 1.0),
    };

    LinePanel {
        field: series.key,
        title: series.title.clone(),
        x_label: TIME_LABEL.to_string(),
        y_label: series.axis_label.clone(),
        x: time.to_vec(),
        y: series.values.clone(),
        color_index,
        flagged: series.flagged(),
        x_range,
        y_range: padded(range),
    }
}

fn pixel_panel(map: &SpatialMap, range: (f64, f64)) -> PixelPanel {
    PixelPanel {
        field: map.key,
        title: map.title.clone(),
        x_label: map.x_label.clone(),
        y_label: TIME_LABEL.to_string(),
        value_label: map.value_label.clone(),
        x_edges: map.x_edges.clone(),
        t_edges: map.t_edges.clone(),
        values: map.values.clone(),
        value_range: range,
        boundaries: map.boundaries.clone(),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
