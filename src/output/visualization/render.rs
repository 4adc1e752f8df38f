//! Drawing figures with plotters
//!
//! A [`Figure`] can be drawn onto any plotters drawing area, saved to disk or
//! rasterized into memory. Drawing never mutates the figure, so the same
//! figure can be drawn any number of times.
//!
//! # Usage
//!
//! ```rust,ignore
//! use batpost::output::PlotConfig;
//!
//! let figure = batpost::postutils::spm::potentials(&sol)?;
//!
//! // PNG or SVG, picked from the extension
//! figure.save("potentials.png", &PlotConfig::default())?;
//!
//! // In-memory RGB pixels
//! let image = figure.to_rgb_buffer(&PlotConfig::default())?;
//! assert_eq!(image.data.len(), (image.width * image.height * 3) as usize);
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::colormap::ColorScale;
use super::config::PlotConfig;
use super::figure::{padded, Figure, LinePanel, Panel, PanelContent, PixelPanel};
use crate::error::{PlotError, PlotResult};

/// Field key reported for failures that concern the whole figure
const FIGURE_KEY: &str = "figure";

/// Width of the colour bar beside each pixel panel [px]
const COLORBAR_WIDTH: i32 = 90;

/// Number of colour steps in a colour bar
const COLORBAR_STEPS: usize = 64;

/// Rasterized figure, 3 bytes (RGB) per pixel, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

// =================================================================================================
// Public API
// =================================================================================================

impl Figure {
    /// Pixel size of this figure under a configuration
    pub fn size(&self, config: &PlotConfig) -> (u32, u32) {
        config.figure_size(self.layout.rows, self.layout.cols)
    }

    /// Title used when drawing (configuration override first)
    pub fn display_title<'a>(&'a self, config: &'a PlotConfig) -> &'a str {
        config.title.as_deref().unwrap_or(&self.title)
    }

    /// Draw the figure onto a caller-owned drawing area
    ///
    /// The area is filled, titled and split into the figure grid. The caller
    /// is responsible for presenting it.
    ///
    /// # Errors
    ///
    /// `Render` naming the panel's field when the backend fails.
    pub fn draw_on<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        config: &PlotConfig,
    ) -> PlotResult<()>
    where
        DB::ErrorType: 'static,
    {
        root.fill(&config.background)
            .map_err(|e| PlotError::render(self.kind, FIGURE_KEY, e.to_string()))?;

        let body = root
            .titled(self.display_title(config), ("sans-serif", 24))
            .map_err(|e| PlotError::render(self.kind, FIGURE_KEY, e.to_string()))?;

        let cells = body.split_evenly((self.layout.rows, self.layout.cols));

        for panel in &self.panels {
            let area = cells
                .get(self.layout.index(panel.row, panel.col))
                .ok_or_else(|| {
                    PlotError::render(
                        self.kind,
                        panel.field(),
                        format!("cell ({}, {}) is outside the figure grid", panel.row, panel.col),
                    )
                })?;

            draw_panel(area, panel, config)
                .map_err(|e| PlotError::render(self.kind, panel.field(), e.to_string()))?;
        }

        Ok(())
    }

    /// Save the figure to disk
    ///
    /// `.svg` → vector output, anything else → bitmap (format from extension).
    ///
    /// # Errors
    ///
    /// `Render` when the configuration is invalid (nothing is written) or the
    /// backend fails.
    pub fn save<P: AsRef<Path>>(&self, path: P, config: &PlotConfig) -> PlotResult<()> {
        self.check_config(config)?;
        let path = path.as_ref();
        let size = self.size(config);

        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("png");

        match ext {
            "svg" => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                self.draw_on(&root, config)?;
                root.present()
                    .map_err(|e| PlotError::render(self.kind, FIGURE_KEY, e.to_string()))?;
            }
            _ => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                self.draw_on(&root, config)?;
                root.present()
                    .map_err(|e| PlotError::render(self.kind, FIGURE_KEY, e.to_string()))?;
            }
        }

        log::info!("{} figure written to {}", self.kind, path.display());
        Ok(())
    }

    /// Rasterize the figure into an in-memory RGB buffer
    pub fn to_rgb_buffer(&self, config: &PlotConfig) -> PlotResult<RgbBuffer> {
        self.check_config(config)?;
        let (width, height) = self.size(config);
        let mut data = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut data, (width, height)).into_drawing_area();
            self.draw_on(&root, config)?;
            root.present()
                .map_err(|e| PlotError::render(self.kind, FIGURE_KEY, e.to_string()))?;
        }

        Ok(RgbBuffer { width, height, data })
    }

    fn check_config(&self, config: &PlotConfig) -> PlotResult<()> {
        config
            .validate()
            .map_err(|e| PlotError::render(self.kind, FIGURE_KEY, e.to_string()))
    }
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    match &panel.content {
        PanelContent::Line(line) => draw_line_panel(area, line, config),
        PanelContent::Pixel(pixel) => draw_pixel_panel(area, pixel, config),
    }
}

/// Render one series against time, with flagged samples marked
fn draw_line_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &LinePanel,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let color = config.series_color(panel.color_index);
    let (x0, x1) = panel.x_range;
    let (y0, y1) = panel.y_range;

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(65)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let x_fmt = |x: &f64| format!("{:.0}", x);
    let y_fmt = |y: &f64| format!("{:.3}", y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    // Non-finite samples split the curve
    for run in finite_runs(&panel.x, &panel.y) {
        chart.draw_series(LineSeries::new(
            run,
            ShapeStyle::from(&color).stroke_width(config.line_width),
        ))?;
    }

    if !panel.flagged.is_empty() {
        let flag = config.flag_color;
        chart.draw_series(panel.flagged.iter().filter_map(|&i| {
            let x = *panel.x.get(i)?;
            let y = *panel.y.get(i)?;
            Some(Circle::new((x, y), 3, flag.filled()))
        }))?;
    }

    Ok(())
}

/// Render a space-time map as coloured cells plus a colour bar
fn draw_pixel_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PixelPanel,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (width, _) = area.dim_in_pixel();
    let (map_area, bar_area) = area.split_horizontally((width as i32 - COLORBAR_WIDTH).max(1));

    let (x0, x1) = edge_range(&panel.x_edges);
    let (t0, t1) = edge_range(&panel.t_edges);
    let (lo, hi) = panel.value_range;
    let scale = ColorScale::new(config.colormap, lo, hi);

    let mut chart = ChartBuilder::on(&map_area)
        .caption(&panel.title, ("sans-serif", 18).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(65)
        .build_cartesian_2d(x0..x1, t0..t1)?;

    let x_fmt = |x: &f64| format!("{:.1}", x);
    let t_fmt = |t: &f64| format!("{:.0}", t);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(&panel.x_label)
        .y_desc(&panel.y_label)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&t_fmt)
        .draw()?;

    // One rectangle per (time, space) cell; DMatrix storage is column-major
    let n_time = panel.values.nrows();
    let n_space = panel.values.ncols();
    let colors = scale.colors(panel.values.as_slice());
    let colors = &colors;
    let x_edges = &panel.x_edges;
    let t_edges = &panel.t_edges;

    chart.draw_series((0..n_space).flat_map(move |j| {
        (0..n_time).filter_map(move |i| {
            colors[j * n_time + i].map(|color| {
                Rectangle::new(
                    [(x_edges[j], t_edges[i]), (x_edges[j + 1], t_edges[i + 1])],
                    color.filled(),
                )
            })
        })
    }))?;

    for &b in &panel.boundaries {
        if b > x0 && b < x1 {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(b, t0), (b, t1)],
                BLACK.stroke_width(1),
            )))?;
        }
    }

    draw_colorbar(&bar_area, &scale, &panel.value_label)
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: &ColorScale,
    label: &str,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (b0, b1) = if scale.hi > scale.lo {
        (scale.lo, scale.hi)
    } else {
        padded((scale.lo, scale.hi))
    };

    let mut chart = ChartBuilder::on(area)
        .margin_top(38)
        .margin_bottom(50)
        .margin_right(5)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0..1.0, b0..b1)?;

    let v_fmt = |v: &f64| format!("{:.3}", v);
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(5)
        .y_desc(label)
        .y_label_formatter(&v_fmt)
        .draw()?;

    let step = (b1 - b0) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).filter_map(|k| {
        let v0 = b0 + k as f64 * step;
        let v1 = v0 + step;
        scale
            .color(0.5 * (v0 + v1))
            .map(|color| Rectangle::new([(0.0, v0), (1.0, v1)], color.filled()))
    }))?;

    Ok(())
}

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Split a curve into runs of finite points
fn finite_runs(x: &[f64], y: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();

    for (&xi, &yi) in x.iter().zip(y) {
        if xi.is_finite() && yi.is_finite() {
            current.push((xi, yi));
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

fn edge_range(edges: &[f64]) -> (f64, f64) {
    match (edges.first(), edges.last()) {
        (Some(first), Some(last)) if last > first => (*first, *last),
        _ => (0.0, 1.0),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
