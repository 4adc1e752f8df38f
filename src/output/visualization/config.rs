//! Plot configuration shared by every figure
//!
//! `PlotConfig` only affects how a figure looks (sizes, colours, colormap).
//! Which panels a figure has and what they contain is decided by the plot kind
//! and the solution, never by the configuration.
//!
//! # TOML
//!
//! Every field is optional; missing keys keep their default.
//!
//! ```toml
//! panel_width = 640
//! panel_height = 400
//! title = "Discharge at 1C"
//! colormap = "jet"
//! palette = [[200, 30, 30], [30, 30, 200]]
//! ```

use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::colormap::Colormap;
use crate::error::ConfigError;

/// Configuration for customizing figures
///
/// # Fields
///
/// - `panel_width`, `panel_height`: Size of one panel in pixels; the figure
///   size is the panel size times the layout
/// - `title`: Optional figure title override
/// - `series_colors`: Optional palette for line panels
/// - `background`: Background colour
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to draw mesh lines
/// - `colormap`: Colormap of pixel panels
/// - `flag_color`: Marker colour of samples outside their expected range
///
/// # Example
///
/// ```rust,ignore
/// use batpost::output::{Colormap, PlotConfig};
///
/// let mut config = PlotConfig::titled("SPM discharge");
/// config.colormap = Colormap::Jet;
/// config.panel_width = 800;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Panel width in pixels (default: 500)
    pub panel_width: u32,

    /// Panel height in pixels (default: 350)
    pub panel_height: u32,

    /// Figure title; `None` keeps the title chosen by the plot kind
    pub title: Option<String>,

    /// Optional line colours, one per panel
    ///
    /// If None, uses default palette: [BLACK, RED, GREEN, BLUE, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Colormap of pixel panels (default: viridis)
    pub colormap: Colormap,

    /// Colour of flagged samples (default: RED)
    pub flag_color: RGBColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            panel_width: 500,
            panel_height: 350,
            title: None,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            colormap: Colormap::Viridis,
            flag_color: RED,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (the plot kind's title will be used)
///
/// # Example
///
/// ```rust,ignore
/// let config = PlotConfig::titled(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create a default config with an optional title override
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::titled("P2D electrolyte");
    /// let config = PlotConfig::titled(format!("Run {}", id));
    /// let config = PlotConfig::titled(NO_TITLE);
    /// ```
    pub fn titled(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title.into_optional_title(),
            ..Self::default()
        }
    }

    /// Create a default config with custom line colours
    pub fn with_palette(colors: Vec<RGBColor>) -> Self {
        Self {
            series_colors: Some(colors),
            ..Self::default()
        }
    }

    /// Get the line colour for palette index i
    ///
    /// Uses custom colours if provided, otherwise falls back to default palette
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(ref colors) = self.series_colors {
            if index < colors.len() {
                return colors[index];
            }
        }

        // Default palette
        const DEFAULT_COLORS: [RGBColor; 8] = [
            BLACK,
            RGBColor(214, 39, 40),  // C3 red
            RGBColor(44, 160, 44),  // C2 green
            RGBColor(31, 119, 180), // C0 blue
            RGBColor(255, 127, 14), // C1 orange
            RGBColor(148, 103, 189), // C4 purple
            RGBColor(140, 86, 75),  // C5 brown
            RGBColor(127, 127, 127), // C7 grey
        ];

        DEFAULT_COLORS[index % DEFAULT_COLORS.len()]
    }

    /// Pixel size of a figure with `rows × cols` panels
    pub fn figure_size(&self, rows: usize, cols: usize) -> (u32, u32) {
        (
            self.panel_width.saturating_mul(cols.max(1) as u32),
            self.panel_height.saturating_mul(rows.max(1) as u32),
        )
    }

    /// Check values that would make drawing impossible
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.panel_width < 100 || self.panel_height < 100 {
            return Err(ConfigError::Invalid {
                key: "panel_width/panel_height",
                reason: format!(
                    "panel must be at least 100 x 100 pixels, got {} x {}",
                    self.panel_width, self.panel_height
                ),
            });
        }
        if self.line_width == 0 {
            return Err(ConfigError::Invalid {
                key: "line_width",
                reason: "must be at least 1".to_string(),
            });
        }
        if matches!(&self.series_colors, Some(colors) if colors.is_empty()) {
            return Err(ConfigError::Invalid {
                key: "palette",
                reason: "must list at least one colour".to_string(),
            });
        }
        Ok(())
    }

    // ========================================== TOML ==========================================

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: PlotConfigFile = toml::from_str(text)?;
        let config = file.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

/// On-disk mirror of [`PlotConfig`]
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct PlotConfigFile {
    #[serde(default)]
    panel_width: Option<u32>,
    #[serde(default)]
    panel_height: Option<u32>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    palette: Option<Vec<[u8; 3]>>,
    #[serde(default)]
    background: Option<[u8; 3]>,
    #[serde(default)]
    line_width: Option<u32>,
    #[serde(default)]
    show_grid: Option<bool>,
    #[serde(default)]
    colormap: Option<Colormap>,
    #[serde(default)]
    flag_color: Option<[u8; 3]>,
}

impl PlotConfigFile {
    fn into_config(self) -> PlotConfig {
        let rgb = |[r, g, b]: [u8; 3]| RGBColor(r, g, b);
        let default = PlotConfig::default();

        PlotConfig {
            panel_width: self.panel_width.unwrap_or(default.panel_width),
            panel_height: self.panel_height.unwrap_or(default.panel_height),
            title: self.title,
            series_colors: self.palette.map(|colors| colors.into_iter().map(rgb).collect()),
            background: self.background.map(rgb).unwrap_or(default.background),
            line_width: self.line_width.unwrap_or(default.line_width),
            show_grid: self.show_grid.unwrap_or(default.show_grid),
            colormap: self.colormap.unwrap_or(default.colormap),
            flag_color: self.flag_color.map(rgb).unwrap_or(default.flag_color),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
