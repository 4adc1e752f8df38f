//! Colormaps for space-time maps
//!
//! Thin layer over the plotters colormaps: viridis is plotters' own
//! `ViridisRGB`, greys and jet are `DerivedColorMap`s through evenly spaced
//! stops. [`ColorScale`] adds the value policy on top (range, NaN, flat maps).

use plotters::prelude::{RGBColor, BLACK, WHITE};
use plotters::style::colors::colormaps::{ColorMap, DerivedColorMap, ViridisRGB};
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of cells above which colouring switches to rayon (feature `parallel`)
const PARALLEL_THRESHOLD: usize = 999;

/// Jet sampled at 9 evenly spaced positions
const JET_STOPS: [RGBColor; 9] = [
    RGBColor(0, 0, 143),
    RGBColor(0, 0, 255),
    RGBColor(0, 127, 255),
    RGBColor(0, 255, 255),
    RGBColor(127, 255, 127),
    RGBColor(255, 255, 0),
    RGBColor(255, 127, 0),
    RGBColor(255, 0, 0),
    RGBColor(127, 0, 0),
];

/// Available colormaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    /// Perceptually uniform, dark blue to yellow
    #[default]
    Viridis,

    /// Rainbow, dark blue to dark red
    Jet,

    /// White to black
    Greys,
}

impl Colormap {
    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Jet => "jet",
            Colormap::Greys => "greys",
        }
    }

    fn palette(&self) -> Palette {
        match self {
            Colormap::Viridis => Palette::Viridis(ViridisRGB),
            Colormap::Jet => Palette::Derived(DerivedColorMap::new(&JET_STOPS)),
            Colormap::Greys => Palette::Derived(DerivedColorMap::new(&[WHITE, BLACK])),
        }
    }

    /// Colour at normalized position `t` (clamped to `[0, 1]`, NaN → 0)
    pub fn color(&self, t: f64) -> RGBColor {
        self.palette().at(t)
    }
}

/// A built plotters colormap, reused across the cells of one map
enum Palette {
    Viridis(ViridisRGB),
    Derived(DerivedColorMap<RGBColor>),
}

impl Palette {
    fn at(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Palette::Viridis(map) => ColorMap::<RGBColor, f64>::get_color_normalized(map, t, 0.0, 1.0),
            Palette::Derived(map) => ColorMap::<RGBColor, f64>::get_color_normalized(map, t, 0.0, 1.0),
        }
    }
}

/// Linear value → colour mapping over a fixed range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub colormap: Colormap,
    pub lo: f64,
    pub hi: f64,
}

impl ColorScale {
    pub fn new(colormap: Colormap, lo: f64, hi: f64) -> Self {
        Self { colormap, lo, hi }
    }

    /// Normalized position of a value; a flat range maps to the middle
    ///
    /// Works on half values so that ranges wider than `f64::MAX` still
    /// normalize.
    pub fn normalize(&self, value: f64) -> f64 {
        let half_span = 0.5 * self.hi - 0.5 * self.lo;
        if half_span > 0.0 {
            (0.5 * value - 0.5 * self.lo) / half_span
        } else {
            0.5
        }
    }

    /// Colour of a value, `None` for non-finite values
    pub fn color(&self, value: f64) -> Option<RGBColor> {
        value
            .is_finite()
            .then(|| self.colormap.color(self.normalize(value)))
    }

    /// Colour every value of a slice
    pub fn colors(&self, values: &[f64]) -> Vec<Option<RGBColor>> {
        let palette = self.colormap.palette();
        let color = |v: f64| v.is_finite().then(|| palette.at(self.normalize(v)));

        if values.len() > PARALLEL_THRESHOLD {
            #[cfg(feature = "parallel")]
            return values.par_iter().map(|v| color(*v)).collect();
        }
        values.iter().map(|v| color(*v)).collect()
    }
}
