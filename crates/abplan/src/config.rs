//! Style configuration for the power-analysis plot.

use std::path::Path;

use serde::{Deserialize, Serialize};

use abplan_core::constants::DEFAULT_PLOT_RESOLUTION;

use crate::plot::PlotError;

/// An sRGB color parsed from `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse(hex: &str) -> Result<Self, PlotError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(PlotError::InvalidStyle(format!(
                "expected a #rrggbb color, got {hex:?}"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| {
                PlotError::InvalidStyle(format!("expected a #rrggbb color, got {hex:?}"))
            })
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Configuration for the rendered plot.
///
/// Every field has a default, so a JSON style file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Image width in pixels.
    ///
    /// Default: 1680
    pub width: u32,

    /// Image height in pixels.
    ///
    /// Default: 840
    pub height: u32,

    /// Number of grid points sampled per density curve.
    ///
    /// Default: 1000
    pub resolution: usize,

    /// Null hypothesis curve and Type I shading.
    pub null_color: String,

    /// Alternative hypothesis curve and Type II shading.
    pub alt_color: String,

    /// Dashed marker at the null mean.
    pub null_mean_color: String,

    /// Dashed marker at the alternative mean.
    pub alt_mean_color: String,

    /// Opacity of the shaded error regions, in `[0, 1]`.
    ///
    /// Default: 0.2
    pub shade_alpha: f32,

    /// Draw a dashed background grid at the axis ticks.
    pub show_grid: bool,

    /// Draw the legend box in the upper right corner.
    pub show_legend: bool,

    /// Draw the explanatory caption under the axis.
    pub show_caption: bool,

    /// Plot title.
    pub title: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1680,
            height: 840,
            resolution: DEFAULT_PLOT_RESOLUTION,
            null_color: "#3838e7".into(),
            alt_color: "#40e0d0".into(),
            null_mean_color: "#1a1a80".into(),
            alt_mean_color: "#26c2a4".into(),
            shade_alpha: 0.2,
            show_grid: true,
            show_legend: true,
            show_caption: true,
            title: "Hypothesis Testing: Null vs Alternative Hypotheses".into(),
        }
    }
}

impl PlotConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the image size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the curve sampling resolution.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the shading opacity (clamped to `[0, 1]`).
    pub fn with_shade_alpha(mut self, alpha: f32) -> Self {
        self.shade_alpha = alpha.clamp(0.0, 1.0);
        self
    }

    /// Hide grid, legend and caption.
    pub fn minimal(mut self) -> Self {
        self.show_grid = false;
        self.show_legend = false;
        self.show_caption = false;
        self
    }

    /// Read a config from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, PlotError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PlotError::InvalidStyle(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, PlotError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| PlotError::InvalidStyle(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check sizes and colors.
    pub fn validate(&self) -> Result<(), PlotError> {
        if self.width < 200 || self.height < 100 {
            return Err(PlotError::InvalidStyle(format!(
                "image must be at least 200x100, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.shade_alpha) {
            return Err(PlotError::InvalidStyle(format!(
                "shade_alpha must be in [0, 1], got {}",
                self.shade_alpha
            )));
        }
        self.palette().map(|_| ())
    }

    /// Parsed colors, in field order.
    pub(crate) fn palette(&self) -> Result<Palette, PlotError> {
        Ok(Palette {
            null: Rgb::parse(&self.null_color)?,
            alt: Rgb::parse(&self.alt_color)?,
            null_mean: Rgb::parse(&self.null_mean_color)?,
            alt_mean: Rgb::parse(&self.alt_mean_color)?,
        })
    }
}

/// Colors of a validated [`PlotConfig`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub null: Rgb,
    pub alt: Rgb,
    pub null_mean: Rgb,
    pub alt_mean: Rgb,
}
