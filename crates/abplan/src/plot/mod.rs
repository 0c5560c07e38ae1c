//! Power-analysis plot rendering.
//!
//! Draws the null and alternative densities computed by
//! [`PowerCurves`](abplan_core::PowerCurves), their mean markers, the shaded
//! Type I and Type II regions, a legend, title, axis labels and ticks into a
//! single raster, and returns it PNG-encoded.
//!
//! Rendering is deterministic: text uses a built-in bitmap font and no
//! system resources are read.
//!
//! # Example
//!
//! ```no_run
//! use abplan::{render_power_plot, VisualParameters};
//!
//! let png = render_power_plot(&VisualParameters::new(10.0, 20.0)).unwrap();
//! png.write_to("power.png").unwrap();
//! ```

mod canvas;
pub(crate) mod glyphs;

use std::io;
use std::ops::Range;
use std::path::Path;

use abplan_core::{PlanError, PowerCurves, VisualParameters};

use crate::config::{Palette, PlotConfig, Rgb};
use canvas::{Anchor, Canvas, Frame};

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

const CAPTION: &str = "This plot illustrates the Null and Alternative Hypotheses \
                       with critical regions for statistical errors.";

const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
const GRAY: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 128,
};

/// Error returned when a plot cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The plot parameters are outside the formula's domain.
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// The style configuration is malformed.
    #[error("invalid plot style: {0}")]
    InvalidStyle(String),

    /// The raster could not be allocated.
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// A rendered PNG image, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotArtifact {
    png: Vec<u8>,
}

impl PlotArtifact {
    /// Encoded PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Take ownership of the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.png
    }

    pub fn len(&self) -> usize {
        self.png.len()
    }

    pub fn is_empty(&self) -> bool {
        self.png.is_empty()
    }

    /// Whether the buffer starts with the PNG signature.
    pub fn is_png(&self) -> bool {
        self.png.starts_with(&PNG_SIGNATURE)
    }

    /// Write the image to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        std::fs::write(path, &self.png)
    }
}

/// Render the power-analysis plot with the default style.
///
/// # Errors
///
/// [`PlotError::Plan`] if the baseline is outside `(0, 100)`, the MDE is
/// not positive, or α/power are outside `(0, 100)`.
pub fn render_power_plot(params: &VisualParameters) -> Result<PlotArtifact, PlotError> {
    render_power_plot_with(params, &PlotConfig::default())
}

/// Render the power-analysis plot with a custom style.
///
/// # Errors
///
/// As [`render_power_plot`], plus [`PlotError::InvalidStyle`] for a
/// malformed config.
pub fn render_power_plot_with(
    params: &VisualParameters,
    config: &PlotConfig,
) -> Result<PlotArtifact, PlotError> {
    config.validate()?;
    let palette = config.palette()?;
    let curves = PowerCurves::compute(params, config.resolution)?;

    let ui = config.height as f32 / 840.0;
    let title_scale = text_scale(4.0, ui);
    let label_scale = text_scale(3.0, ui);
    let tick_scale = text_scale(2.0, ui);

    let (x_min, x_max) = curves.domain();
    let frame = Frame {
        left: 130.0 * ui,
        top: 40.0 * ui + Canvas::line_height(title_scale) * 2.0,
        width: config.width as f32 - 170.0 * ui,
        height: config.height as f32 - 230.0 * ui - Canvas::line_height(title_scale),
        x_min,
        x_max,
        y_max: curves.y_max,
    };

    let mut canvas = Canvas::new(config.width, config.height, WHITE)?;
    let x_ticks = ticks(x_min, x_max, 8);
    let y_ticks = ticks(0.0, curves.y_max, 6);

    if config.show_grid {
        let grid_dash = Some([6.0 * ui, 4.0 * ui]);
        for &x in &x_ticks {
            let px = frame.px(x);
            canvas.line((px, frame.top), (px, frame.bottom()), GRAY, 0.7, ui, grid_dash);
        }
        for &y in &y_ticks {
            let py = frame.py(y);
            canvas.line((frame.left, py), (frame.right(), py), GRAY, 0.7, ui, grid_dash);
        }
    }

    // Error regions under the curves.
    for run in runs(curves.xs.len(), |i| curves.in_type_one(i)) {
        canvas.polygon(
            &region_outline(&frame, &curves.xs, &curves.null_density, run),
            palette.null,
            config.shade_alpha,
        );
    }
    for run in runs(curves.xs.len(), |i| curves.in_type_two(i)) {
        canvas.polygon(
            &region_outline(&frame, &curves.xs, &curves.alt_density, run),
            palette.alt,
            config.shade_alpha,
        );
    }

    let curve_width = 2.0 * ui;
    let null_trace = trace(&frame, &curves.xs, &curves.null_density);
    let alt_trace = trace(&frame, &curves.xs, &curves.alt_density);
    canvas.polyline(&null_trace, palette.null, 1.0, curve_width, None);
    canvas.polyline(&alt_trace, palette.alt, 1.0, curve_width, None);

    let dash = Some([8.0 * ui, 5.0 * ui]);
    for (mean, rgb) in [(0.0, palette.null_mean), (curves.effect, palette.alt_mean)] {
        let px = frame.px(mean);
        canvas.line((px, frame.top), (px, frame.bottom()), rgb, 1.0, 1.5 * ui, dash);
    }

    canvas.stroke_rect(frame.left, frame.top, frame.width, frame.height, BLACK, ui);

    // Ticks and tick labels.
    let tick_len = 6.0 * ui;
    let gap = 6.0 * ui;
    for &x in &x_ticks {
        let px = frame.px(x);
        let (y0, y1) = (frame.bottom(), frame.bottom() + tick_len);
        canvas.line((px, y0), (px, y1), BLACK, 1.0, ui, None);
        let label = format!("{x:.2}");
        canvas.text(&label, px, y1 + gap, tick_scale, BLACK, Anchor::Center);
    }
    for &y in &y_ticks {
        let py = frame.py(y);
        canvas.line((frame.left - tick_len, py), (frame.left, py), BLACK, 1.0, ui, None);
        canvas.text(
            &format!("{y:.1}"),
            frame.left - tick_len - gap,
            py - Canvas::line_height(tick_scale) / 2.0,
            tick_scale,
            BLACK,
            Anchor::Right,
        );
    }

    // Title, axis labels, caption.
    let center_x = config.width as f32 / 2.0;
    canvas.text(&config.title, center_x, 30.0 * ui, title_scale, BLACK, Anchor::Center);
    let x_label_y = frame.bottom() + tick_len + gap * 3.0 + Canvas::line_height(tick_scale);
    let plot_center_x = frame.left + frame.width / 2.0;
    canvas.text("Effect Size", plot_center_x, x_label_y, label_scale, BLACK, Anchor::Center);
    let plot_center_y = frame.top + frame.height / 2.0;
    canvas.text_vertical("Density", 24.0 * ui, plot_center_y, label_scale, BLACK);
    if config.show_caption {
        let y = x_label_y + Canvas::line_height(label_scale) + gap * 3.0;
        canvas.text(CAPTION, center_x, y, tick_scale, GRAY, Anchor::Center);
    }

    if config.show_legend {
        let entries = legend_entries(config, &palette);
        draw_legend(&mut canvas, &frame, &entries, tick_scale, ui);
    }

    let png = canvas.encode_png()?;
    log::debug!(
        "rendered power plot: {}x{} px, {} grid points, {} bytes",
        config.width,
        config.height,
        curves.xs.len(),
        png.len()
    );
    Ok(PlotArtifact { png })
}

fn text_scale(base: f32, ui: f32) -> u32 {
    ((base * ui).round() as u32).max(1)
}

/// Contiguous index ranges of `0..len` where `pred` holds.
fn runs(len: usize, pred: impl Fn(usize) -> bool) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = None;
    for i in 0..len {
        match (pred(i), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(s..len);
    }
    out
}

fn trace(frame: &Frame, xs: &[f64], ys: &[f64]) -> Vec<(f32, f32)> {
    xs.iter()
        .zip(ys)
        .map(|(&x, &y)| (frame.px(x), frame.py(y)))
        .collect()
}

/// Area between the curve and the x axis over `run`.
fn region_outline(frame: &Frame, xs: &[f64], ys: &[f64], run: Range<usize>) -> Vec<(f32, f32)> {
    let (first, last) = (xs[run.start], xs[run.end - 1]);
    let mut points = Vec::with_capacity(run.len() + 2);
    points.push((frame.px(first), frame.py(0.0)));
    points.extend(trace(frame, &xs[run.clone()], &ys[run]));
    points.push((frame.px(last), frame.py(0.0)));
    points
}

enum Swatch {
    Line { dashed: bool },
    Patch { alpha: f32 },
}

struct LegendEntry {
    swatch: Swatch,
    color: Rgb,
    label: &'static str,
}

fn legend_entries(config: &PlotConfig, palette: &Palette) -> Vec<LegendEntry> {
    vec![
        LegendEntry {
            swatch: Swatch::Line { dashed: false },
            color: palette.null,
            label: "H0: No Effect (Null Hypothesis)",
        },
        LegendEntry {
            swatch: Swatch::Line { dashed: false },
            color: palette.alt,
            label: "H1: Detectable Effect (Alternative Hypothesis)",
        },
        LegendEntry {
            swatch: Swatch::Line { dashed: true },
            color: palette.null_mean,
            label: "H0 Mean",
        },
        LegendEntry {
            swatch: Swatch::Line { dashed: true },
            color: palette.alt_mean,
            label: "H1 Mean (MDE)",
        },
        LegendEntry {
            swatch: Swatch::Patch {
                alpha: config.shade_alpha,
            },
            color: palette.null,
            label: "Type I Error (alpha)",
        },
        LegendEntry {
            swatch: Swatch::Patch {
                alpha: config.shade_alpha,
            },
            color: palette.alt,
            label: "Type II Error (beta)",
        },
    ]
}

fn draw_legend(canvas: &mut Canvas, frame: &Frame, entries: &[LegendEntry], scale: u32, ui: f32) {
    let row_height = Canvas::line_height(scale) + 10.0 * ui;
    let swatch_width = 36.0 * ui;
    let pad = 12.0 * ui;
    let label_width = entries
        .iter()
        .map(|e| glyphs::text_width(e.label))
        .max()
        .unwrap_or(0) as f32
        * scale as f32;

    let width = pad * 3.0 + swatch_width + label_width;
    let height = pad * 2.0 + row_height * entries.len() as f32 - 10.0 * ui;
    let x = frame.right() - width - pad;
    let y = frame.top + pad;

    // Drop shadow, box, border.
    canvas.fill_rect(x + 4.0 * ui, y + 4.0 * ui, width, height, BLACK, 0.15);
    canvas.fill_rect(x, y, width, height, WHITE, 1.0);
    canvas.stroke_rect(x, y, width, height, GRAY, ui);

    for (i, entry) in entries.iter().enumerate() {
        let top = y + pad + i as f32 * row_height;
        let mid = top + Canvas::line_height(scale) / 2.0;
        let sx = x + pad;
        match entry.swatch {
            Swatch::Line { dashed } => {
                let dash = dashed.then_some([6.0 * ui, 4.0 * ui]);
                let end = (sx + swatch_width, mid);
                canvas.line((sx, mid), end, entry.color, 1.0, 2.0 * ui, dash);
            }
            Swatch::Patch { alpha } => {
                let h = Canvas::line_height(scale);
                canvas.fill_rect(sx, top, swatch_width, h, entry.color, alpha);
            }
        }
        canvas.text(entry.label, sx + swatch_width + pad, top, scale, BLACK, Anchor::Left);
    }
}

/// Roughly `target` evenly spaced round values inside `[lo, hi]`.
fn ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) || target == 0 {
        return Vec::new();
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&s| s >= raw)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            // Avoid printing "-0.00".
            if v == 0.0 { 0.0 } else { v }
        })
        .collect()
}
