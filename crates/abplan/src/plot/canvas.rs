//! Drawing primitives on top of a `tiny-skia` pixmap.

use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};

use crate::config::Rgb;
use crate::plot::glyphs::{self, ADVANCE, GLYPH_HEIGHT};
use crate::plot::PlotError;

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Anchor {
    Left,
    Center,
    Right,
}

/// Plot area in pixels and the data window mapped onto it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
    pub x_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Frame {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Pixel column of data value `x`.
    pub fn px(&self, x: f64) -> f32 {
        let t = (x - self.x_min) / (self.x_max - self.x_min);
        self.left + (t as f32) * self.width
    }

    /// Pixel row of data value `y` (0 at the bottom edge).
    pub fn py(&self, y: f64) -> f32 {
        let t = (y / self.y_max).clamp(0.0, 1.0);
        self.bottom() - (t as f32) * self.height
    }
}

pub(crate) fn color(rgb: Rgb, alpha: f32) -> Color {
    Color::from_rgba8(rgb.r, rgb.g, rgb.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn paint(rgb: Rgb, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(rgb, alpha));
    paint.anti_alias = true;
    paint
}

/// RGBA raster with pixel-space drawing helpers.
pub(crate) struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self, PlotError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(PlotError::Canvas { width, height })?;
        pixmap.fill(color(background, 1.0));
        Ok(Self { pixmap })
    }

    /// Straight segment; `dash` is an on/off pattern in pixels.
    pub fn line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        rgb: Rgb,
        alpha: f32,
        width: f32,
        dash: Option<[f32; 2]>,
    ) {
        self.polyline(&[from, to], rgb, alpha, width, dash);
    }

    pub fn polyline(
        &mut self,
        points: &[(f32, f32)],
        rgb: Rgb,
        alpha: f32,
        width: f32,
        dash: Option<[f32; 2]>,
    ) {
        let mut pb = PathBuilder::new();
        let mut iter = points.iter();
        let Some(&(x0, y0)) = iter.next() else {
            return;
        };
        pb.move_to(x0, y0);
        for &(x, y) in iter {
            pb.line_to(x, y);
        }
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            dash: dash.and_then(|[on, off]| StrokeDash::new(vec![on, off], 0.0)),
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(rgb, alpha),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Filled polygon, closed back to its first point.
    pub fn polygon(&mut self, points: &[(f32, f32)], rgb: Rgb, alpha: f32) {
        if points.len() < 3 {
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            pb.line_to(x, y);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &paint(rgb, alpha),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rgb: Rgb, alpha: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            let mut p = paint(rgb, alpha);
            p.anti_alias = false;
            self.pixmap
                .fill_rect(rect, &p, Transform::identity(), None);
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rgb: Rgb, width: f32) {
        let corners = [(x, y), (x + w, y), (x + w, y + h), (x, y + h), (x, y)];
        self.polyline(&corners, rgb, 1.0, width, None);
    }

    /// Horizontal bitmap text; `y` is the top of the glyph cell.
    pub fn text(&mut self, text: &str, x: f32, y: f32, scale: u32, rgb: Rgb, anchor: Anchor) {
        let width = (glyphs::text_width(text) * scale) as f32;
        let origin = match anchor {
            Anchor::Left => x,
            Anchor::Center => x - width / 2.0,
            Anchor::Right => x - width,
        };
        let s = scale as f32;
        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyphs::glyph(c) else {
                continue;
            };
            let cx = origin + (i as u32 * ADVANCE * scale) as f32;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..glyphs::GLYPH_WIDTH {
                    if bits & (0b10000 >> col) != 0 {
                        self.fill_rect(cx + col as f32 * s, y + row as f32 * s, s, s, rgb, 1.0);
                    }
                }
            }
        }
    }

    /// Bitmap text rotated a quarter turn counter-clockwise, centred on `y`.
    /// `x` is the left edge of the rotated glyph cells.
    pub fn text_vertical(&mut self, text: &str, x: f32, y: f32, scale: u32, rgb: Rgb) {
        let length = (glyphs::text_width(text) * scale) as f32;
        let s = scale as f32;
        let base = y + length / 2.0;
        for (i, c) in text.chars().enumerate() {
            let Some(rows) = glyphs::glyph(c) else {
                continue;
            };
            let advance = (i as u32 * ADVANCE * scale) as f32;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..glyphs::GLYPH_WIDTH {
                    if bits & (0b10000 >> col) != 0 {
                        let px = x + row as f32 * s;
                        let py = base - advance - (col + 1) as f32 * s;
                        self.fill_rect(px, py, s, s, rgb, 1.0);
                    }
                }
            }
        }
    }

    /// Height of a text line at `scale`.
    pub fn line_height(scale: u32) -> f32 {
        (GLYPH_HEIGHT * scale) as f32
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, PlotError> {
        self.pixmap
            .encode_png()
            .map_err(|e| PlotError::Encode(e.to_string()))
    }

    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            (c.red(), c.green(), c.blue(), c.alpha())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[test]
    fn frame_maps_corners() {
        let frame = Frame {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 200.0,
            x_min: -1.0,
            x_max: 1.0,
            y_max: 2.0,
        };
        assert_eq!(frame.px(-1.0), 100.0);
        assert_eq!(frame.px(1.0), 500.0);
        assert_eq!(frame.px(0.0), 300.0);
        assert_eq!(frame.py(0.0), 250.0);
        assert_eq!(frame.py(2.0), 50.0);
        assert_eq!(frame.py(10.0), 50.0);
    }

    #[test]
    fn text_sets_pixels() {
        let mut canvas = Canvas::new(40, 20, WHITE).unwrap();
        canvas.text("I", 0.0, 0.0, 1, BLACK, Anchor::Left);
        // Top row of 'I' is 01110.
        assert_eq!(canvas.pixel(0, 0), Some((255, 255, 255, 255)));
        assert_eq!(canvas.pixel(1, 0), Some((0, 0, 0, 255)));
        assert_eq!(canvas.pixel(2, 3), Some((0, 0, 0, 255)));
    }

    #[test]
    fn zero_sized_canvas_is_an_error() {
        assert!(matches!(
            Canvas::new(0, 10, WHITE),
            Err(PlotError::Canvas { .. })
        ));
    }
}
