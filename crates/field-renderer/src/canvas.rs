//! CPU raster target
//!
//! RGBA8 pixels with straight (non-premultiplied) alpha. Shapes are clipped to
//! the canvas, edges get one pixel of coverage anti-aliasing, and everything
//! except [`DrawContext::fill`] composites source-over.

use field_simulation::{Color, DrawContext, Surface};
use glam::Vec2;

pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    /// Raw RGBA8 bytes, row-major, top row first
    pub fn pixels(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Pixel rows and columns overlapping `[min, max]`, clipped to the canvas
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32);
        let y1 = max.y.ceil().min(self.height as f32);
        if !(x0 < x1 && y0 < y1) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Source-over `color` onto one pixel, its alpha scaled by `coverage`
    #[inline]
    fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        let Some(dst) = self.pixels.get_mut(index) else {
            return;
        };

        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let channel = |s: f32, d: u8| {
            let d = d as f32 / 255.0;
            let c = (s * sa + d * da * (1.0 - sa)) / out_a;
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        };
        *dst = [
            channel(color.r, dst[0]),
            channel(color.g, dst[1]),
            channel(color.b, dst[2]),
            (out_a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ];
    }

    fn each_in_disc(&mut self, center: Vec2, radius: f32, mut shade: impl FnMut(f32) -> Color) {
        if !(radius > 0.0) {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(center - reach, center + reach) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = shade(d);
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

impl DrawContext for Canvas {
    fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_rgba8());
    }

    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, start: Color, end: Color, width: f32) {
        let half = width.max(0.0) * 0.5;
        let reach = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - reach, from.max(to) + reach) else {
            return;
        };

        let along = to - from;
        let length_sq = along.length_squared();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if length_sq > 0.0 {
                    ((p - from).dot(along) / length_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + along * t);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, start.lerp(end, t), coverage);
                }
            }
        }
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        self.each_in_disc(center, radius, |d| inner.lerp(outer, (d / radius).min(1.0)));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.each_in_disc(center, radius, |_| color);
    }

    fn fill_radial_rect(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        for y in 0..self.height {
            for x in 0..self.width {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let t = if radius > 0.0 {
                    (d / radius).min(1.0)
                } else {
                    1.0
                };
                self.blend(x, y, inner.lerp(outer, t), 1.0);
            }
        }
    }
}

impl Surface for Canvas {
    type Context = Canvas;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0; 4]);
    }

    fn context(&mut self) -> Option<&mut Canvas> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_simulation::palette;

    #[test]
    fn test_fill_is_opaque_background() {
        let mut canvas = Canvas::new(4, 3);
        canvas.fill(palette::NEAR_BLACK);
        assert!(canvas.pixels().chunks(4).all(|p| p == [10u8, 10, 10, 255]));
        assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
    }

    #[test]
    fn test_circle_covers_centre_not_corner() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill(palette::BLACK);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 3.0, palette::WHITE);

        assert_eq!(canvas.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_half_alpha_blends_over_black() {
        let mut canvas = Canvas::new(8, 8);
        canvas.fill(palette::BLACK);
        canvas.fill_circle(Vec2::new(4.0, 4.0), 3.0, palette::WHITE.with_alpha(0.5));

        let [r, g, b, a] = canvas.pixel(4, 4).unwrap();
        assert!((127..=128).contains(&r));
        assert_eq!((r, g, b, a), (r, r, r, 255));
    }

    #[test]
    fn test_radial_fades_outwards() {
        let mut canvas = Canvas::new(40, 40);
        canvas.fill(palette::BLACK);
        canvas.fill_radial(
            Vec2::new(20.0, 20.0),
            12.0,
            palette::WHITE,
            palette::WHITE.with_alpha(0.0),
        );

        let centre = canvas.pixel(20, 20).unwrap()[0];
        let mid = canvas.pixel(26, 20).unwrap()[0];
        let edge = canvas.pixel(31, 20).unwrap()[0];
        assert!(centre > mid && mid > edge);
        assert_eq!(canvas.pixel(39, 39), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_line_gradient_runs_start_to_end() {
        let mut canvas = Canvas::new(32, 4);
        canvas.fill(palette::BLACK);
        canvas.stroke_gradient_line(
            Vec2::new(0.0, 2.0),
            Vec2::new(32.0, 2.0),
            Color::rgb(1.0, 0.0, 0.0),
            Color::rgb(0.0, 0.0, 1.0),
            2.0,
        );

        let left = canvas.pixel(1, 1).unwrap();
        let right = canvas.pixel(30, 1).unwrap();
        assert!(left[0] > left[2]);
        assert!(right[2] > right[0]);
    }

    #[test]
    fn test_shapes_clip_at_edges() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill(palette::BLACK);
        canvas.fill_circle(Vec2::new(-2.0, -2.0), 5.0, palette::WHITE);
        canvas.fill_radial(Vec2::new(50.0, 50.0), 3.0, palette::WHITE, palette::WHITE);
        canvas.stroke_gradient_line(
            Vec2::new(-20.0, -20.0),
            Vec2::new(-5.0, -5.0),
            palette::WHITE,
            palette::WHITE,
            1.0,
        );

        assert_eq!(canvas.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(9, 9), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_vignette_tints_centre() {
        let mut canvas = Canvas::new(50, 30);
        canvas.fill(palette::BLACK);
        canvas.fill_radial_rect(
            Vec2::new(25.0, 15.0),
            35.0,
            palette::WHITE.with_alpha(0.5),
            palette::WHITE.with_alpha(0.0),
        );

        assert!(canvas.pixel(25, 15).unwrap()[0] > canvas.pixel(0, 0).unwrap()[0]);
    }

    #[test]
    fn test_empty_canvas_has_no_context() {
        let mut canvas = Canvas::new(0, 0);
        assert!(canvas.context().is_none());

        canvas.set_size(3, 2);
        assert!(canvas.context().is_some());
        assert_eq!(canvas.pixels().len(), 24);
    }
}
