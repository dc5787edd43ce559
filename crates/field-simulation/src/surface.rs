//! Drawing surface abstraction
//!
//! The animator never touches pixels directly. It resizes a [`Surface`] and,
//! when the surface can provide one, draws through its [`DrawContext`].

use crate::Color;
use glam::Vec2;

/// 2D drawing operations used by the field painter
///
/// All coordinates are in surface units with the origin at the top-left.
/// Every operation composites source-over onto what is already there, except
/// [`fill`](DrawContext::fill) which replaces the whole surface.
pub trait DrawContext {
    /// Replace every pixel with `color`
    fn fill(&mut self, color: Color);

    /// Line from `from` to `to` whose color runs from `start` to `end`
    fn stroke_gradient_line(&mut self, from: Vec2, to: Vec2, start: Color, end: Color, width: f32);

    /// Disc filled with a radial gradient, `inner` at the centre and `outer`
    /// at `radius`
    fn fill_radial(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    /// Solid disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Whole surface filled with a radial gradient; pixels beyond `radius`
    /// take the `outer` color
    fn fill_radial_rect(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);
}

/// A resizable raster target that may or may not be drawable yet
pub trait Surface {
    type Context: DrawContext;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resize the backing store; prior contents are discarded
    fn set_size(&mut self, width: u32, height: u32);

    /// The drawing context, or `None` while nothing can be drawn
    fn context(&mut self) -> Option<&mut Self::Context>;
}
