//! Draws one frame of the field onto a [`DrawContext`]

use crate::{DrawContext, FieldParams};
use field_physics::{Connection, Particle};
use glam::Vec2;

/// Clear to the background color
pub fn clear(ctx: &mut impl DrawContext, params: &FieldParams) {
    ctx.fill(params.background);
}

/// Connections, then glows and cores, then the vignette
pub fn draw_field(
    ctx: &mut impl DrawContext,
    params: &FieldParams,
    particles: &[Particle],
    connections: &[Connection],
    width: f32,
    height: f32,
) {
    if let Some(style) = &params.connections {
        for c in connections {
            let (Some(a), Some(b)) = (particles.get(c.from), particles.get(c.to)) else {
                continue;
            };
            ctx.stroke_gradient_line(
                a.pos(),
                b.pos(),
                style.start_color.with_alpha(c.alpha),
                style.end_color.with_alpha(c.alpha),
                style.line_width,
            );
        }
    }

    for p in particles {
        let center = p.pos();
        let core = params.particle_color.with_alpha(p.alpha);
        if let Some(glow) = &params.glow {
            ctx.fill_radial(
                center,
                p.size * glow.radius_multiplier,
                core.fade(glow.alpha_scale),
                core.with_alpha(0.0),
            );
        }
        ctx.fill_circle(center, p.size, core);
    }

    if let Some(vignette) = &params.vignette {
        ctx.fill_radial_rect(
            Vec2::new(width, height) * 0.5,
            width * vignette.radius_factor,
            vignette.color.with_alpha(vignette.alpha),
            vignette.color.with_alpha(0.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[derive(Default)]
    struct Recorder {
        glows: Vec<(f32, Color, Color)>,
        cores: Vec<Color>,
    }

    impl DrawContext for Recorder {
        fn fill(&mut self, _: Color) {}
        fn stroke_gradient_line(&mut self, _: Vec2, _: Vec2, _: Color, _: Color, _: f32) {}
        fn fill_radial(&mut self, _: Vec2, radius: f32, inner: Color, outer: Color) {
            self.glows.push((radius, inner, outer));
        }
        fn fill_circle(&mut self, _: Vec2, _: f32, color: Color) {
            self.cores.push(color);
        }
        fn fill_radial_rect(&mut self, _: Vec2, _: f32, _: Color, _: Color) {}
    }

    #[test]
    fn test_glow_is_faded_core() {
        let params = FieldParams::constellation();
        let particles = [Particle::new(0, Vec2::new(10.0, 10.0), Vec2::ZERO, 2.0, 0.6)];
        let mut ctx = Recorder::default();
        draw_field(&mut ctx, &params, &particles, &[], 100.0, 100.0);

        let core = ctx.cores[0];
        assert_eq!(core, params.particle_color.with_alpha(0.6));

        let (radius, inner, outer) = ctx.glows[0];
        assert_eq!(radius, 8.0);
        assert!((inner.a - 0.3).abs() < 1e-6);
        assert_eq!((inner.r, inner.g, inner.b), (core.r, core.g, core.b));
        assert_eq!(outer.a, 0.0);
    }
}
