//! Tunable look of the particle field

use crate::color::{palette, Color};
use crate::ParamsError;
use field_physics::{
    particle_count, SpawnRanges, Span, DEFAULT_ALPHA_MAX, DEFAULT_ALPHA_MIN,
    DEFAULT_CONNECTION_ALPHA, DEFAULT_CONNECTION_DISTANCE, DEFAULT_DENSITY, DEFAULT_SIZE_MAX,
    DEFAULT_SIZE_MIN, DEFAULT_SPEED, GLOW_ALPHA_SCALE, GLOW_RADIUS_MULTIPLIER, VIGNETTE_ALPHA,
    VIGNETTE_RADIUS_FACTOR,
};

/// Lines between nearby particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionStyle {
    /// Pairs at or beyond this distance are not connected
    pub max_distance: f32,
    /// Opacity of a zero-length connection
    pub max_alpha: f32,
    /// Gradient color at the `from` end
    pub start_color: Color,
    /// Gradient color at the `to` end
    pub end_color: Color,
    pub line_width: f32,
}

/// Soft halo drawn behind each particle core
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowStyle {
    /// Halo radius as a multiple of the core radius
    pub radius_multiplier: f32,
    /// Halo centre opacity as a fraction of the particle's alpha
    pub alpha_scale: f32,
}

/// Faint radial tint over the whole surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VignetteStyle {
    pub color: Color,
    /// Centre opacity; fades to transparent at the radius
    pub alpha: f32,
    /// Radius as a fraction of the surface width
    pub radius_factor: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Surface area per particle
    pub density: f32,
    /// Constant particle count, ignoring `density`
    pub fixed_count: Option<usize>,
    /// Full width of the per-axis velocity range
    pub speed: f32,
    pub size: Span,
    pub alpha: Span,
    pub background: Color,
    pub particle_color: Color,
    pub connections: Option<ConnectionStyle>,
    pub glow: Option<GlowStyle>,
    pub vignette: Option<VignetteStyle>,
}

impl FieldParams {
    /// Lavender points joined by gradient lines, with glows and a vignette
    pub fn constellation() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            fixed_count: None,
            speed: DEFAULT_SPEED,
            size: Span::new(DEFAULT_SIZE_MIN, DEFAULT_SIZE_MAX),
            alpha: Span::new(DEFAULT_ALPHA_MIN, DEFAULT_ALPHA_MAX),
            background: palette::NEAR_BLACK,
            particle_color: palette::LAVENDER,
            connections: Some(ConnectionStyle {
                max_distance: DEFAULT_CONNECTION_DISTANCE,
                max_alpha: DEFAULT_CONNECTION_ALPHA,
                start_color: palette::LAVENDER,
                end_color: palette::VIOLET,
                line_width: 1.0,
            }),
            glow: Some(GlowStyle {
                radius_multiplier: GLOW_RADIUS_MULTIPLIER,
                alpha_scale: GLOW_ALPHA_SCALE,
            }),
            vignette: Some(VignetteStyle {
                color: palette::LAVENDER,
                alpha: VIGNETTE_ALPHA,
                radius_factor: VIGNETTE_RADIUS_FACTOR,
            }),
        }
    }

    /// Plain faint white dots on black, no lines or glow
    pub fn dust() -> Self {
        Self {
            // Only read once a density override clears `fixed_count`
            density: DEFAULT_DENSITY,
            fixed_count: Some(80),
            speed: 0.4,
            size: Span::new(0.5, 2.5),
            alpha: Span::fixed(0.25),
            background: palette::BLACK,
            particle_color: palette::WHITE,
            connections: None,
            glow: None,
            vignette: None,
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self.fixed_count = None;
        self
    }

    /// Particle count for a surface of the given size
    pub fn particle_count(&self, width: u32, height: u32) -> usize {
        match self.fixed_count {
            Some(count) => count,
            None => particle_count(width, height, self.density),
        }
    }

    pub fn spawn_ranges(&self) -> SpawnRanges {
        SpawnRanges {
            speed: self.speed,
            size: self.size,
            alpha: self.alpha,
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.fixed_count.is_none() && !(self.density > 0.0) {
            return Err(ParamsError::NonPositiveDensity(self.density));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ParamsError::InvalidSpeed(self.speed));
        }
        check_span("size", self.size)?;
        check_span("alpha", self.alpha)?;
        check_alpha("alpha", self.alpha.min)?;
        check_alpha("alpha", self.alpha.max)?;

        if let Some(connections) = &self.connections {
            if !(connections.max_distance > 0.0) {
                return Err(ParamsError::NonPositiveDistance(connections.max_distance));
            }
            check_alpha("connection alpha", connections.max_alpha)?;
        }
        if let Some(glow) = &self.glow {
            check_alpha("glow alpha scale", glow.alpha_scale)?;
        }
        if let Some(vignette) = &self.vignette {
            check_alpha("vignette alpha", vignette.alpha)?;
        }
        Ok(())
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self::constellation()
    }
}

fn check_span(name: &'static str, span: Span) -> Result<(), ParamsError> {
    if span.is_inverted() {
        return Err(ParamsError::InvertedRange {
            name,
            min: span.min,
            max: span.max,
        });
    }
    Ok(())
}

fn check_alpha(name: &'static str, value: f32) -> Result<(), ParamsError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ParamsError::AlphaOutOfRange { name, value });
    }
    Ok(())
}
