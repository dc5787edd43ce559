//! Default tuning constants for the particle field
//!
//! All distances are in surface units (pixels) and all velocities in units per
//! frame, so the look of the field is tied to the display refresh rate.

/// Surface area (in square units) that yields one particle
pub const DEFAULT_DENSITY: f32 = 15_000.0;

/// Particles closer than this are joined by a connection line
pub const DEFAULT_CONNECTION_DISTANCE: f32 = 150.0;

/// Opacity of a connection between two coincident particles
pub const DEFAULT_CONNECTION_ALPHA: f32 = 0.3;

/// Full width of the per-axis velocity range; each axis samples
/// `[-speed / 2, speed / 2)`
pub const DEFAULT_SPEED: f32 = 0.3;

/// Core radius range
pub const DEFAULT_SIZE_MIN: f32 = 1.0;
pub const DEFAULT_SIZE_MAX: f32 = 3.0;

/// Core opacity range
pub const DEFAULT_ALPHA_MIN: f32 = 0.2;
pub const DEFAULT_ALPHA_MAX: f32 = 0.7;

/// Glow radius as a multiple of the core radius
pub const GLOW_RADIUS_MULTIPLIER: f32 = 4.0;

/// Glow centre opacity as a fraction of the core opacity
pub const GLOW_ALPHA_SCALE: f32 = 0.5;

/// Vignette radius as a fraction of the surface width
pub const VIGNETTE_RADIUS_FACTOR: f32 = 0.7;

/// Vignette centre opacity
pub const VIGNETTE_ALPHA: f32 = 0.03;

/// Number of particles for a surface of the given size.
///
/// Returns `floor(width * height / density)`. A non-positive density yields
/// an empty field.
pub fn particle_count(width: u32, height: u32, density: f32) -> usize {
    if density <= 0.0 {
        return 0;
    }
    let area = width as f64 * height as f64;
    (area / density as f64).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_from_area() {
        assert_eq!(particle_count(1500, 800, 15_000.0), 80);
        assert_eq!(particle_count(1920, 1080, 15_000.0), 138);
        assert_eq!(particle_count(100, 100, 15_000.0), 0);
    }

    #[test]
    fn test_count_empty_surface() {
        assert_eq!(particle_count(0, 1080, DEFAULT_DENSITY), 0);
        assert_eq!(particle_count(1920, 1080, 0.0), 0);
    }
}
