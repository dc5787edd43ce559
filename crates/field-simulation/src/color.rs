/// RGBA color with sRGB-encoded components in [0, 1]
///
/// Compositing happens directly on the encoded values, the same way a 2D
/// canvas blends, so gradients and glows match what a browser would draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// From 8-bit channels, keeping the sRGB encoding
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Same color at opacity `alpha`
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Multiply the alpha channel
    pub fn fade(mut self, factor: f32) -> Self {
        self.a *= factor;
        self
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Colors of the default field
pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::rgb8(0, 0, 0);
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    /// `#0a0a0a`
    pub const NEAR_BLACK: Color = Color::rgb8(10, 10, 10);
    pub const LAVENDER: Color = Color::rgb8(169, 136, 212);
    pub const VIOLET: Color = Color::rgb8(139, 111, 192);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_roundtrip_is_exact() {
        assert_eq!(palette::LAVENDER.to_rgba8(), [169, 136, 212, 255]);
        assert_eq!(Color::from_rgba8(1, 2, 3, 4).to_rgba8(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_lerp_color() {
        let black = Color::rgb(0.0, 0.0, 0.0);
        let white = Color::rgb(1.0, 1.0, 1.0);
        let gray = black.lerp(white, 0.5);

        assert_eq!(gray.r, 0.5);
        assert_eq!(gray.g, 0.5);
        assert_eq!(gray.b, 0.5);
        assert_eq!(gray.a, 1.0);
    }

    #[test]
    fn test_fade() {
        let c = palette::WHITE.with_alpha(0.5).fade(0.5);
        assert_eq!(c.a, 0.25);
    }
}
