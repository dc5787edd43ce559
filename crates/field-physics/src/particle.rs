//! Particle type, spawning and per-frame integration

use glam::Vec2;
use rand::Rng;

/// Closed range sampled uniformly; `min == max` always yields `min`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Single-valued span
    pub const fn fixed(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.min + rng.random::<f32>() * (self.max - self.min)
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// Ranges used when (re)generating a particle set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRanges {
    /// Full width of the velocity range per axis
    pub speed: f32,
    /// Core radius
    pub size: Span,
    /// Core opacity
    pub alpha: Span,
}

/// A single drifting point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface space
    pub position: [f32; 2],
    /// Velocity in units per frame
    pub velocity: [f32; 2],
    /// Core radius
    pub size: f32,
    /// Core opacity in [0, 1]
    pub alpha: f32,
    /// Unique per animator; never reused across regenerations
    pub id: u32,
}

impl Particle {
    pub fn new(id: u32, position: Vec2, velocity: Vec2, size: f32, alpha: f32) -> Self {
        Self {
            position: position.to_array(),
            velocity: velocity.to_array(),
            size,
            alpha,
            id,
        }
    }

    /// Random particle somewhere inside a `width x height` surface
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        id: u32,
        width: f32,
        height: f32,
        ranges: &SpawnRanges,
    ) -> Self {
        let position = Vec2::new(rng.random::<f32>() * width, rng.random::<f32>() * height);
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * ranges.speed,
            (rng.random::<f32>() - 0.5) * ranges.speed,
        );
        Self::new(
            id,
            position,
            velocity,
            ranges.size.sample(rng),
            ranges.alpha.sample(rng).clamp(0.0, 1.0),
        )
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }

    pub fn vel(&self) -> Vec2 {
        Vec2::from_array(self.velocity)
    }

    /// Advance one frame and reflect off the surface edges.
    ///
    /// The position is not clamped: a particle may sit up to one frame's
    /// velocity outside the bounds before the flipped velocity brings it back.
    pub fn step(&mut self, width: f32, height: f32) {
        self.position[0] += self.velocity[0];
        self.position[1] += self.velocity[1];

        if self.position[0] < 0.0 || self.position[0] > width {
            self.velocity[0] = -self.velocity[0];
        }
        if self.position[1] < 0.0 || self.position[1] > height {
            self.velocity[1] = -self.velocity[1];
        }
    }
}

/// Fill `out` with `count` fresh particles, dropping whatever it held.
///
/// Ids continue from `next_id`, which is advanced past the last one issued.
pub fn spawn_particles<R: Rng + ?Sized>(
    rng: &mut R,
    out: &mut Vec<Particle>,
    count: usize,
    width: f32,
    height: f32,
    ranges: &SpawnRanges,
    next_id: &mut u32,
) {
    out.clear();
    out.reserve(count);
    for _ in 0..count {
        out.push(Particle::random(rng, *next_id, width, height, ranges));
        *next_id = next_id.wrapping_add(1);
    }
}
