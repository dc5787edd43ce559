//! Proximity connections between particles
//!
//! Connections are rebuilt from scratch every frame with a brute-force pass
//! over all unordered pairs. Particle counts are derived from the surface area,
//! so `n` stays in the tens to low hundreds and the quadratic cost is fine.

use crate::Particle;

/// A line between two nearby particles, valid for the current frame only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle in the current set
    pub from: usize,
    /// Index of the second particle (always greater than `from`)
    pub to: usize,
    /// Line opacity
    pub alpha: f32,
}

/// Opacity of a connection at `distance`, or `None` if the pair is too far
/// apart. Fades linearly from `max_alpha` at distance 0 to zero at
/// `max_distance`.
#[inline]
pub fn connection_alpha(distance: f32, max_distance: f32, max_alpha: f32) -> Option<f32> {
    if distance < max_distance {
        Some((1.0 - distance / max_distance) * max_alpha)
    } else {
        None
    }
}

/// Replace the contents of `out` with every pair closer than `max_distance`.
pub fn find_connections(
    particles: &[Particle],
    max_distance: f32,
    max_alpha: f32,
    out: &mut Vec<Connection>,
) {
    out.clear();

    for (i, a) in particles.iter().enumerate() {
        let pa = a.pos();
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let distance = pa.distance(b.pos());
            if let Some(alpha) = connection_alpha(distance, max_distance, max_alpha) {
                out.push(Connection {
                    from: i,
                    to: j,
                    alpha,
                });
            }
        }
    }
}
