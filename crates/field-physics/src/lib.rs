//! # Particle Field Physics
//!
//! Core state for the decorative particle field: drifting points that bounce
//! off the surface edges, and the proximity connections derived from them.

pub mod connections;
pub mod constants;
pub mod particle;

pub use connections::*;
pub use constants::*;
pub use particle::*;
