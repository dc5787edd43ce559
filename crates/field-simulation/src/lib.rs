//! # Particle Field Simulation
//!
//! The particle-field animator: parameters, the surface and host traits it is
//! driven through, and the Stopped/Running state machine that owns the
//! per-frame update and draw cycle.

pub mod animator;
pub mod color;
pub mod error;
pub mod host;
pub mod paint;
pub mod params;
pub mod surface;

pub use animator::*;
pub use color::*;
pub use error::*;
pub use host::*;
pub use params::*;
pub use surface::*;
