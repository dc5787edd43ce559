//! # Particle Field Renderer
//!
//! A software raster [`Canvas`] the animator draws into, and a wgpu
//! [`Presenter`] that puts the canvas on screen.

pub mod canvas;
pub mod presenter;

pub use canvas::*;
pub use presenter::*;
