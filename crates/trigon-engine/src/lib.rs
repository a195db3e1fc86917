//! Trigon engine crate.
//!
//! Owns the platform + GPU pieces that bring up a device and paint the
//! triangle: the platform seam and its wgpu implementation, the renderer
//! bootstrap, and the winit runtime that triggers it.

pub mod device;
pub mod window;
pub mod render;
pub mod shader;

pub mod logging;
pub mod paint;
