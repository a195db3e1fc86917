//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the canvas window, and fires the renderer
//! bootstrap once the window is ready to be drawn.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
