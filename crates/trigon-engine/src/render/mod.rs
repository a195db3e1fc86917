//! Renderer bootstrap.
//!
//! One linear procedure: check the API, acquire adapter and device, configure
//! the canvas, compile the fixed shader, build the single pipeline, draw one
//! frame. See [`on_ready`].

mod bootstrap;
mod config;
mod error;

pub use bootstrap::{bootstrap, on_ready, Triangle};
pub use config::SceneConfig;
pub use error::BootstrapError;
