//! Colors handed to the GPU (clear values).

mod color;

pub use color::Color;
