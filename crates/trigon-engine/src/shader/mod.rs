//! Embedded WGSL program.
//!
//! The source is handed to the device unmodified. Before that, naga's WGSL
//! front end parses it to check there is exactly one vertex and one fragment
//! entry point, and to record their names for pipeline creation.

mod program;

pub use program::{ShaderError, ShaderProgram, TRIANGLE_WGSL};
