use std::ops::Range;

use crate::paint::Color;

/// Render pipeline description, generic over the device's shader module type.
///
/// Pipelines built from this have an automatic layout and no vertex buffers;
/// vertex positions come from the vertex index alone.
pub struct PipelineDesc<'a, M> {
    pub label: &'a str,
    pub module: &'a M,
    pub vertex_entry: &'a str,
    pub fragment_entry: &'a str,
    /// Single color target; must match the configured surface format.
    pub target_format: wgpu::TextureFormat,
    pub topology: wgpu::PrimitiveTopology,
}

/// Non-indexed draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub vertices: Range<u32>,
    pub instances: Range<u32>,
}

impl DrawCall {
    /// One triangle, one instance.
    pub fn triangle() -> Self {
        Self { vertices: 0..3, instances: 0..1 }
    }
}

/// One render pass over the frame's color view: clear, bind, draw, end.
pub struct PassDesc<'a, P> {
    pub label: &'a str,
    pub pipeline: &'a P,
    pub clear: Color,
    pub draw: DrawCall,
}
