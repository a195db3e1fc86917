use std::future::Future;

use anyhow::Result;

use crate::shader::ShaderProgram;

use super::desc::{PassDesc, PipelineDesc};

/// Graphics entry point: the capability the bootstrap receives instead of
/// reaching for process-wide globals.
///
/// `request_adapter` and `request_device` are the only suspension points.
pub trait Platform {
    type Adapter;
    type Device: RenderDevice;

    /// Whether a usable graphics API exists at all.
    fn gpu_available(&self) -> bool;

    /// `None` when no adapter fits.
    fn request_adapter(&self) -> impl Future<Output = Option<Self::Adapter>>;

    fn request_device(&self, adapter: &Self::Adapter) -> impl Future<Output = Result<Self::Device>>;

    /// Looks up the drawable canvas registered under `id`.
    fn canvas(&mut self, id: &str) -> Result<<Self::Device as RenderDevice>::Surface>;

    /// Output format the platform prefers for `canvas` on `adapter`.
    fn preferred_format(
        &self,
        adapter: &Self::Adapter,
        canvas: &<Self::Device as RenderDevice>::Surface,
    ) -> Result<wgpu::TextureFormat>;
}

/// Logical device: creates GPU objects and submits work.
pub trait RenderDevice {
    type Surface;
    type ShaderModule;
    type Pipeline;
    type Frame;

    fn configure_surface(&self, surface: &mut Self::Surface, format: wgpu::TextureFormat);

    fn create_shader_module(&self, program: &ShaderProgram<'_>) -> Self::ShaderModule;

    fn create_render_pipeline(&self, desc: &PipelineDesc<'_, Self::ShaderModule>) -> Self::Pipeline;

    /// Acquires the surface's current image and opens a command encoder.
    fn begin_frame(&self, surface: &Self::Surface) -> Result<Self::Frame>;

    /// Records one render pass into `frame`.
    fn encode_pass(&self, frame: &mut Self::Frame, pass: &PassDesc<'_, Self::Pipeline>);

    /// Submits the recorded commands and presents the image.
    fn submit(&self, frame: Self::Frame);
}
