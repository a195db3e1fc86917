use anyhow::Result;

use crate::device::{DrawCall, PassDesc, PipelineDesc, Platform, RenderDevice};
use crate::paint::Color;
use crate::shader::ShaderProgram;

use super::{BootstrapError, SceneConfig};

/// Everything a successful bootstrap produced.
///
/// Device, configured surface and pipeline live as long as this value; none
/// of them change after creation.
pub struct Triangle<D: RenderDevice> {
    device: D,
    surface: D::Surface,
    format: wgpu::TextureFormat,
    pipeline: D::Pipeline,
    clear: Color,
}

impl<D: RenderDevice> Triangle<D> {
    /// Format the surface was configured with (and the pipeline targets).
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    /// Acquires the current image, records the clear + draw pass and submits it.
    pub fn draw_frame(&self) -> Result<()> {
        let mut frame = self.device.begin_frame(&self.surface)?;

        self.device.encode_pass(
            &mut frame,
            &PassDesc {
                label: "trigon triangle pass",
                pipeline: &self.pipeline,
                clear: self.clear,
                draw: DrawCall::triangle(),
            },
        );

        self.device.submit(frame);
        log::debug!("frame submitted");
        Ok(())
    }
}

/// Brings up device, surface, shader and pipeline on `platform`.
///
/// Stops at the first failure. `Unsupported` and `NoAdapter` are returned
/// before any device, canvas or pipeline call is made.
pub async fn bootstrap<P: Platform>(
    platform: &mut P,
    scene: &SceneConfig,
) -> Result<Triangle<P::Device>, BootstrapError> {
    if !platform.gpu_available() {
        return Err(BootstrapError::Unsupported);
    }

    let Some(adapter) = platform.request_adapter().await else {
        return Err(BootstrapError::NoAdapter);
    };

    let device = platform.request_device(&adapter).await?;
    log::debug!("device acquired");

    let mut surface = platform.canvas(&scene.canvas_id)?;
    let format = platform.preferred_format(&adapter, &surface)?;
    device.configure_surface(&mut surface, format);
    log::debug!("canvas `{}` configured as {format:?}", scene.canvas_id);

    let program = ShaderProgram::triangle()?;
    let module = device.create_shader_module(&program);

    let pipeline = device.create_render_pipeline(&PipelineDesc {
        label: "trigon triangle pipeline",
        module: &module,
        vertex_entry: program.vertex_entry(),
        fragment_entry: program.fragment_entry(),
        target_format: format,
        topology: wgpu::PrimitiveTopology::TriangleList,
    });
    log::debug!(
        "pipeline ready ({} -> {})",
        program.vertex_entry(),
        program.fragment_entry()
    );

    Ok(Triangle {
        device,
        surface,
        format,
        pipeline,
        clear: scene.clear_color,
    })
}

/// Ready-event entry point: bootstrap, then draw exactly one frame.
///
/// A missing API or adapter is logged once and yields `Ok(None)`; the caller
/// carries on without a picture. Any other failure is returned.
pub async fn on_ready<P: Platform>(
    platform: &mut P,
    scene: &SceneConfig,
) -> Result<Option<Triangle<P::Device>>> {
    let triangle = match bootstrap(platform, scene).await {
        Ok(triangle) => triangle,
        Err(err) if err.is_expected() => {
            log::error!("{err}");
            return Ok(None);
        }
        Err(BootstrapError::Platform(err)) => return Err(err),
        Err(err) => return Err(err.into()),
    };

    triangle.draw_frame()?;
    Ok(Some(triangle))
}
