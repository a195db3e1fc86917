use trigon_engine::device::GpuInit;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::render::SceneConfig;
use trigon_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig {
        title: "trigon".to_string(),
        initial_size: LogicalSize::new(640.0, 480.0),
    };

    let gpu = GpuInit {
        power_preference: wgpu::PowerPreference::LowPower,
        ..GpuInit::default()
    };

    let scene = SceneConfig::default();
    log::info!("drawing into canvas `{}`", scene.canvas_id);

    Runtime::run(runtime, gpu, scene)
}
