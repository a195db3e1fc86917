use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::device::{GpuInit, WgpuDevice, WgpuPlatform};
use crate::render::{self, SceneConfig, Triangle};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trigon".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the canvas window and runs until it is closed.
    ///
    /// The bootstrap runs on the window's first redraw; a missing GPU API or
    /// adapter leaves the window empty. Other bootstrap failures end the loop
    /// and are returned.
    pub fn run(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Result<()> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

enum Stage {
    /// Window not drawn yet.
    Waiting,
    /// Frame submitted; resources stay alive with the window.
    Drawn(#[allow(dead_code)] Triangle<WgpuDevice>),
    /// Bootstrap gave up (already logged).
    Abandoned,
}

struct AppState {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: SceneConfig,

    // Drop order: GPU objects before the window they render into.
    stage: Stage,
    window: Option<Arc<Window>>,

    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig) -> Self {
        Self {
            config,
            gpu_init,
            scene,
            stage: Stage::Waiting,
            window: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn create_window(&self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create canvas window")?;

        Ok(Arc::new(window))
    }

    /// Handles the ready event: registers the window as the scene's canvas
    /// and runs the bootstrap with its single frame.
    fn ready(&mut self, window: Arc<Window>) -> Result<()> {
        let mut platform = WgpuPlatform::new(self.gpu_init.clone());
        platform.register_canvas(self.scene.canvas_id.clone(), Arc::clone(&window))?;

        window.pre_present_notify();
        let triangle = pollster::block_on(render::on_ready(&mut platform, &self.scene))?;

        self.stage = match triangle {
            Some(triangle) => Stage::Drawn(triangle),
            None => Stage::Abandoned,
        };
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        match self.create_window(event_loop) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            // Only the first redraw does anything: the triangle is drawn once.
            WindowEvent::RedrawRequested => {
                if !matches!(self.stage, Stage::Waiting) {
                    return;
                }
                let Some(window) = self.window.clone() else {
                    return;
                };

                if let Err(err) = self.ready(window) {
                    self.stage = Stage::Abandoned;
                    self.fail(event_loop, err.context("renderer bootstrap failed"));
                }
            }

            _ => {}
        }
    }
}
