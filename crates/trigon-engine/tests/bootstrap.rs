use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;
use std::sync::Once;

use anyhow::{Result, anyhow};
use log::{Level, LevelFilter, Metadata, Record};

use trigon_engine::device::{PassDesc, PipelineDesc, Platform, RenderDevice};
use trigon_engine::paint::Color;
use trigon_engine::render::{bootstrap, on_ready, BootstrapError, SceneConfig};
use trigon_engine::shader::ShaderProgram;

// ── recording fake platform ───────────────────────────────────────────────

const DEVICE_ID: u32 = 7;
const PREFERRED: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    GpuAvailable,
    RequestAdapter,
    RequestDevice,
    Canvas(String),
    PreferredFormat,
    ConfigureSurface { device: u32, canvas: String, format: wgpu::TextureFormat },
    CreateShaderModule { vertex: String, fragment: String },
    CreateRenderPipeline { format: wgpu::TextureFormat, vertex: String, fragment: String },
    BeginFrame,
    EncodePass { clear: Color, vertices: Range<u32>, instances: Range<u32> },
    Submit { passes: u32 },
}

type Calls = Rc<RefCell<Vec<Call>>>;

struct FakePlatform {
    calls: Calls,
    api: bool,
    adapter: bool,
    device: bool,
    canvases: Vec<String>,
}

impl FakePlatform {
    fn new() -> Self {
        Self {
            calls: Calls::default(),
            api: true,
            adapter: true,
            device: true,
            canvases: vec![SceneConfig::DEFAULT_CANVAS_ID.to_string()],
        }
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

struct FakeAdapter;

struct FakeDevice {
    id: u32,
    calls: Calls,
}

struct FakeCanvas {
    id: String,
}

struct FakeFrame {
    passes: u32,
}

impl Platform for FakePlatform {
    type Adapter = FakeAdapter;
    type Device = FakeDevice;

    fn gpu_available(&self) -> bool {
        self.record(Call::GpuAvailable);
        self.api
    }

    async fn request_adapter(&self) -> Option<FakeAdapter> {
        self.record(Call::RequestAdapter);
        self.adapter.then_some(FakeAdapter)
    }

    async fn request_device(&self, _adapter: &FakeAdapter) -> Result<FakeDevice> {
        self.record(Call::RequestDevice);
        if !self.device {
            return Err(anyhow!("device lost during creation"));
        }
        Ok(FakeDevice { id: DEVICE_ID, calls: Rc::clone(&self.calls) })
    }

    fn canvas(&mut self, id: &str) -> Result<FakeCanvas> {
        self.record(Call::Canvas(id.to_string()));
        let index = self
            .canvases
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| anyhow!("canvas `{id}` not found"))?;
        Ok(FakeCanvas { id: self.canvases.swap_remove(index) })
    }

    fn preferred_format(&self, _adapter: &FakeAdapter, _canvas: &FakeCanvas) -> Result<wgpu::TextureFormat> {
        self.record(Call::PreferredFormat);
        Ok(PREFERRED)
    }
}

impl FakeDevice {
    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl RenderDevice for FakeDevice {
    type Surface = FakeCanvas;
    type ShaderModule = (String, String);
    type Pipeline = ();
    type Frame = FakeFrame;

    fn configure_surface(&self, surface: &mut FakeCanvas, format: wgpu::TextureFormat) {
        self.record(Call::ConfigureSurface { device: self.id, canvas: surface.id.clone(), format });
    }

    fn create_shader_module(&self, program: &ShaderProgram<'_>) -> (String, String) {
        let entries = (program.vertex_entry().to_string(), program.fragment_entry().to_string());
        self.record(Call::CreateShaderModule { vertex: entries.0.clone(), fragment: entries.1.clone() });
        entries
    }

    fn create_render_pipeline(&self, desc: &PipelineDesc<'_, (String, String)>) {
        assert_eq!(desc.module.0, desc.vertex_entry);
        assert_eq!(desc.module.1, desc.fragment_entry);
        assert_eq!(desc.topology, wgpu::PrimitiveTopology::TriangleList);
        self.record(Call::CreateRenderPipeline {
            format: desc.target_format,
            vertex: desc.vertex_entry.to_string(),
            fragment: desc.fragment_entry.to_string(),
        });
    }

    fn begin_frame(&self, _surface: &FakeCanvas) -> Result<FakeFrame> {
        self.record(Call::BeginFrame);
        Ok(FakeFrame { passes: 0 })
    }

    fn encode_pass(&self, frame: &mut FakeFrame, pass: &PassDesc<'_, ()>) {
        frame.passes += 1;
        self.record(Call::EncodePass {
            clear: pass.clear,
            vertices: pass.draw.vertices.clone(),
            instances: pass.draw.instances.clone(),
        });
    }

    fn submit(&self, frame: FakeFrame) {
        self.record(Call::Submit { passes: frame.passes });
    }
}

// ── error capture ─────────────────────────────────────────────────────────

thread_local! {
    static ERRORS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        if record.level() == Level::Error {
            ERRORS.with(|e| e.borrow_mut().push(record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static LOGGER_INIT: Once = Once::new();

/// Runs `f` and returns the error lines it logged on this thread.
fn capture_errors<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
    LOGGER_INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger in this test binary");
        log::set_max_level(LevelFilter::Trace);
    });
    ERRORS.with(|e| e.borrow_mut().clear());
    let out = f();
    let errors: Vec<String> = ERRORS.with(|e| e.borrow_mut().drain(..).collect());
    (out, errors)
}

fn run_ready(platform: &mut FakePlatform) -> (bool, Vec<String>) {
    let (result, errors) =
        capture_errors(|| pollster::block_on(on_ready(platform, &SceneConfig::default())));
    let drawn = result.expect("modeled failures are not returned").is_some();
    (drawn, errors)
}

fn position(calls: &[Call], pred: impl Fn(&Call) -> bool) -> usize {
    calls.iter().position(pred).expect("call not recorded")
}

// ── modeled failures ──────────────────────────────────────────────────────

#[test]
fn unsupported_api_stops_before_any_other_call() {
    let mut platform = FakePlatform::new();
    platform.api = false;

    let (drawn, errors) = run_ready(&mut platform);

    assert!(!drawn);
    assert_eq!(platform.calls(), vec![Call::GpuAvailable]);
    assert_eq!(errors, vec!["GPU API is not supported on this platform".to_string()]);
}

#[test]
fn missing_adapter_stops_before_device_surface_and_pipeline() {
    let mut platform = FakePlatform::new();
    platform.adapter = false;

    let (drawn, errors) = run_ready(&mut platform);

    assert!(!drawn);
    assert_eq!(platform.calls(), vec![Call::GpuAvailable, Call::RequestAdapter]);
    assert_eq!(errors, vec!["no GPU adapter found".to_string()]);
}

#[test]
fn bootstrap_returns_typed_errors() {
    let mut platform = FakePlatform::new();
    platform.api = false;
    let err = pollster::block_on(bootstrap(&mut platform, &SceneConfig::default()))
        .err()
        .expect("bootstrap must fail");
    assert!(matches!(err, BootstrapError::Unsupported));
    assert!(err.is_expected());

    let mut platform = FakePlatform::new();
    platform.adapter = false;
    let err = pollster::block_on(bootstrap(&mut platform, &SceneConfig::default()))
        .err()
        .expect("bootstrap must fail");
    assert!(matches!(err, BootstrapError::NoAdapter));
}

// ── unmodeled failures propagate ──────────────────────────────────────────

#[test]
fn device_failure_is_returned_not_logged() {
    let mut platform = FakePlatform::new();
    platform.device = false;

    let (result, errors) =
        capture_errors(|| pollster::block_on(on_ready(&mut platform, &SceneConfig::default())));

    let err = result.err().expect("device failure propagates");
    assert!(err.to_string().contains("device lost"));
    assert!(errors.is_empty());
    assert!(!platform.calls().iter().any(|c| matches!(c, Call::ConfigureSurface { .. })));
}

#[test]
fn unknown_canvas_is_a_platform_error() {
    let mut platform = FakePlatform::new();
    let scene = SceneConfig { canvas_id: "missing".to_string(), ..SceneConfig::default() };

    let err = pollster::block_on(bootstrap(&mut platform, &scene))
        .err()
        .expect("lookup must fail");

    assert!(matches!(err, BootstrapError::Platform(_)));
    assert_eq!(err.to_string(), "canvas `missing` not found");
}

// ── happy path ────────────────────────────────────────────────────────────

#[test]
fn surface_configured_once_with_device_and_preferred_format() {
    let mut platform = FakePlatform::new();

    let (drawn, errors) = run_ready(&mut platform);
    assert!(drawn);
    assert!(errors.is_empty());

    let configures: Vec<Call> = platform
        .calls()
        .into_iter()
        .filter(|c| matches!(c, Call::ConfigureSurface { .. }))
        .collect();
    assert_eq!(
        configures,
        vec![Call::ConfigureSurface {
            device: DEVICE_ID,
            canvas: SceneConfig::DEFAULT_CANVAS_ID.to_string(),
            format: PREFERRED,
        }]
    );
}

#[test]
fn pipeline_created_once_between_setup_and_first_draw() {
    let mut platform = FakePlatform::new();
    let (drawn, _) = run_ready(&mut platform);
    assert!(drawn);

    let calls = platform.calls();
    let pipelines = calls.iter().filter(|c| matches!(c, Call::CreateRenderPipeline { .. })).count();
    assert_eq!(pipelines, 1);

    let shader = position(&calls, |c| matches!(c, Call::CreateShaderModule { .. }));
    let configure = position(&calls, |c| matches!(c, Call::ConfigureSurface { .. }));
    let pipeline = position(&calls, |c| matches!(c, Call::CreateRenderPipeline { .. }));
    let frame = position(&calls, |c| *c == Call::BeginFrame);
    let submit = position(&calls, |c| matches!(c, Call::Submit { .. }));

    assert!(shader < pipeline);
    assert!(configure < pipeline);
    assert!(pipeline < frame);
    assert!(pipeline < submit);

    assert_eq!(
        calls[pipeline],
        Call::CreateRenderPipeline {
            format: PREFERRED,
            vertex: "main_vertex".to_string(),
            fragment: "main_fragment".to_string(),
        }
    );
}

#[test]
fn one_pass_one_draw_of_three_vertices_one_submission() {
    let mut platform = FakePlatform::new();
    let (drawn, _) = run_ready(&mut platform);
    assert!(drawn);

    let calls = platform.calls();
    let frame_calls: Vec<&Call> = calls
        .iter()
        .filter(|c| matches!(c, Call::BeginFrame | Call::EncodePass { .. } | Call::Submit { .. }))
        .collect();

    assert_eq!(
        frame_calls,
        vec![
            &Call::BeginFrame,
            &Call::EncodePass {
                clear: Color::rgba(0.1, 0.1, 0.1, 1.0),
                vertices: 0..3,
                instances: 0..1,
            },
            &Call::Submit { passes: 1 },
        ]
    );
}

#[test]
fn full_call_sequence_follows_setup_order() {
    let mut platform = FakePlatform::new();
    let (drawn, _) = run_ready(&mut platform);
    assert!(drawn);

    let kinds: Vec<&'static str> = platform
        .calls()
        .iter()
        .map(|c| match c {
            Call::GpuAvailable => "available",
            Call::RequestAdapter => "adapter",
            Call::RequestDevice => "device",
            Call::Canvas(_) => "canvas",
            Call::PreferredFormat => "format",
            Call::ConfigureSurface { .. } => "configure",
            Call::CreateShaderModule { .. } => "shader",
            Call::CreateRenderPipeline { .. } => "pipeline",
            Call::BeginFrame => "frame",
            Call::EncodePass { .. } => "pass",
            Call::Submit { .. } => "submit",
        })
        .collect();

    assert_eq!(
        kinds,
        [
            "available", "adapter", "device", "canvas", "format", "configure", "shader",
            "pipeline", "frame", "pass", "submit",
        ]
    );
}

#[test]
fn custom_clear_color_reaches_the_pass() {
    let mut platform = FakePlatform::new();
    let scene = SceneConfig { clear_color: Color::gray(0.5), ..SceneConfig::default() };

    let triangle = pollster::block_on(on_ready(&mut platform, &scene))
        .expect("bootstrap succeeds")
        .expect("frame drawn");

    assert_eq!(triangle.format(), PREFERRED);
    assert!(platform.calls().contains(&Call::EncodePass {
        clear: Color::gray(0.5),
        vertices: 0..3,
        instances: 0..1,
    }));
}
