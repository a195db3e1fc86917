use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `filter` follows the `env_logger` directive syntax
/// (e.g. "trigon_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is
/// consulted, then `default_level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    pub default_level: LevelFilter,

    /// Caps wgpu and naga internals at `warn`. Explicit directives in
    /// `filter` or `RUST_LOG` still apply on top.
    pub quiet_gpu_internals: bool,

    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            default_level: LevelFilter::Info,
            quiet_gpu_internals: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

const GPU_INTERNALS: [&str; 3] = ["wgpu_core", "wgpu_hal", "naga"];

static INIT: Once = Once::new();

/// Installs the global logger once.
///
/// Later calls are ignored, as is an already-installed logger from elsewhere
/// (test harnesses install their own).
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(config.default_level);

        if config.quiet_gpu_internals {
            for module in GPU_INTERNALS {
                builder.filter_module(module, LevelFilter::Warn);
            }
        }

        let directives = config.filter.or_else(|| std::env::var("RUST_LOG").ok());
        if let Some(directives) = directives {
            builder.parse_filters(&directives);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
