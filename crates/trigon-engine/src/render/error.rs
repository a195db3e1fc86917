use std::fmt;

use crate::shader::ShaderError;

/// Why the renderer bootstrap stopped before drawing.
#[derive(Debug)]
pub enum BootstrapError {
    /// No graphics API on this platform.
    Unsupported,
    /// The API exists but offered no adapter.
    NoAdapter,
    Shader(ShaderError),
    /// Device, canvas or surface failure reported by the platform.
    Platform(anyhow::Error),
}

impl BootstrapError {
    /// The two conditions the bootstrap reports and then quietly gives up on.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Unsupported | Self::NoAdapter)
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsupported => f.write_str("GPU API is not supported on this platform"),
            Self::NoAdapter => f.write_str("no GPU adapter found"),
            Self::Shader(_) => f.write_str("invalid shader program"),
            // Transparent: the platform error already carries its own context chain.
            Self::Platform(err) => write!(f, "{err:#}"),
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Shader(err) => Some(err),
            Self::Unsupported | Self::NoAdapter | Self::Platform(_) => None,
        }
    }
}

impl From<ShaderError> for BootstrapError {
    fn from(err: ShaderError) -> Self {
        Self::Shader(err)
    }
}

impl From<anyhow::Error> for BootstrapError {
    fn from(err: anyhow::Error) -> Self {
        Self::Platform(err)
    }
}
