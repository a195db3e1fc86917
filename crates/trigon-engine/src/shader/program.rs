use std::fmt;

use naga::ShaderStage;

/// WGSL source of the triangle program.
pub const TRIANGLE_WGSL: &str = include_str!("triangle.wgsl");

/// Why a source was rejected as a render program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// WGSL front-end diagnostic, rendered against the source.
    Parse(String),
    Missing(ShaderStage),
    Duplicate {
        stage: ShaderStage,
        first: String,
        second: String,
    },
    /// Entry point for a stage a render pipeline cannot use.
    Unexpected {
        stage: ShaderStage,
        name: String,
    },
}

fn stage_name(stage: ShaderStage) -> &'static str {
    match stage {
        ShaderStage::Vertex => "vertex",
        ShaderStage::Fragment => "fragment",
        ShaderStage::Compute => "compute",
        _ => "non-render",
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(diagnostic) => write!(f, "WGSL parse error: {diagnostic}"),
            Self::Missing(stage) => write!(f, "shader has no {} entry point", stage_name(*stage)),
            Self::Duplicate { stage, first, second } => write!(
                f,
                "shader has more than one {} entry point (`{first}`, `{second}`)",
                stage_name(*stage)
            ),
            Self::Unexpected { stage, name } => write!(
                f,
                "shader declares {} entry point `{name}`",
                stage_name(*stage)
            ),
        }
    }
}

impl std::error::Error for ShaderError {}

/// A render program: WGSL source with exactly one vertex and one fragment
/// entry point.
#[derive(Debug, Clone)]
pub struct ShaderProgram<'s> {
    source: &'s str,
    vertex: String,
    fragment: String,
}

impl<'s> ShaderProgram<'s> {
    pub fn parse(source: &'s str) -> Result<Self, ShaderError> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|err| ShaderError::Parse(err.emit_to_string(source)))?;

        let mut vertex: Option<String> = None;
        let mut fragment: Option<String> = None;

        for ep in module.entry_points {
            let slot = match ep.stage {
                ShaderStage::Vertex => &mut vertex,
                ShaderStage::Fragment => &mut fragment,
                stage => return Err(ShaderError::Unexpected { stage, name: ep.name }),
            };

            if let Some(first) = slot {
                return Err(ShaderError::Duplicate {
                    stage: ep.stage,
                    first: first.clone(),
                    second: ep.name,
                });
            }
            *slot = Some(ep.name);
        }

        Ok(Self {
            source,
            vertex: vertex.ok_or(ShaderError::Missing(ShaderStage::Vertex))?,
            fragment: fragment.ok_or(ShaderError::Missing(ShaderStage::Fragment))?,
        })
    }

    /// The built-in triangle program.
    pub fn triangle() -> Result<ShaderProgram<'static>, ShaderError> {
        ShaderProgram::parse(TRIANGLE_WGSL)
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn vertex_entry(&self) -> &str {
        &self.vertex
    }

    pub fn fragment_entry(&self) -> &str {
        &self.fragment
    }
}
