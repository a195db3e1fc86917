use crate::paint::Color;

/// What the bootstrap draws into and with.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Identifier of the canvas the platform must already know about.
    pub canvas_id: String,

    /// Clear value of the render pass.
    pub clear_color: Color,
}

impl SceneConfig {
    pub const DEFAULT_CANVAS_ID: &'static str = "gpuCanvas";
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_id: Self::DEFAULT_CANVAS_ID.to_string(),
            clear_color: Color::BACKGROUND,
        }
    }
}
