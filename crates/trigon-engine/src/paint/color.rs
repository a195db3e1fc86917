/// Linear straight-alpha RGBA color.
///
/// Used for render-pass clear values; the triangle's own color lives in the
/// shader.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Background the triangle is drawn over.
    pub const BACKGROUND: Self = Self::gray(0.1);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray with all three channels set to `v`.
    #[inline]
    pub const fn gray(v: f32) -> Self {
        Self::rgba(v, v, v, 1.0)
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        c.to_wgpu()
    }
}
