use crate::assets::registry::TextureId;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Linear blend: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Blend mode used by the host when drawing an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Alpha,
    /// Additive blending for glow effects (src-alpha, one).
    Additive,
}

/// Mesh primitive. The host owns the actual geometry; the engine only names it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Textured sphere.
    Sphere { radius: f32 },
    /// Flat annulus lying in the local XZ plane.
    Ring { inner: f32, outer: f32 },
    /// Camera-facing quad.
    Billboard { size: f32 },
}

impl Shape {
    /// Wire code written into the render instance.
    pub fn code(&self) -> f32 {
        match self {
            Shape::Sphere { .. } => 0.0,
            Shape::Ring { .. } => 1.0,
            Shape::Billboard { .. } => 2.0,
        }
    }

    /// Characteristic size: sphere radius, ring outer radius, billboard edge.
    pub fn extent(&self) -> f32 {
        match *self {
            Shape::Sphere { radius } => radius,
            Shape::Ring { outer, .. } => outer,
            Shape::Billboard { size } => size,
        }
    }
}

/// Component for host-rendered meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    /// Tint (or emissive color for glowing bodies).
    pub color: Color,
    /// Texture handle resolved from the manifest; `None` draws flat color.
    pub texture: Option<TextureId>,
    /// Emissive intensity (0.0 = lit only by the scene lights).
    pub emissive: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub blend: BlendMode,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere { radius: 1.0 },
            color: Color::WHITE,
            texture: None,
            emissive: 0.0,
            alpha: 1.0,
            blend: BlendMode::Alpha,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(Shape::Sphere { radius }, color)
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self::new(Shape::Ring { inner, outer }, color)
    }

    pub fn billboard(size: f32, color: Color) -> Self {
        Self::new(Shape::Billboard { size }, color)
    }

    pub fn with_texture(mut self, texture: Option<TextureId>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_lerp_endpoints() {
        let a = Color::new(1.0, 0.5, 0.0);
        let b = Color::new(0.0, 0.0, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn shape_extent_and_codes() {
        assert_eq!(Shape::Sphere { radius: 3.0 }.extent(), 3.0);
        assert_eq!(Shape::Ring { inner: 2.0, outer: 5.0 }.extent(), 5.0);
        assert_eq!(Shape::Billboard { size: 6.0 }.code(), 2.0);
    }

    #[test]
    fn builder_sets_fields() {
        let m = MeshComponent::sphere(2.0, Color::WHITE)
            .with_emissive(2.0)
            .with_alpha(0.5)
            .with_blend(BlendMode::Additive);
        assert_eq!(m.emissive, 2.0);
        assert_eq!(m.alpha, 0.5);
        assert_eq!(m.blend, BlendMode::Additive);
        assert!(m.texture.is_none());
    }
}
