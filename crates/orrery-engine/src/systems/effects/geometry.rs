//! Effect vertex format and primitive builders (points, segments, polylines).

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::Color;

/// One effect vertex as the host reads it: position, point size / line width, RGBA.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EffectVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl EffectVertex {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, size: f32, color: Color, alpha: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            size,
            r: color.r,
            g: color.g,
            b: color.b,
            a: alpha,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Two vertices for a single line segment.
pub fn segment(start: Vec3, end: Vec3, width: f32, color: Color, alpha: f32) -> [EffectVertex; 2] {
    [
        EffectVertex::new(start, width, color, alpha),
        EffectVertex::new(end, width, color, alpha),
    ]
}

/// Closed circle in the XZ plane at height `y`, as a list of segments.
pub fn circle_xz(radius: f32, y: f32, samples: usize, width: f32, color: Color, alpha: f32) -> Vec<EffectVertex> {
    if samples < 3 {
        return Vec::new();
    }
    let point = |i: usize| {
        let angle = (i as f32 / samples as f32) * std::f32::consts::TAU;
        Vec3::new(radius * angle.cos(), y, radius * angle.sin())
    };
    let mut verts = Vec::with_capacity(samples * 2);
    for i in 0..samples {
        verts.extend_from_slice(&segment(point(i), point((i + 1) % samples), width, color, alpha));
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_vertex_is_8_floats() {
        assert_eq!(std::mem::size_of::<EffectVertex>(), EffectVertex::FLOATS * 4);
    }

    #[test]
    fn circle_closes_on_itself() {
        let verts = circle_xz(10.0, 0.0, 16, 0.1, Color::WHITE, 1.0);
        assert_eq!(verts.len(), 32);
        let first = verts[0].pos();
        let last = verts[verts.len() - 1].pos();
        assert!((first - last).length() < 1e-4);
        for v in &verts {
            let planar = Vec3::new(v.x, 0.0, v.z).length();
            assert!((planar - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn degenerate_circle_is_empty() {
        assert!(circle_xz(5.0, 0.0, 2, 0.1, Color::WHITE, 1.0).is_empty());
    }
}
