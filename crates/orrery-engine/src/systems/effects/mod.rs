//! Visual effects system: particle bursts, line segments and polylines.
//!
//! Games own their effect state (bursts, beams) and write vertices here during
//! the render pass. `EffectsState` packs them into one flat buffer for the host:
//! point vertices first, then line-segment vertex pairs.

mod rng;
mod geometry;
mod particle;

// Re-export public types
pub use rng::Rng;
pub use geometry::{EffectVertex, segment, circle_xz};
pub use particle::{Particle, ParticleBurst, BurstConfig, BurstColor};

use glam::Vec3;
use crate::components::mesh::Color;

/// Per-frame effect vertex staging plus the shared effects RNG.
pub struct EffectsState {
    pub points: Vec<EffectVertex>,
    pub lines: Vec<EffectVertex>,
    pub effects_buffer: Vec<EffectVertex>,
    pub rng: Rng,
    max_vertices: usize,
    packed_points: usize,
}

impl EffectsState {
    /// Create a new EffectsState with the given RNG seed.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, 4096)
    }

    /// Create a new EffectsState with a pre-allocated vertex capacity.
    pub fn with_capacity(seed: u64, max_vertices: usize) -> Self {
        EffectsState {
            points: Vec::with_capacity(max_vertices),
            lines: Vec::new(),
            effects_buffer: Vec::with_capacity(max_vertices),
            rng: Rng::new(seed.wrapping_add(7919)),
            max_vertices,
            packed_points: 0,
        }
    }

    /// Spawn a burst using the shared RNG.
    pub fn spawn_burst(&mut self, origin: Vec3, config: BurstConfig) -> ParticleBurst {
        ParticleBurst::spawn(origin, config, &mut self.rng)
    }

    /// Queue point vertices for every live particle of a burst.
    pub fn add_burst(&mut self, burst: &ParticleBurst) {
        burst.push_vertices(&mut self.points);
    }

    /// Queue a single line segment.
    pub fn add_segment(&mut self, start: Vec3, end: Vec3, width: f32, color: Color, alpha: f32) {
        self.lines.extend_from_slice(&segment(start, end, width, color, alpha));
    }

    /// Queue pre-built segment vertex pairs (e.g. from `circle_xz`).
    pub fn add_lines(&mut self, verts: &[EffectVertex]) {
        debug_assert!(verts.len() % 2 == 0, "line vertices come in pairs");
        self.lines.extend_from_slice(verts);
    }

    /// Drop staged vertices (call at the start of each render pass).
    pub fn clear_frame(&mut self) {
        self.points.clear();
        self.lines.clear();
    }

    /// Rebuild the packed buffer: points, then line vertices.
    /// Anything past the vertex capacity is dropped; lines only in whole pairs.
    pub fn rebuild_effects_buffer(&mut self) {
        self.effects_buffer.clear();
        let points = self.points.len().min(self.max_vertices);
        let room = self.max_vertices - points;
        let lines = self.lines.len().min(room) & !1;
        if points + lines < self.points.len() + self.lines.len() {
            log::warn!(
                "effects buffer full: dropping {} vertices",
                self.points.len() + self.lines.len() - points - lines
            );
        }
        self.effects_buffer.extend_from_slice(&self.points[..points]);
        self.effects_buffer.extend_from_slice(&self.lines[..lines]);
        self.packed_points = points;
    }

    /// Clear all effects.
    pub fn clear(&mut self) {
        self.clear_frame();
        self.effects_buffer.clear();
        self.packed_points = 0;
    }

    pub fn effects_vertex_count(&self) -> usize {
        self.effects_buffer.len()
    }

    /// Number of point vertices at the front of the packed buffer.
    pub fn point_count(&self) -> usize {
        self.packed_points
    }

    pub fn effects_buffer_ptr(&self) -> *const f32 {
        self.effects_buffer.as_ptr() as *const f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_points_before_lines() {
        let mut effects = EffectsState::new(42);
        let burst = effects.spawn_burst(Vec3::ZERO, BurstConfig::default().with_count(10));
        effects.add_segment(Vec3::ZERO, Vec3::X, 0.2, Color::WHITE, 1.0);
        effects.add_burst(&burst);
        effects.rebuild_effects_buffer();

        assert_eq!(effects.point_count(), 10);
        assert_eq!(effects.effects_vertex_count(), 12);
        assert_eq!(effects.effects_buffer[10].pos(), Vec3::ZERO);
        assert_eq!(effects.effects_buffer[11].pos(), Vec3::X);
    }

    #[test]
    fn clear_frame_drops_staged_lines() {
        let mut effects = EffectsState::new(1);
        effects.add_lines(&circle_xz(3.0, 0.0, 8, 0.1, Color::WHITE, 0.5));
        assert_eq!(effects.lines.len(), 16);
        effects.clear_frame();
        effects.rebuild_effects_buffer();
        assert_eq!(effects.effects_vertex_count(), 0);
    }

    #[test]
    fn same_seed_same_bursts() {
        let mut a = EffectsState::new(9);
        let mut b = EffectsState::new(9);
        let config = BurstConfig::default().with_count(4);
        let ba = a.spawn_burst(Vec3::ZERO, config);
        let bb = b.spawn_burst(Vec3::ZERO, config);
        for (pa, pb) in ba.particles().iter().zip(bb.particles()) {
            assert_eq!(pa.velocity, pb.velocity);
        }
    }

    #[test]
    fn capacity_drops_overflow_in_whole_pairs() {
        let mut effects = EffectsState::with_capacity(3, 13);
        let burst = effects.spawn_burst(Vec3::ZERO, BurstConfig::default().with_count(10));
        effects.add_burst(&burst);
        effects.add_segment(Vec3::ZERO, Vec3::X, 0.2, Color::WHITE, 1.0);
        effects.add_segment(Vec3::ZERO, Vec3::Y, 0.2, Color::WHITE, 1.0);
        effects.rebuild_effects_buffer();
        assert_eq!(effects.point_count(), 10);
        assert_eq!(effects.effects_vertex_count(), 12);
    }

    #[test]
    fn effects_state_clear() {
        let mut effects = EffectsState::new(42);
        effects.add_segment(Vec3::ZERO, Vec3::Y, 1.0, Color::WHITE, 1.0);
        effects.rebuild_effects_buffer();
        effects.clear();
        assert!(effects.points.is_empty());
        assert!(effects.lines.is_empty());
        assert_eq!(effects.effects_vertex_count(), 0);
    }
}
