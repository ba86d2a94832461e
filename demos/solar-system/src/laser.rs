/// Laser beams: short-lived segments from the camera toward a fired-at point.
/// Width and opacity fall linearly to zero over the shot's lifetime.

use glam::Vec3;
use orrery_engine::{Color, EffectsState};

pub const LASER_DURATION: f32 = 0.6;
pub const LASER_WIDTH: f32 = 0.6;
pub const LASER_COLOR: Color = Color::new(1.0, 0.1, 0.1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserShot {
    pub target: Vec3,
    /// Unit vector from the camera toward the target, fixed at fire time.
    pub direction: Vec3,
    /// Camera-to-target distance at fire time.
    pub length: f32,
    pub started_at: f32,
    pub duration: f32,
}

impl LaserShot {
    pub fn new(origin: Vec3, target: Vec3, now: f32) -> Self {
        let to_target = target - origin;
        Self {
            target,
            direction: to_target.normalize_or_zero(),
            length: to_target.length(),
            started_at: now,
            duration: LASER_DURATION,
        }
    }

    /// 0 at fire time, 1 when the shot expires.
    pub fn progress(&self, now: f32) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).max(0.0)
    }

    pub fn is_expired(&self, now: f32) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn width(&self, now: f32) -> f32 {
        LASER_WIDTH * (1.0 - self.progress(now)).max(0.0)
    }

    pub fn opacity(&self, now: f32) -> f32 {
        (1.0 - self.progress(now)).max(0.0)
    }

    /// Beam segment starting at the current camera position.
    pub fn segment(&self, origin: Vec3) -> (Vec3, Vec3) {
        (origin, origin + self.direction * self.length)
    }
}

/// All live shots.
#[derive(Debug, Default)]
pub struct LaserBeams {
    shots: Vec<LaserShot>,
}

impl LaserBeams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire(&mut self, origin: Vec3, target: Vec3, now: f32) {
        self.shots.push(LaserShot::new(origin, target, now));
    }

    /// Drop expired shots.
    pub fn prune(&mut self, now: f32) {
        self.shots.retain(|s| !s.is_expired(now));
    }

    pub fn clear(&mut self) {
        self.shots.clear();
    }

    pub fn len(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Queue one line segment per live shot.
    pub fn push_segments(&self, effects: &mut EffectsState, origin: Vec3, now: f32) {
        for shot in self.shots.iter().filter(|s| !s.is_expired(now)) {
            let (start, end) = shot.segment(origin);
            effects.add_segment(start, end, shot.width(now), LASER_COLOR, shot.opacity(now));
        }
    }
}
