/// Circular orbit math. Pure functions, no engine dependencies.
///
/// Orbits lie in the XZ plane around a center, with a fixed vertical offset.
/// Nothing here validates radius or speed; zero or negative values simply
/// give degenerate or reversed orbits.

use glam::Vec3;

/// Fraction of the remaining gap an aligned body closes per step.
pub const ALIGN_SMOOTHING: f32 = 0.05;

/// Position on a circular orbit at time `t`:
/// `(cos(t·s·f)·r, y, sin(t·s·f)·r)`.
pub fn orbit_position(t: f32, angular_speed: f32, speed_multiplier: f32, radius: f32, y: f32) -> Vec3 {
    let angle = t * angular_speed * speed_multiplier;
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Move `current` toward `target` by `factor` of the remaining distance.
pub fn smooth_toward(current: Vec3, target: Vec3, factor: f32) -> Vec3 {
    current + (target - current) * factor
}

/// Per-body orbit record, advanced once per step.
///
/// The angle accumulates `angular_speed · multiplier · dt`, which matches
/// `orbit_position(t, ..)` while the multiplier is constant and avoids a jump
/// when the multiplier changes mid-orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub angle: f32,
    pub radius: f32,
    /// Radians per second at multiplier 1.
    pub angular_speed: f32,
    pub vertical_offset: f32,
}

impl OrbitState {
    pub fn new(radius: f32, angular_speed: f32) -> Self {
        Self {
            angle: 0.0,
            radius,
            angular_speed,
            vertical_offset: 0.0,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_vertical_offset(mut self, y: f32) -> Self {
        self.vertical_offset = y;
        self
    }

    pub fn advance(&mut self, dt: f32, speed_multiplier: f32) {
        self.angle = (self.angle + self.angular_speed * speed_multiplier * dt).rem_euclid(std::f32::consts::TAU);
    }

    /// Offset from the orbit center.
    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.radius,
            self.vertical_offset,
            self.angle.sin() * self.radius,
        )
    }

    /// Position around `center`.
    pub fn position_around(&self, center: Vec3) -> Vec3 {
        center + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planar_distance_equals_radius() {
        for i in 0..50 {
            let t = i as f32 * 0.37;
            let p = orbit_position(t, 0.6, 1.7, 36.05, 2.0);
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!((planar - 36.05).abs() < 1e-3, "t={t}: {planar}");
            assert_eq!(p.y, 2.0);
        }
    }

    #[test]
    fn starts_on_positive_x() {
        let p = orbit_position(0.0, 2.5, 1.0, 23.51, 0.0);
        assert!((p - Vec3::new(23.51, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn accumulated_angle_matches_closed_form() {
        let mut orbit = OrbitState::new(30.6, 0.97);
        let dt = 1.0 / 60.0;
        for _ in 0..120 {
            orbit.advance(dt, 1.5);
        }
        let expected = orbit_position(120.0 * dt, 0.97, 1.5, 30.6, 0.0);
        assert!((orbit.offset() - expected).length() < 1e-2);
    }

    #[test]
    fn zero_speed_stays_put() {
        let mut orbit = OrbitState::new(10.0, 0.0).with_angle(1.0);
        let before = orbit.offset();
        orbit.advance(1.0, 3.0);
        assert_eq!(orbit.offset(), before);
    }

    #[test]
    fn smoothing_converges() {
        let target = Vec3::new(25.0, 0.0, 0.0);
        let mut p = Vec3::new(0.0, 0.0, 23.0);
        let initial = (target - p).length();
        for _ in 0..100 {
            p = smooth_toward(p, target, ALIGN_SMOOTHING);
        }
        let expected = initial * (1.0 - ALIGN_SMOOTHING).powi(100);
        assert!(((target - p).length() - expected).abs() < 1e-3);
    }

    #[test]
    fn position_around_center() {
        let orbit = OrbitState::new(3.0, 0.4).with_vertical_offset(0.5);
        let center = Vec3::new(10.0, 0.0, -4.0);
        let p = orbit.position_around(center);
        assert!((Vec3::new(p.x - center.x, 0.0, p.z - center.z).length() - 3.0).abs() < 1e-5);
        assert_eq!(p.y, 0.5);
    }
}
