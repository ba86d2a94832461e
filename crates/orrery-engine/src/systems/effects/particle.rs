//! Explosion bursts: fixed-size point clouds flung radially from an origin.

use glam::Vec3;
use crate::components::mesh::Color;
use super::geometry::EffectVertex;
use super::rng::Rng;

/// How burst particles are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BurstColor {
    /// Every particle shifts from `start` to `end` as it ages.
    AgeGradient { start: Color, end: Color },
    /// Each particle picks a fixed color between `a` and `b` at spawn.
    RandomBetween { a: Color, b: Color },
}

/// Parameters for spawning a burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstConfig {
    /// Number of particles (fixed for the burst's lifetime).
    pub count: usize,
    /// Min/max initial speed magnitude.
    pub speed_range: (f32, f32),
    /// Seconds a particle stays visible.
    pub lifespan: f32,
    /// Velocity multiplier applied once per step.
    pub friction: f32,
    /// Multiplier on velocity during integration.
    pub speed_scale: f32,
    /// Rendered point size.
    pub size: f32,
    pub color: BurstColor,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            count: 250,
            speed_range: (0.5, 2.5),
            lifespan: 2.0,
            friction: 0.98,
            speed_scale: 1.0,
            size: 0.5,
            color: BurstColor::AgeGradient {
                start: Color::WHITE,
                end: Color::WHITE,
            },
        }
    }
}

impl BurstConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_range = (min, max);
        self
    }

    pub fn with_lifespan(mut self, lifespan: f32) -> Self {
        self.lifespan = lifespan;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_speed_scale(mut self, scale: f32) -> Self {
        self.speed_scale = scale;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: BurstColor) -> Self {
        self.color = color;
        self
    }
}

/// A single burst particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since the burst started.
    pub age: f32,
    color: Color,
}

impl Particle {
    /// Opacity for a given lifespan: fades linearly from 1 to 0.
    pub fn opacity(&self, lifespan: f32) -> f32 {
        if lifespan <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / lifespan).max(0.0)
    }

    pub fn is_alive(&self, lifespan: f32) -> bool {
        self.age < lifespan
    }
}

/// A fixed-count point cloud. No particles are ever added after spawn;
/// the burst is spent once every particle has outlived the lifespan.
#[derive(Debug, Clone)]
pub struct ParticleBurst {
    pub origin: Vec3,
    particles: Vec<Particle>,
    config: BurstConfig,
}

impl ParticleBurst {
    /// Spawn `config.count` particles at `origin` with uniformly random
    /// directions and speeds drawn from `config.speed_range`.
    pub fn spawn(origin: Vec3, config: BurstConfig, rng: &mut Rng) -> Self {
        let (min_speed, max_speed) = config.speed_range;
        let particles = (0..config.count)
            .map(|_| {
                let velocity = rng.unit_vector() * rng.range(min_speed, max_speed);
                let color = match config.color {
                    BurstColor::AgeGradient { start, .. } => start,
                    BurstColor::RandomBetween { a, b } => a.lerp(b, rng.next_f32()),
                };
                Particle {
                    position: origin,
                    velocity,
                    age: 0.0,
                    color,
                }
            })
            .collect();
        Self {
            origin,
            particles,
            config,
        }
    }

    /// Advance every particle by `dt`. Live particles integrate their velocity,
    /// then lose a fixed fraction of it to friction. Age always advances.
    pub fn step(&mut self, dt: f32) {
        let lifespan = self.config.lifespan;
        for p in &mut self.particles {
            if p.is_alive(lifespan) {
                p.position += p.velocity * self.config.speed_scale * dt;
                p.velocity *= self.config.friction;
            }
            p.age += dt;
        }
    }

    /// Whether every particle has outlived the lifespan.
    pub fn is_spent(&self) -> bool {
        self.particles.iter().all(|p| !p.is_alive(self.config.lifespan))
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Append one point vertex per live particle.
    pub fn push_vertices(&self, out: &mut Vec<EffectVertex>) {
        let lifespan = self.config.lifespan;
        for p in self.particles.iter().filter(|p| p.is_alive(lifespan)) {
            let color = match self.config.color {
                BurstColor::AgeGradient { start, end } => start.lerp(end, (p.age / lifespan).min(1.0)),
                BurstColor::RandomBetween { .. } => p.color,
            };
            out.push(EffectVertex::new(p.position, self.config.size, color, p.opacity(lifespan)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(count: usize, lifespan: f32) -> ParticleBurst {
        let mut rng = Rng::new(42);
        let config = BurstConfig::default()
            .with_count(count)
            .with_lifespan(lifespan)
            .with_speed_range(1.0, 3.0);
        ParticleBurst::spawn(Vec3::new(5.0, 0.0, 0.0), config, &mut rng)
    }

    #[test]
    fn spawns_at_origin_with_bounded_speeds() {
        let b = burst(300, 2.0);
        assert_eq!(b.len(), 300);
        for p in b.particles() {
            assert_eq!(p.position, Vec3::new(5.0, 0.0, 0.0));
            let speed = p.velocity.length();
            assert!((1.0 - 1e-4..3.0 + 1e-4).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn count_is_constant_over_lifetime() {
        let mut b = burst(200, 1.0);
        for _ in 0..120 {
            b.step(1.0 / 60.0);
            assert_eq!(b.len(), 200);
        }
    }

    #[test]
    fn opacity_never_increases() {
        let mut b = burst(10, 1.0);
        let mut last: Vec<f32> = b.particles().iter().map(|p| p.opacity(1.0)).collect();
        for _ in 0..90 {
            b.step(1.0 / 60.0);
            for (p, prev) in b.particles().iter().zip(last.iter_mut()) {
                let now = p.opacity(1.0);
                assert!(now <= *prev + 1e-6);
                *prev = now;
            }
        }
        assert!(b.particles().iter().all(|p| p.opacity(1.0) == 0.0));
    }

    #[test]
    fn friction_decays_velocity() {
        let mut b = burst(5, 10.0);
        let before = b.particles()[0].velocity.length();
        b.step(1.0 / 60.0);
        let after = b.particles()[0].velocity.length();
        assert!((after - before * 0.98).abs() < 1e-4);
    }

    #[test]
    fn spent_after_lifespan() {
        let mut b = burst(20, 0.5);
        assert!(!b.is_spent());
        for _ in 0..29 {
            b.step(1.0 / 60.0);
        }
        assert!(!b.is_spent());
        for _ in 0..3 {
            b.step(1.0 / 60.0);
        }
        assert!(b.is_spent());
        let mut verts = Vec::new();
        b.push_vertices(&mut verts);
        assert!(verts.is_empty());
    }

    #[test]
    fn particles_move_outward() {
        let mut b = burst(50, 2.0);
        for _ in 0..10 {
            b.step(1.0 / 60.0);
        }
        for p in b.particles() {
            assert!((p.position - b.origin).length() > 0.0);
        }
    }
}
