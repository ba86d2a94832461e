/// Sun heat model: laser hits heat it up, it cools over time, grows with
/// heat, swallows planets it touches, and explodes for good past a threshold.

use glam::Vec3;
use orrery_engine::{BurstColor, BurstConfig, Color, ParticleBurst, Rng};

pub const HEAT_PER_HIT: f32 = 1.2;
pub const MAX_HEAT: f32 = 10.0;
/// Strictly above this the sun explodes.
pub const EXPLODE_HEAT: f32 = 6.0;
/// Heat lost per second while intact.
pub const COOLING_RATE: f32 = 0.2;
pub const SCALE_PER_HEAT: f32 = 0.5;

const COOL_COLOR: Color = Color::new(1.0, 0.647, 0.0);
const HOT_COLOR: Color = Color::new(0.0, 0.0, 1.0);

pub const FLARE_BASE: f32 = 6.0;
pub const FLARE_PULSE: f32 = 0.8;
pub const FLARE_FREQUENCY: f32 = 3.0;

pub fn sun_burst_config() -> BurstConfig {
    BurstConfig::default()
        .with_count(500)
        .with_speed_range(2.0, 202.0)
        .with_lifespan(5.0)
        .with_friction(0.98)
        .with_size(1.5)
        .with_color(BurstColor::AgeGradient {
            start: Color::new(1.0, 0.5, 0.0),
            end: Color::WHITE,
        })
}

/// Flare sprite size at simulation time `t`.
pub fn flare_size(t: f32) -> f32 {
    FLARE_BASE + (t * FLARE_FREQUENCY).sin() * FLARE_PULSE
}

#[derive(Debug, Clone)]
pub struct SunState {
    pub heat: f32,
    pub base_radius: f32,
    pub spin: f32,
    exploded: bool,
    burst: Option<ParticleBurst>,
}

impl SunState {
    pub fn new(base_radius: f32) -> Self {
        Self {
            heat: 0.0,
            base_radius,
            spin: 0.0,
            exploded: false,
            burst: None,
        }
    }

    pub fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub fn burst(&self) -> Option<&ParticleBurst> {
        self.burst.as_ref()
    }

    /// A laser hit. No effect once exploded.
    pub fn hit(&mut self) {
        if !self.exploded {
            self.heat = (self.heat + HEAT_PER_HIT).min(MAX_HEAT);
        }
    }

    pub fn scale(&self) -> f32 {
        1.0 + self.heat * SCALE_PER_HEAT
    }

    pub fn effective_radius(&self) -> f32 {
        self.base_radius * self.scale()
    }

    /// Orange at rest, blue at the explosion threshold.
    pub fn color(&self) -> Color {
        COOL_COLOR.lerp(HOT_COLOR, (self.heat / EXPLODE_HEAT).min(1.0))
    }

    /// Whether a body at `pos` with `radius` touches the sun.
    /// Always false once exploded.
    pub fn touches(&self, pos: Vec3, radius: f32) -> bool {
        !self.exploded && pos.length() < self.effective_radius() + radius
    }

    /// Cool down, then explode if still past the threshold.
    /// Returns `true` on the step the sun explodes.
    pub fn step(&mut self, dt: f32, spin: f32, rng: &mut Rng) -> bool {
        if self.exploded {
            if let Some(burst) = &mut self.burst {
                burst.step(dt);
                if burst.is_spent() {
                    self.burst = None;
                }
            }
            return false;
        }

        self.spin += spin;
        self.heat = (self.heat - COOLING_RATE * dt).max(0.0);
        if self.heat > EXPLODE_HEAT {
            self.exploded = true;
            self.burst = Some(ParticleBurst::spawn(Vec3::ZERO, sun_burst_config(), rng));
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn hits(n: usize) -> (SunState, bool) {
        let mut rng = Rng::new(11);
        let mut sun = SunState::new(22.0);
        for _ in 0..n {
            sun.hit();
        }
        let exploded = sun.step(DT, 0.001, &mut rng);
        (sun, exploded)
    }

    #[test]
    fn baseline_without_hits() {
        let mut rng = Rng::new(1);
        let mut sun = SunState::new(22.0);
        for _ in 0..10_000 {
            assert!(!sun.step(DT, 0.001, &mut rng));
        }
        assert_eq!(sun.heat, 0.0);
        assert_eq!(sun.scale(), 1.0);
        assert_eq!(sun.color(), COOL_COLOR);
        assert!(!sun.is_exploded());
    }

    #[test]
    fn six_hits_explode() {
        let (sun, exploded) = hits(6);
        assert!(exploded);
        assert!(sun.is_exploded());
        assert_eq!(sun.burst().map(|b| b.len()), Some(500));
    }

    #[test]
    fn four_and_five_hits_do_not() {
        for n in [4, 5] {
            let (sun, exploded) = hits(n);
            assert!(!exploded, "{n} hits");
            assert!(!sun.is_exploded());
        }
    }

    #[test]
    fn heat_is_capped() {
        let mut sun = SunState::new(22.0);
        for _ in 0..20 {
            sun.hit();
        }
        assert_eq!(sun.heat, MAX_HEAT);
        assert_eq!(sun.scale(), 6.0);
    }

    #[test]
    fn cools_at_fixed_rate() {
        let mut rng = Rng::new(1);
        let mut sun = SunState::new(22.0);
        sun.hit();
        sun.hit();
        for _ in 0..60 {
            sun.step(DT, 0.0, &mut rng);
        }
        assert!((sun.heat - (2.4 - COOLING_RATE)).abs() < 1e-3);
    }

    #[test]
    fn color_saturates_at_threshold() {
        let mut sun = SunState::new(22.0);
        for _ in 0..5 {
            sun.hit();
        }
        let c = sun.color();
        assert!(c.r < 1e-4 && c.g < 1e-4 && c.b > 0.9999);
        sun.hit();
        assert_eq!(sun.color(), HOT_COLOR);
    }

    #[test]
    fn contact_uses_scaled_radius() {
        let mut sun = SunState::new(22.0);
        let planet = Vec3::new(36.05, 0.0, 0.0);
        assert!(!sun.touches(planet, 2.0));
        for _ in 0..3 {
            sun.hit();
        }
        // scale 2.8, radius 61.6
        assert!(sun.touches(planet, 2.0));
    }

    #[test]
    fn exploded_sun_ignores_hits_and_contacts() {
        let (mut sun, _) = hits(6);
        let heat = sun.heat;
        sun.hit();
        assert_eq!(sun.heat, heat);
        assert!(!sun.touches(Vec3::ZERO, 1.0));
    }

    #[test]
    fn sun_burst_is_pruned_when_spent() {
        let (mut sun, _) = hits(6);
        let mut rng = Rng::new(2);
        for _ in 0..(6.0 / DT) as usize {
            sun.step(DT, 0.0, &mut rng);
        }
        assert!(sun.burst().is_none());
        assert!(sun.is_exploded());
    }

    #[test]
    fn flare_pulses_around_base() {
        for i in 0..100 {
            let s = flare_size(i as f32 * 0.05);
            assert!((FLARE_BASE - FLARE_PULSE..=FLARE_BASE + FLARE_PULSE).contains(&s));
        }
    }
}
