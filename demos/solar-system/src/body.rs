/// Celestial body records and their state machine.
///
/// `Orbiting → Exploding → Gone`. The explosion fires at most once; a spent
/// burst is dropped and the body becomes `Gone`, after which it has neither
/// a render instance nor effect vertices.

use glam::Vec3;
use orrery_engine::{BurstColor, BurstConfig, Color, EntityId, ParticleBurst, Rng};

use crate::orbit::{smooth_toward, OrbitState, ALIGN_SMOOTHING};

/// Planet burst tuning.
pub const PLANET_BURST_COUNT: usize = 250;
pub const PLANET_BURST_SPEED: (f32, f32) = (0.5, 2.5);
pub const PLANET_BURST_SPEED_SCALE: f32 = 10.0;
pub const PLANET_BURST_LIFESPAN: f32 = 2.0;
pub const PLANET_BURST_FRICTION: f32 = 0.98;
pub const PLANET_BURST_SIZE: f32 = 0.5;
const BURST_HOT: Color = Color::new(1.0, 0.667, 0.333);
const BURST_ASH: Color = Color::new(0.502, 0.502, 0.502);

pub fn planet_burst_config() -> BurstConfig {
    BurstConfig::default()
        .with_count(PLANET_BURST_COUNT)
        .with_speed_range(PLANET_BURST_SPEED.0, PLANET_BURST_SPEED.1)
        .with_speed_scale(PLANET_BURST_SPEED_SCALE)
        .with_lifespan(PLANET_BURST_LIFESPAN)
        .with_friction(PLANET_BURST_FRICTION)
        .with_size(PLANET_BURST_SIZE)
        .with_color(BurstColor::RandomBetween { a: BURST_HOT, b: BURST_ASH })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Index into the planet table.
    Planet(usize),
    /// Orbits the planet with this index.
    Moon { parent: usize },
    /// Sits on the planet with this index.
    Ring { parent: usize },
    /// Translucent layer on the planet with this index.
    Shell { parent: usize },
    Asteroid,
}

impl BodyKind {
    pub fn parent(&self) -> Option<usize> {
        match *self {
            BodyKind::Moon { parent } | BodyKind::Ring { parent } | BodyKind::Shell { parent } => Some(parent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum BodyState {
    Orbiting,
    Exploding(ParticleBurst),
    Gone,
}

/// Simulation record for one body. The scene entity mirrors `pos`/`spin`.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: EntityId,
    pub kind: BodyKind,
    pub orbit: OrbitState,
    /// Slot taken in aligned mode (planets only).
    pub align_target: Option<Vec3>,
    pub collision_radius: f32,
    pub texture: &'static str,
    /// Spin added per step.
    pub spin_rate: f32,
    pub pos: Vec3,
    pub spin: f32,
    pub state: BodyState,
}

impl CelestialBody {
    pub fn new(id: EntityId, kind: BodyKind, orbit: OrbitState, collision_radius: f32) -> Self {
        Self {
            id,
            kind,
            orbit,
            align_target: None,
            collision_radius,
            texture: "",
            spin_rate: 0.0,
            pos: orbit.offset(),
            spin: 0.0,
            state: BodyState::Orbiting,
        }
    }

    pub fn with_align_target(mut self, target: Vec3) -> Self {
        self.align_target = Some(target);
        self
    }

    pub fn with_texture(mut self, texture: &'static str) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_spin_rate(mut self, rate: f32) -> Self {
        self.spin_rate = rate;
        self
    }

    /// Place the body on its orbit around `center`.
    pub fn placed_around(mut self, center: Vec3) -> Self {
        self.pos = self.orbit.position_around(center);
        self
    }

    pub fn is_intact(&self) -> bool {
        matches!(self.state, BodyState::Orbiting)
    }

    /// Exploding or gone.
    pub fn is_exploded(&self) -> bool {
        !self.is_intact()
    }

    pub fn is_gone(&self) -> bool {
        matches!(self.state, BodyState::Gone)
    }

    pub fn burst(&self) -> Option<&ParticleBurst> {
        match &self.state {
            BodyState::Exploding(burst) => Some(burst),
            _ => None,
        }
    }

    /// Start the explosion at the current position. Returns `false` (and
    /// changes nothing) if the body already left `Orbiting`.
    pub fn explode(&mut self, config: BurstConfig, rng: &mut Rng) -> bool {
        if !self.is_intact() {
            return false;
        }
        self.state = BodyState::Exploding(ParticleBurst::spawn(self.pos, config, rng));
        true
    }

    /// Leave `Orbiting` straight for `Gone`, without a burst.
    pub fn vanish(&mut self) -> bool {
        if !self.is_intact() {
            return false;
        }
        self.state = BodyState::Gone;
        true
    }

    /// One step of orbital motion around `center`.
    /// Aligned planets ease toward their slot instead of orbiting.
    pub fn step_orbit(&mut self, dt: f32, speed_multiplier: f32, aligned: bool, center: Vec3) {
        if !self.is_intact() {
            return;
        }
        self.spin += self.spin_rate;
        match (aligned, self.align_target) {
            (true, Some(target)) => {
                self.pos = smooth_toward(self.pos, target, ALIGN_SMOOTHING);
            }
            _ => {
                self.orbit.advance(dt, speed_multiplier);
                self.pos = self.orbit.position_around(center);
            }
        }
    }

    /// Follow a parent without orbiting it (rings).
    pub fn step_attached(&mut self, parent_pos: Vec3) {
        if !self.is_intact() {
            return;
        }
        self.spin += self.spin_rate;
        self.pos = parent_pos;
    }

    /// Advance the burst. Returns `true` on the step the body becomes `Gone`.
    pub fn step_explosion(&mut self, dt: f32) -> bool {
        let spent = match &mut self.state {
            BodyState::Exploding(burst) => {
                burst.step(dt);
                burst.is_spent()
            }
            _ => false,
        };
        if spent {
            self.state = BodyState::Gone;
        }
        spent
    }
}
