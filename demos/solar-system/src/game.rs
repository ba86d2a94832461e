/// Solar System: an interactive sandbox with orbiting planets, moons, rings, an
/// asteroid belt, a laser tool that heats the sun or blows planets apart.
///
/// UI input arrives as custom events and pointer events. Each step decodes
/// them into intents, applies the intents, then advances the simulation.

use glam::Vec3;
use orrery_engine::*;
use orrery_engine::systems::effects::circle_xz;

use crate::bodies::{self, PLANETS, PLANET_COUNT};
use crate::body::{planet_burst_config, BodyKind, CelestialBody};
use crate::laser::LaserBeams;
use crate::orbit::OrbitState;
use crate::sun::{self, SunState};

const DT: f32 = 1.0 / 60.0;

// ── Custom event kinds from the UI ───────────────────────────────────

const CUSTOM_SELECT_TOOL: u32 = 1;
const CUSTOM_TOGGLE_ALIGN: u32 = 2;
const CUSTOM_SET_SPEED: u32 = 3;
const CUSTOM_FOLLOW: u32 = 4;
const CUSTOM_CLEAR_FOLLOW: u32 = 5;
const CUSTOM_RESET: u32 = 6;
const CUSTOM_ZOOM: u32 = 7;
const CUSTOM_FIRE_LASER: u32 = 8;
/// Viewport resize (sent by worker as kind=99).
const CUSTOM_RESIZE: u32 = 99;

// ── Game event kinds to the UI ───────────────────────────────────────

pub const EVENT_FOLLOW: f32 = 1.0;
pub const EVENT_TOOL: f32 = 2.0;
pub const EVENT_FLAGS: f32 = 3.0;
pub const EVENT_SUN: f32 = 4.0;
pub const EVENT_PLANET_DESTROYED: f32 = 5.0;
pub const EVENT_SPEED: f32 = 6.0;

// ── Interaction tuning ───────────────────────────────────────────────

pub const SPEED_MIN: f32 = 0.1;
pub const SPEED_MAX: f32 = 3.0;
/// Seconds before a fired-at point is forgotten.
pub const LASER_TARGET_HOLD: f32 = 1.5;
/// Slack around a surface within which a fired-at point counts as a hit.
const LASER_HIT_SLACK: f32 = 0.5;
/// NDC distance before a press becomes a drag.
const DRAG_THRESHOLD: f32 = 0.01;
/// Radians of camera orbit per NDC unit of drag.
const ORBIT_SENSITIVITY: f32 = std::f32::consts::PI;
/// Distance multiplier per zoom step.
const ZOOM_STEP: f32 = 0.9;

const PLANET_SPIN: f32 = 0.002;
const SUN_EMISSIVE: f32 = 2.0;
/// Flare billboard edge at pulse size 1.
const FLARE_EXTENT: f32 = 3.0 * bodies::SUN_RADIUS / sun::FLARE_BASE;
const RING_ALPHA: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    None,
    Laser,
}

impl Tool {
    fn code(self) -> f32 {
        match self {
            Tool::None => 0.0,
            Tool::Laser => 1.0,
        }
    }
}

/// Discrete commands, applied in arrival order at the start of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    SelectTool(Tool),
    ToggleAlign,
    SetSpeed(f32),
    Follow(usize),
    ClearFollow,
    FireLaser(Vec3),
    /// Click at a point in normalized device coordinates.
    Pick { x: f32, y: f32 },
    /// Drag delta in normalized device coordinates.
    Orbit { dx: f32, dy: f32 },
    /// Positive zooms in.
    Zoom(f32),
    Resize { width: f32, height: f32 },
    Reset,
}

/// Callbacks that fire after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    ClearLaserTarget,
}

/// What a laser shot or click landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Hit {
    Sun(Vec3),
    Planet(usize, Vec3),
}

impl Hit {
    fn point(&self) -> Vec3 {
        match *self {
            Hit::Sun(p) | Hit::Planet(_, p) => p,
        }
    }
}

/// Global interaction state, restored wholesale on reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub tool: Tool,
    pub aligned: bool,
    /// Weak handle; stops resolving once the body is gone.
    pub followed: Option<EntityId>,
    pub destroyed: [bool; PLANET_COUNT],
    pub speed_multiplier: f32,
    pub laser_target: Option<Vec3>,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            tool: Tool::None,
            aligned: false,
            followed: None,
            destroyed: [false; PLANET_COUNT],
            speed_multiplier: 1.0,
            laser_target: None,
        }
    }
}

impl Interaction {
    fn destroyed_mask(&self) -> u32 {
        self.destroyed
            .iter()
            .enumerate()
            .filter(|(_, &d)| d)
            .fold(0, |mask, (i, _)| mask | (1 << i))
    }
}

/// Last values reported to the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Reported {
    follow: Option<usize>,
    tool: Tool,
    aligned: bool,
    destroyed_mask: u32,
    heat: f32,
    sun_exploded: bool,
    sun_scale: f32,
    speed: f32,
    mount: MountId,
}

#[derive(Debug, Clone, Copy, Default)]
struct Drag {
    start: Option<(f32, f32)>,
    last: (f32, f32),
    moved: bool,
}

pub struct SolarSystem {
    interaction: Interaction,
    sun: SunState,
    sun_id: Option<EntityId>,
    flare_id: Option<EntityId>,
    /// Indexed by planet constant.
    planets: Vec<CelestialBody>,
    /// Moons and rings.
    satellites: Vec<CelestialBody>,
    asteroids: Vec<CelestialBody>,
    /// Every textured entity with the texture name it wants.
    textured: Vec<(EntityId, &'static str)>,
    lasers: LaserBeams,
    timers: Timers<Deferred>,
    laser_clear: Option<TimerId>,
    /// Simulation seconds since the current mount.
    time: f32,
    drag: Drag,
    reported: Option<Reported>,
}

impl SolarSystem {
    pub fn new() -> Self {
        Self {
            interaction: Interaction::default(),
            sun: SunState::new(bodies::SUN_RADIUS),
            sun_id: None,
            flare_id: None,
            planets: Vec::with_capacity(PLANET_COUNT),
            satellites: Vec::new(),
            asteroids: Vec::with_capacity(bodies::ASTEROID_COUNT),
            textured: Vec::new(),
            lasers: LaserBeams::new(),
            timers: Timers::new(),
            laser_clear: None,
            time: 0.0,
            drag: Drag::default(),
            reported: None,
        }
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn sun(&self) -> &SunState {
        &self.sun
    }

    pub fn planet(&self, index: usize) -> Option<&CelestialBody> {
        self.planets.get(index)
    }

    pub fn satellites(&self) -> &[CelestialBody] {
        &self.satellites
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn laser_count(&self) -> usize {
        self.lasers.len()
    }

    /// Planet currently followed, by index.
    pub fn followed_planet(&self) -> Option<usize> {
        let id = self.interaction.followed?;
        self.planets.iter().position(|p| p.id == id)
    }

    // ── Mounting ───────────────────────────────────────────────────

    fn textured_mesh(&mut self, ctx: &EngineContext, id: EntityId, texture: &'static str, mesh: MeshComponent) -> MeshComponent {
        self.textured.push((id, texture));
        mesh.with_texture(ctx.textures.get(texture))
    }

    /// Spawn every body from initial conditions.
    fn mount(&mut self, ctx: &mut EngineContext) {
        self.textured.clear();

        // ── Sun + flare ──────────────────────────────────────────────
        let sun_id = ctx.next_id();
        let mesh = MeshComponent::sphere(bodies::SUN_RADIUS, self.sun.color()).with_emissive(SUN_EMISSIVE);
        let mesh = self.textured_mesh(ctx, sun_id, bodies::SUN_TEXTURE, mesh);
        ctx.scene.spawn(Entity::new(sun_id).with_tag("sun").with_mesh(mesh));
        self.sun_id = Some(sun_id);

        let flare_id = ctx.next_id();
        let mesh = MeshComponent::billboard(FLARE_EXTENT, bodies::SUN_FLARE_COLOR)
            .with_emissive(1.0)
            .with_blend(BlendMode::Additive);
        let mesh = self.textured_mesh(ctx, flare_id, bodies::SUN_FLARE_TEXTURE, mesh);
        ctx.scene.spawn(
            Entity::new(flare_id)
                .with_tag("flare")
                .with_scale(sun::flare_size(0.0))
                .with_mesh(mesh),
        );
        self.flare_id = Some(flare_id);

        // ── Planets ──────────────────────────────────────────────────
        for (i, desc) in PLANETS.iter().enumerate() {
            let id = ctx.next_id();
            let body = CelestialBody::new(
                id,
                BodyKind::Planet(i),
                OrbitState::new(desc.orbit_radius, desc.orbit_speed),
                desc.radius,
            )
            .with_align_target(desc.align_target())
            .with_texture(desc.texture)
            .with_spin_rate(PLANET_SPIN);

            let mesh = self.textured_mesh(ctx, id, desc.texture, MeshComponent::sphere(desc.radius, Color::WHITE));
            ctx.scene.spawn(Entity::new(id).with_tag(desc.name).with_pos(body.pos).with_mesh(mesh));
            self.planets.push(body);
        }

        // ── Moons ────────────────────────────────────────────────────
        for moon in &bodies::MOONS {
            let parent_pos = self.planets[moon.parent].pos;
            let id = ctx.next_id();
            let body = CelestialBody::new(
                id,
                BodyKind::Moon { parent: moon.parent },
                OrbitState::new(moon.orbit_radius, moon.orbit_speed),
                moon.radius,
            )
            .with_texture(moon.texture)
            .placed_around(parent_pos);

            let mesh = self.textured_mesh(ctx, id, moon.texture, MeshComponent::sphere(moon.radius, Color::WHITE));
            ctx.scene.spawn(Entity::new(id).with_tag(moon.name).with_pos(body.pos).with_mesh(mesh));
            self.satellites.push(body);
        }

        // ── Rings ────────────────────────────────────────────────────
        for (i, desc) in PLANETS.iter().enumerate().filter(|(_, d)| d.has_rings) {
            let parent_pos = self.planets[i].pos;
            let id = ctx.next_id();
            let outer = desc.radius * bodies::RING_OUTER_FACTOR;
            let body = CelestialBody::new(id, BodyKind::Ring { parent: i }, OrbitState::new(0.0, 0.0), outer)
                .with_texture(bodies::RING_TEXTURE)
                .with_spin_rate(bodies::RING_SPIN)
                .placed_around(parent_pos);

            let mesh = MeshComponent::ring(desc.radius * bodies::RING_INNER_FACTOR, outer, Color::WHITE).with_alpha(RING_ALPHA);
            let mesh = self.textured_mesh(ctx, id, bodies::RING_TEXTURE, mesh);
            ctx.scene.spawn(Entity::new(id).with_tag("ring").with_pos(body.pos).with_mesh(mesh));
            self.satellites.push(body);
        }

        // ── Shells (night lights, clouds) ────────────────────────────
        for shell in &bodies::SHELLS {
            let parent = &self.planets[shell.parent];
            let (parent_pos, radius) = (parent.pos, parent.collision_radius + shell.lift);
            let id = ctx.next_id();
            let body = CelestialBody::new(id, BodyKind::Shell { parent: shell.parent }, OrbitState::new(0.0, 0.0), radius)
                .with_texture(shell.texture)
                .with_spin_rate(PLANET_SPIN)
                .placed_around(parent_pos);

            let mesh = MeshComponent::sphere(radius, Color::WHITE)
                .with_alpha(shell.alpha)
                .with_emissive(shell.emissive);
            let mesh = self.textured_mesh(ctx, id, shell.texture, mesh);
            ctx.scene.spawn(Entity::new(id).with_tag(shell.name).with_pos(body.pos).with_mesh(mesh));
            self.satellites.push(body);
        }

        // ── Asteroid belt ────────────────────────────────────────────
        let seed = bodies::ASTEROID_SEED.wrapping_add(ctx.mount().0 as u64);
        for orbit in bodies::generate_belt(seed) {
            let id = ctx.next_id();
            let body = CelestialBody::new(id, BodyKind::Asteroid, orbit, bodies::ASTEROID_SIZE)
                .with_spin_rate(bodies::ASTEROID_SPIN);
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag("asteroid")
                    .with_pos(body.pos)
                    .with_mesh(MeshComponent::sphere(bodies::ASTEROID_SIZE, bodies::ASTEROID_COLOR)),
            );
            self.asteroids.push(body);
        }

        // ── Black hole backdrop ──────────────────────────────────────
        let core_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(core_id)
                .with_tag("black-hole")
                .with_pos(bodies::BLACK_HOLE_POS)
                .with_mesh(MeshComponent::sphere(bodies::BLACK_HOLE_CORE_RADIUS, Color::new(0.0, 0.0, 0.0))),
        );
        let disk_id = ctx.next_id();
        let mesh = MeshComponent::ring(bodies::BLACK_HOLE_DISK_INNER, bodies::BLACK_HOLE_DISK_OUTER, Color::WHITE)
            .with_blend(BlendMode::Additive);
        let mesh = self.textured_mesh(ctx, disk_id, bodies::BLACK_HOLE_DISK_TEXTURE, mesh);
        ctx.scene.spawn(
            Entity::new(disk_id)
                .with_tag("accretion-disk")
                .with_pos(bodies::BLACK_HOLE_POS)
                .with_mesh(mesh),
        );

        log::info!(
            "solar-system: mounted {:?} with {} entities",
            ctx.mount(),
            ctx.scene.len()
        );
    }

    /// Tear down and remount from initial conditions. Pending timers die
    /// with the old mount.
    fn reset(&mut self, ctx: &mut EngineContext) {
        let mount = ctx.remount();
        self.timers.clear();
        self.laser_clear = None;
        self.lasers.clear();
        self.interaction = Interaction::default();
        self.sun = SunState::new(bodies::SUN_RADIUS);
        self.planets.clear();
        self.satellites.clear();
        self.asteroids.clear();
        self.time = 0.0;
        self.drag = Drag::default();

        let config = self.config();
        let aspect = ctx.camera.aspect;
        ctx.camera = OrbitCamera::new(config.camera_eye, config.camera_target, config.camera_fov_degrees);
        ctx.camera.aspect = aspect;

        log::info!("solar-system: reset to {mount:?}");
        self.mount(ctx);
    }

    // ── Input ──────────────────────────────────────────────────────

    /// Turn raw input into intents. Pointer presses that stay under the drag
    /// threshold become picks; longer ones orbit the camera.
    fn decode_input(&mut self, input: &InputQueue) -> Vec<Intent> {
        let mut intents = Vec::new();
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, a, b, c } => match kind {
                    CUSTOM_SELECT_TOOL => {
                        let tool = if a as i32 == 1 { Tool::Laser } else { Tool::None };
                        intents.push(Intent::SelectTool(tool));
                    }
                    CUSTOM_TOGGLE_ALIGN => intents.push(Intent::ToggleAlign),
                    CUSTOM_SET_SPEED => intents.push(Intent::SetSpeed(a)),
                    CUSTOM_FOLLOW => {
                        if a >= 0.0 && (a as usize) < PLANET_COUNT {
                            intents.push(Intent::Follow(a as usize));
                        }
                    }
                    CUSTOM_CLEAR_FOLLOW => intents.push(Intent::ClearFollow),
                    CUSTOM_RESET => intents.push(Intent::Reset),
                    CUSTOM_ZOOM => intents.push(Intent::Zoom(a)),
                    CUSTOM_FIRE_LASER => intents.push(Intent::FireLaser(Vec3::new(a, b, c))),
                    CUSTOM_RESIZE => intents.push(Intent::Resize { width: a, height: b }),
                    _ => log::debug!("solar-system: unknown custom event {kind}"),
                },
                InputEvent::PointerDown { x, y } => {
                    self.drag = Drag { start: Some((x, y)), last: (x, y), moved: false };
                }
                InputEvent::PointerMove { x, y } => {
                    if let Some((sx, sy)) = self.drag.start {
                        if !self.drag.moved && ((x - sx).powi(2) + (y - sy).powi(2)).sqrt() > DRAG_THRESHOLD {
                            self.drag.moved = true;
                        }
                        if self.drag.moved {
                            let (lx, ly) = self.drag.last;
                            intents.push(Intent::Orbit { dx: x - lx, dy: y - ly });
                        }
                        self.drag.last = (x, y);
                    }
                }
                InputEvent::PointerUp { x, y } => {
                    if self.drag.start.is_some() && !self.drag.moved {
                        intents.push(Intent::Pick { x, y });
                    }
                    self.drag = Drag::default();
                }
                InputEvent::Wheel { delta } => {
                    if delta != 0.0 {
                        intents.push(Intent::Zoom(-delta.signum()));
                    }
                }
                _ => {}
            }
        }
        intents
    }

    fn apply(&mut self, ctx: &mut EngineContext, intent: Intent) {
        log::debug!("solar-system: {intent:?}");
        match intent {
            Intent::SelectTool(tool) => self.interaction.tool = tool,
            Intent::ToggleAlign => self.interaction.aligned = !self.interaction.aligned,
            Intent::SetSpeed(speed) => {
                if speed.is_finite() {
                    self.interaction.speed_multiplier = speed.clamp(SPEED_MIN, SPEED_MAX);
                }
            }
            Intent::Follow(index) => {
                if let Some(planet) = self.planets.get(index) {
                    if ctx.scene.contains(planet.id) {
                        self.interaction.followed = Some(planet.id);
                    }
                }
            }
            Intent::ClearFollow => self.interaction.followed = None,
            Intent::FireLaser(point) => {
                let hit = self.hit_at(point);
                self.fire_laser(ctx, point, hit);
            }
            Intent::Pick { x, y } => {
                let ray = ctx.camera.ray_from_ndc(x, y);
                let hit = self.pick(&ray);
                match (self.interaction.tool, hit) {
                    (Tool::Laser, Some(hit)) => self.fire_laser(ctx, hit.point(), Some(hit)),
                    (Tool::None, Some(Hit::Planet(index, _))) => self.apply(ctx, Intent::Follow(index)),
                    _ => {}
                }
            }
            Intent::Orbit { dx, dy } => ctx.camera.orbit(-dx * ORBIT_SENSITIVITY, -dy * ORBIT_SENSITIVITY * 0.5),
            Intent::Zoom(steps) => {
                if steps.is_finite() {
                    ctx.camera.zoom(ZOOM_STEP.powf(steps));
                }
            }
            Intent::Resize { width, height } => ctx.camera.resize(width, height),
            Intent::Reset => self.reset(ctx),
        }
    }

    // ── Laser ──────────────────────────────────────────────────────

    /// Body whose surface lies within slack of `point`, preferring the sun.
    fn hit_at(&self, point: Vec3) -> Option<Hit> {
        if !self.sun.is_exploded() && point.length() <= self.sun.effective_radius() + LASER_HIT_SLACK {
            return Some(Hit::Sun(point));
        }
        self.planets
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_intact())
            .map(|(i, p)| (i, (point - p.pos).length() - p.collision_radius))
            .filter(|&(_, gap)| gap <= LASER_HIT_SLACK)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| Hit::Planet(i, point))
    }

    /// Nearest sun or intact planet along a ray.
    fn pick(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<(f32, Hit)> = None;
        if !self.sun.is_exploded() {
            if let Some(t) = ray.intersect_sphere(Vec3::ZERO, self.sun.effective_radius()) {
                best = Some((t, Hit::Sun(ray.at(t))));
            }
        }
        for (i, planet) in self.planets.iter().enumerate().filter(|(_, p)| p.is_intact()) {
            if let Some(t) = ray.intersect_sphere(planet.pos, planet.collision_radius) {
                if best.map_or(true, |(bt, _)| t < bt) {
                    best = Some((t, Hit::Planet(i, ray.at(t))));
                }
            }
        }
        best.map(|(_, hit)| hit)
    }

    /// Fire from the camera. Heat or destruction lands immediately; the
    /// beam itself fades out over its lifetime.
    fn fire_laser(&mut self, ctx: &mut EngineContext, point: Vec3, hit: Option<Hit>) {
        self.lasers.fire(ctx.camera.eye(), point, self.time);

        self.interaction.laser_target = Some(point);
        if let Some(previous) = self.laser_clear.take() {
            self.timers.cancel(previous);
        }
        self.laser_clear = Some(self.timers.schedule(LASER_TARGET_HOLD, Deferred::ClearLaserTarget));

        match hit {
            Some(Hit::Sun(_)) => self.sun.hit(),
            Some(Hit::Planet(index, _)) => self.destroy_planet(ctx, index),
            None => {}
        }
    }

    /// Blow up a planet along with its moons and rings. Idempotent.
    fn destroy_planet(&mut self, ctx: &mut EngineContext, index: usize) {
        if index >= PLANET_COUNT || self.interaction.destroyed[index] {
            return;
        }
        self.interaction.destroyed[index] = true;

        let rng = &mut ctx.effects.rng;
        let mut exploded = Vec::new();
        if self.planets[index].explode(planet_burst_config(), rng) {
            exploded.push(self.planets[index].id);
        }
        for sat in self.satellites.iter_mut().filter(|s| s.kind.parent() == Some(index)) {
            match sat.kind {
                BodyKind::Shell { .. } => {
                    if sat.vanish() {
                        ctx.scene.despawn(sat.id);
                    }
                }
                _ => {
                    if sat.explode(planet_burst_config(), rng) {
                        exploded.push(sat.id);
                    }
                }
            }
        }
        for id in exploded {
            if let Some(entity) = ctx.scene.get_mut(id) {
                entity.active = false;
            }
        }

        log::info!("solar-system: {} destroyed", PLANETS[index].name);
        ctx.emit_event(GameEvent {
            kind: EVENT_PLANET_DESTROYED,
            a: index as f32,
            ..Default::default()
        });
    }

    // ── Simulation ─────────────────────────────────────────────────

    fn step_bodies(&mut self, ctx: &mut EngineContext) {
        let speed = self.interaction.speed_multiplier;
        let aligned = self.interaction.aligned;

        for planet in &mut self.planets {
            planet.step_orbit(DT, speed, aligned, Vec3::ZERO);
        }
        for sat in &mut self.satellites {
            let Some(parent_pos) = sat.kind.parent().and_then(|p| self.planets.get(p)).map(|p| p.pos) else {
                continue;
            };
            match sat.kind {
                BodyKind::Ring { .. } | BodyKind::Shell { .. } => sat.step_attached(parent_pos),
                _ => sat.step_orbit(DT, speed, false, parent_pos),
            }
        }
        for asteroid in &mut self.asteroids {
            asteroid.step_orbit(DT, 1.0, false, Vec3::ZERO);
        }

        for body in self.planets.iter().chain(&self.satellites).chain(&self.asteroids) {
            if let Some(entity) = ctx.scene.get_mut(body.id) {
                entity.pos = body.pos;
                entity.spin = body.spin;
            }
        }
    }

    fn step_sun(&mut self, ctx: &mut EngineContext) {
        if self.sun.step(DT, bodies::SUN_SPIN, &mut ctx.effects.rng) {
            log::info!("solar-system: the sun exploded");
            for id in [self.sun_id.take(), self.flare_id.take()].into_iter().flatten() {
                ctx.scene.despawn(id);
            }
        }

        let swallowed: Vec<usize> = (0..PLANET_COUNT)
            .filter(|&i| !self.interaction.destroyed[i])
            .filter(|&i| self.sun.touches(self.planets[i].pos, self.planets[i].collision_radius))
            .collect();
        for index in swallowed {
            self.destroy_planet(ctx, index);
        }

        if let Some(entity) = self.sun_id.and_then(|id| ctx.scene.get_mut(id)) {
            entity.scale = self.sun.scale();
            entity.spin = self.sun.spin;
            if let Some(mesh) = entity.mesh.as_mut() {
                mesh.color = self.sun.color();
            }
        }
        if let Some(entity) = self.flare_id.and_then(|id| ctx.scene.get_mut(id)) {
            entity.scale = sun::flare_size(self.time) * self.sun.scale();
        }
    }

    /// Advance bursts; bodies whose burst is spent leave the scene.
    fn step_explosions(&mut self, ctx: &mut EngineContext) {
        for body in self.planets.iter_mut().chain(self.satellites.iter_mut()) {
            if body.step_explosion(DT) {
                ctx.scene.despawn(body.id);
                if self.interaction.followed == Some(body.id) {
                    self.interaction.followed = None;
                }
            }
        }
    }

    fn step_camera(&mut self, ctx: &mut EngineContext) {
        let Some(id) = self.interaction.followed else {
            return;
        };
        match ctx.scene.get(id) {
            Some(entity) => {
                let pos = entity.pos;
                ctx.camera.follow(pos);
            }
            None => self.interaction.followed = None,
        }
    }

    fn step_timers(&mut self) {
        for deferred in self.timers.tick(DT) {
            match deferred {
                Deferred::ClearLaserTarget => {
                    self.interaction.laser_target = None;
                    self.laser_clear = None;
                }
            }
        }
    }

    fn snapshot(&self, ctx: &EngineContext) -> Reported {
        Reported {
            follow: self.followed_planet(),
            tool: self.interaction.tool,
            aligned: self.interaction.aligned,
            destroyed_mask: self.interaction.destroyed_mask(),
            heat: self.sun.heat,
            sun_exploded: self.sun.is_exploded(),
            sun_scale: self.sun.scale(),
            speed: self.interaction.speed_multiplier,
            mount: ctx.mount(),
        }
    }

    /// Report whatever changed since the last report. A new mount reports
    /// everything.
    fn emit_changes(&mut self, ctx: &mut EngineContext) {
        let now = self.snapshot(ctx);
        let (fresh, prev) = match self.reported {
            Some(prev) if prev.mount == now.mount => (false, prev),
            _ => (true, now),
        };

        if fresh || prev.follow != now.follow {
            ctx.emit_event(GameEvent {
                kind: EVENT_FOLLOW,
                a: now.follow.map(|i| i as f32).unwrap_or(-1.0),
                b: now.mount.0 as f32,
                c: 0.0,
            });
        }
        if fresh || prev.tool != now.tool {
            ctx.emit_event(GameEvent { kind: EVENT_TOOL, a: now.tool.code(), ..Default::default() });
        }
        if fresh || prev.aligned != now.aligned || prev.destroyed_mask != now.destroyed_mask || prev.heat != now.heat {
            ctx.emit_event(GameEvent {
                kind: EVENT_FLAGS,
                a: if now.aligned { 1.0 } else { 0.0 },
                b: now.destroyed_mask as f32,
                c: now.heat,
            });
        }
        if fresh || prev.sun_exploded != now.sun_exploded || prev.sun_scale != now.sun_scale {
            ctx.emit_event(GameEvent {
                kind: EVENT_SUN,
                a: if now.sun_exploded { 1.0 } else { 0.0 },
                b: now.sun_scale,
                c: 0.0,
            });
        }
        if fresh || prev.speed != now.speed {
            ctx.emit_event(GameEvent { kind: EVENT_SPEED, a: now.speed, ..Default::default() });
        }
        self.reported = Some(now);
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: DT,
            max_instances: 2048,
            max_effects_vertices: 16384,
            max_events: 64,
            camera_eye: Vec3::new(0.0, 60.0, 160.0),
            camera_target: Vec3::ZERO,
            camera_fov_degrees: 60.0,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        ctx.load_manifest(TextureManifest::by_convention(bodies::texture_names()));
        self.mount(ctx);
        self.emit_changes(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for intent in self.decode_input(input) {
            self.apply(ctx, intent);
        }

        self.time += DT;
        self.step_bodies(ctx);
        self.step_sun(ctx);
        self.step_explosions(ctx);
        self.lasers.prune(self.time);
        self.step_camera(ctx);
        self.step_timers();
        self.emit_changes(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        if !self.interaction.aligned {
            for (i, desc) in PLANETS.iter().enumerate() {
                if self.interaction.destroyed[i] {
                    continue;
                }
                ctx.effects.add_lines(&circle_xz(
                    desc.orbit_radius,
                    0.0,
                    bodies::ORBIT_SAMPLES,
                    bodies::ORBIT_LINE_WIDTH,
                    desc.orbit_color,
                    bodies::ORBIT_LINE_ALPHA,
                ));
            }
        }

        let bursts = self
            .planets
            .iter()
            .chain(&self.satellites)
            .filter_map(|b| b.burst())
            .chain(self.sun.burst());
        for burst in bursts {
            ctx.effects.add_burst(burst);
        }

        self.lasers.push_segments(ctx.effects, ctx.camera.eye(), self.time);
    }

    fn textures_changed(&mut self, ctx: &mut EngineContext) {
        for &(id, name) in &self.textured {
            if let Some(mesh) = ctx.scene.get_mut(id).and_then(|e| e.mesh.as_mut()) {
                mesh.texture = ctx.textures.get(name);
            }
        }
    }
}
