use glam::Vec3;
use crate::api::types::{EntityId, GameEvent, MountId};
use crate::assets::manifest::TextureManifest;
use crate::assets::registry::TextureRegistry;
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::OrbitCamera;
use crate::systems::effects::EffectsState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of render instances (default: 2048).
    pub max_instances: usize,
    /// Maximum number of effects vertices (default: 16384).
    pub max_effects_vertices: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Initial camera eye position.
    pub camera_eye: Vec3,
    /// Initial camera look-at target.
    pub camera_target: Vec3,
    /// Vertical field of view in degrees.
    pub camera_fov_degrees: f32,
    /// Seed for the shared effects RNG.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_instances: 2048,
            max_effects_vertices: 16384,
            max_events: 32,
            camera_eye: Vec3::new(0.0, 60.0, 160.0),
            camera_target: Vec3::ZERO,
            camera_fov_degrees: 60.0,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. Consume input, advance the simulation, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for effect vertices.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Called after the texture registry was rebuilt from a new manifest.
    fn textures_changed(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub effects: EffectsState,
    pub events: Vec<GameEvent>,
    pub camera: OrbitCamera,
    pub manifest: TextureManifest,
    pub textures: TextureRegistry,
    mount: MountId,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            effects: EffectsState::with_capacity(config.seed, config.max_effects_vertices),
            events: Vec::new(),
            camera: OrbitCamera::new(config.camera_eye, config.camera_target, config.camera_fov_degrees),
            manifest: TextureManifest::default(),
            textures: TextureRegistry::new(),
            mount: MountId::default(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Identity of the current scene mount.
    pub fn mount(&self) -> MountId {
        self.mount
    }

    /// Drop every entity and staged effect and start a new mount.
    /// Entity ids keep counting, so handles from the old mount never resolve.
    pub fn remount(&mut self) -> MountId {
        self.scene.clear();
        self.effects.clear();
        self.mount = self.mount.next();
        self.mount
    }

    /// Merge a manifest and rebuild the texture registry.
    pub fn load_manifest(&mut self, manifest: TextureManifest) {
        self.manifest.merge(manifest);
        self.textures = TextureRegistry::from_manifest(&self.manifest);
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the game's effect pass.
pub struct RenderContext<'a> {
    pub effects: &'a mut EffectsState,
    pub camera: &'a OrbitCamera,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;

    #[test]
    fn ids_are_unique_across_remounts() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        ctx.scene.spawn(Entity::new(a));
        ctx.remount();
        let b = ctx.next_id();
        assert_ne!(a, b);
        assert!(ctx.scene.get(a).is_none());
    }

    #[test]
    fn remount_bumps_mount_and_clears_scene() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id));
        let before = ctx.mount();
        let after = ctx.remount();
        assert_ne!(before, after);
        assert!(ctx.scene.is_empty());
    }

    #[test]
    fn manifest_load_rebuilds_registry() {
        let mut ctx = EngineContext::new();
        ctx.load_manifest(TextureManifest::by_convention(["sun.jpg"]));
        assert!(ctx.textures.get("sun.jpg").is_some());
        ctx.load_manifest(TextureManifest::by_convention(["earth.jpg"]));
        assert!(ctx.textures.get("sun.jpg").is_some());
        assert!(ctx.textures.get("earth.jpg").is_some());
    }

    #[test]
    fn camera_starts_from_config() {
        let ctx = EngineContext::new();
        assert!((ctx.camera.eye() - Vec3::new(0.0, 60.0, 160.0)).length() < 1e-3);
    }
}
