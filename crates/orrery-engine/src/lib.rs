pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, MountId, GameEvent};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, Shape, Color, BlendMode};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::timers::{Timers, TimerId};
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::{OrbitCamera, Ray, CameraUniform};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::manifest::TextureManifest;
pub use assets::registry::{TextureRegistry, TextureId};
pub use bridge::protocol::ProtocolLayout;
pub use systems::effects::{
    EffectsState, EffectVertex, Particle, ParticleBurst, BurstConfig, BurstColor, Rng,
};
pub use systems::render::build_render_buffer;
