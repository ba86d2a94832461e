use orrery_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, RenderBuffer,
    FixedTimestep, ProtocolLayout, TextureManifest,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `solar-system`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// Handed to every step after the first one of a frame, so a frame's
    /// input is consumed exactly once.
    no_input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    /// Events emitted by `init` ride along with the first tick's events.
    hold_init_events: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            no_input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            initialized: false,
            hold_init_events: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.hold_init_events = true;
        self.build_frame();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Parse a texture manifest and hand the rebuilt registry to the game.
    /// A malformed manifest is logged and the previous one stays in effect.
    pub fn load_manifest(&mut self, json: &str) {
        match TextureManifest::from_json(json) {
            Ok(manifest) => {
                log::info!("texture manifest: {} entries", manifest.textures.len());
                self.ctx.load_manifest(manifest);
                if self.initialized {
                    self.game.textures_changed(&mut self.ctx);
                }
            }
            Err(err) => log::warn!("texture manifest ignored: {err}"),
        }
    }

    /// Run one frame tick: update game, build render buffer, run effects.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        if !std::mem::take(&mut self.hold_init_events) {
            self.ctx.clear_frame_data();
        }

        // Fixed timestep accumulation
        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            let input = if step == 0 { &self.input } else { &self.no_input };
            self.game.update(&mut self.ctx, input);
        }

        // Input waits for the first step that actually runs
        if steps > 0 {
            self.input.clear();
        }

        self.ctx.events.truncate(self.config.max_events);
        self.build_frame();
    }

    fn build_frame(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer, self.config.max_instances);

        self.ctx.effects.clear_frame();
        {
            let mut render_ctx = RenderContext {
                effects: &mut self.ctx.effects,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }
        self.ctx.effects.rebuild_effects_buffer();
    }

    /// Read access for tests and host-side tooling.
    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn blend_split(&self) -> u32 {
        self.render_buffer.blend_split
    }

    pub fn effects_ptr(&self) -> *const f32 {
        self.ctx.effects.effects_buffer_ptr()
    }

    pub fn effects_vertex_count(&self) -> u32 {
        self.ctx.effects.effects_vertex_count() as u32
    }

    pub fn effects_point_count(&self) -> u32 {
        self.ctx.effects.point_count() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn mount_id(&self) -> u32 {
        self.ctx.mount().0
    }

    // ---- Camera accessors ----

    /// Eye, target, vertical FOV (radians), near, far.
    pub fn camera_values(&self) -> [f32; 9] {
        let cam = &self.ctx.camera;
        let u = cam.uniform();
        [
            u.eye[0], u.eye[1], u.eye[2],
            u.target[0], u.target[1], u.target[2],
            u.fov_y, cam.near, cam.far,
        ]
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_effects_vertices(&self) -> u32 {
        self.layout.max_effects_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
