use drift_engine::{
    build_wireframe, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    KeyState, WireframeBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game (e.g., `planet-hopper`) creates a `thread_local!` GameRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    wireframe: WireframeBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::with_config(&config),
            input: InputQueue::with_keys(KeyState::tracking(&config.tracked_keys)),
            wireframe: WireframeBuffer::with_capacity(config.max_wire_vertices),
            timestep: FixedTimestep::new(config.fixed_dt),
            config,
            game,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.rebuild_wireframe();
    }

    /// Push an input event. Key state changes take effect immediately.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: for each fixed step, attractor pass + physics step,
    /// then the game's update. Rebuilds the wireframe afterwards.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.ctx.step_physics(self.game.force_field());
            self.game.update(&mut self.ctx, &self.input);
        }

        // Custom events wait for a frame that actually steps.
        if steps > 0 {
            self.input.drain();
        }

        self.rebuild_wireframe();
    }

    /// Forward a JSON configuration document to the game.
    pub fn load_config(&mut self, json: &str) {
        self.game.load_config(&mut self.ctx, json);
        self.rebuild_wireframe();
    }

    fn rebuild_wireframe(&mut self) {
        build_wireframe(
            &self.ctx.scene,
            &self.ctx.physics,
            &self.ctx.camera,
            &mut self.wireframe,
        );
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    // ---- Accessors read from JS ----

    pub fn wire_vertices_ptr(&self) -> *const f32 {
        self.wireframe.vertices_ptr()
    }

    pub fn wire_vertex_count(&self) -> u32 {
        self.wireframe.vertex_count()
    }

    pub fn max_wire_vertices(&self) -> u32 {
        self.config.max_wire_vertices as u32
    }

    /// `[min_x, min_y, max_x, max_y]` of the visible world rectangle.
    pub fn camera_viewport(&self) -> [f32; 4] {
        self.ctx.camera.viewport().to_array()
    }

    pub fn hud_revision(&self) -> u32 {
        self.ctx.hud.revision()
    }

    pub fn hud_line(&self, slot: usize) -> String {
        self.ctx.hud.line(slot).unwrap_or_default().to_string()
    }

    pub fn hud_slot_count(&self) -> u32 {
        self.ctx.hud.slot_count() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_engine::{
        BodyDesc, ColliderDesc, ColliderMaterial, Entity, WireColor, WireStyle,
    };
    use glam::Vec2;

    /// Counts updates and remembers the custom events it saw.
    struct Probe {
        updates: u32,
        customs: Vec<u32>,
    }

    impl Game for Probe {
        fn config(&self) -> GameConfig {
            GameConfig {
                tracked_keys: vec![37, 38, 39, 40],
                ..GameConfig::default()
            }
        }

        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            ctx.spawn_with_body(
                Entity::new(id).with_wire(WireStyle::outline(WireColor::WHITE)),
                BodyDesc::fixed(ColliderDesc::Ball { radius: 20.0 })
                    .with_position(Vec2::new(100.0, 100.0)),
                ColliderMaterial::default(),
            );
        }

        fn update(&mut self, _ctx: &mut EngineContext, input: &InputQueue) {
            self.updates += 1;
            for event in input.iter() {
                if let InputEvent::Custom { kind, .. } = event {
                    self.customs.push(*kind);
                }
            }
        }
    }

    fn runner() -> GameRunner<Probe> {
        let mut runner = GameRunner::new(Probe { updates: 0, customs: Vec::new() });
        runner.init();
        runner
    }

    #[test]
    fn tick_before_init_does_nothing() {
        let mut runner = GameRunner::new(Probe { updates: 0, customs: Vec::new() });
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().updates, 0);
    }

    #[test]
    fn tick_runs_one_update_per_fixed_step() {
        let mut runner = runner();
        runner.tick(1.0 / 60.0 + 0.001);
        assert_eq!(runner.game().updates, 1);
        runner.tick(2.0 / 60.0);
        assert_eq!(runner.game().updates, 3);
    }

    #[test]
    fn custom_events_survive_frames_without_steps() {
        let mut runner = runner();
        runner.push_input(InputEvent::Custom { kind: 7, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(0.001);
        assert!(runner.game().customs.is_empty());
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().customs, vec![7]);
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.game().customs, vec![7]);
    }

    #[test]
    fn untracked_keys_are_ignored() {
        let mut runner = runner();
        runner.push_input(InputEvent::KeyDown { key_code: 65 });
        runner.push_input(InputEvent::KeyDown { key_code: 38 });
        assert_eq!(runner.input.keys().pressed_count(), 1);
    }

    #[test]
    fn init_builds_the_wireframe() {
        let runner = runner();
        assert!(runner.wire_vertex_count() > 0);
        assert_eq!(runner.camera_viewport(), [0.0, 0.0, 800.0, 600.0]);
        assert_eq!(runner.hud_line(0), "");
        assert_eq!(runner.hud_line(99), "");
    }
}
