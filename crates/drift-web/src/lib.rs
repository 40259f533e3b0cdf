pub mod runner;

pub use runner::GameRunner;

#[doc(hidden)]
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// The macro generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers,
///   config loading, wireframe/camera/HUD accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use drift_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// drift_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `drift_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(drift_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(drift_engine::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(drift_engine::InputEvent::Custom { kind, a, b, c }));
        }

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) {
            with_runner(|r| r.load_config(json));
        }

        // ---- Wireframe accessors ----

        #[wasm_bindgen]
        pub fn get_wire_vertices_ptr() -> *const f32 {
            with_runner(|r| r.wire_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_wire_vertex_count() -> u32 {
            with_runner(|r| r.wire_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_max_wire_vertices() -> u32 {
            with_runner(|r| r.max_wire_vertices())
        }

        // ---- Camera / HUD accessors ----

        #[wasm_bindgen]
        pub fn get_camera_viewport() -> $crate::js_sys::Float32Array {
            let viewport = with_runner(|r| r.camera_viewport());
            $crate::js_sys::Float32Array::from(&viewport[..])
        }

        #[wasm_bindgen]
        pub fn get_hud_revision() -> u32 {
            with_runner(|r| r.hud_revision())
        }

        #[wasm_bindgen]
        pub fn get_hud_slot_count() -> u32 {
            with_runner(|r| r.hud_slot_count())
        }

        #[wasm_bindgen]
        pub fn get_hud_line(slot: u32) -> String {
            with_runner(|r| r.hud_line(slot as usize))
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width())
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height())
        }
    };
}
