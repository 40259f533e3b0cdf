pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::EntityId;
pub use components::entity::Entity;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::field::{ForceField, FieldBody};
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial, CollisionPair,
};
pub use renderer::camera::{Camera2D, Viewport};
pub use input::queue::{InputEvent, InputQueue};
pub use input::keys::KeyState;
pub use systems::hud::HudPanel;
pub use systems::wireframe::{
    build_wireframe, WireColor, WireStyle, WireVertex, WireframeBuffer,
};
