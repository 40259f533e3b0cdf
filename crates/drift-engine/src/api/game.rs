use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::field::ForceField;
use crate::core::physics::{BodyDesc, ColliderMaterial, CollisionPair, PhysicsWorld};
use crate::core::scene::Scene;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera2D;
use crate::systems::hud::HudPanel;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Initial viewport width in world units.
    pub world_width: f32,
    /// Initial viewport height in world units.
    pub world_height: f32,
    /// Uniform gravity. Default: zero, attractor fields supply the pull.
    pub gravity: Vec2,
    /// Key codes the input tracker records. Empty tracks every key.
    pub tracked_keys: Vec<u32>,
    /// Maximum number of wireframe vertices per frame (default: 8192).
    pub max_wire_vertices: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            gravity: Vec2::ZERO,
            tracked_keys: Vec::new(),
            max_wire_vertices: 8192,
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

    /// Runs once per fixed step, after the physics step for that step.
    /// Forces applied here act during the next step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Force law consulted by the attractor pass before every physics step.
    fn force_field(&mut self) -> Option<&mut dyn ForceField> {
        None
    }

    /// Replace the game's configuration at runtime from a JSON document.
    fn load_config(&mut self, _ctx: &mut EngineContext, _json: &str) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    pub camera: Camera2D,
    pub hud: HudPanel,
    next_id: u32,
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Context with gravity, timestep and viewport size taken from `config`.
    pub fn with_config(config: &GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        Self {
            scene: Scene::new(),
            physics,
            camera: Camera2D::new(config.world_width, config.world_height),
            hud: HudPanel::default(),
            next_id: 1,
            collision_events: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's position is set from the BodyDesc.
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_pos(desc.position).with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    /// Apply a force to an entity's body for the next physics step.
    pub fn apply_force(&mut self, id: EntityId, force: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_force(&body, force);
        }
    }

    /// Overwrite an entity's orientation (radians).
    pub fn set_rotation(&mut self, id: EntityId, angle: f32) {
        if let Some(entity) = self.scene.get_mut(id) {
            entity.rotation = angle;
            if let Some(body) = entity.body {
                self.physics.set_rotation(&body, angle);
            }
        }
    }

    /// Set the angular velocity of an entity's body (radians per second).
    pub fn set_angular_velocity(&mut self, id: EntityId, angvel: f32) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.set_angular_velocity(&body, angvel);
        }
    }

    /// Angular velocity of an entity's body (radians per second).
    pub fn angular_velocity(&self, id: EntityId) -> f32 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.angular_velocity(body))
            .unwrap_or(0.0)
    }

    /// Get the linear velocity of an entity's physics body.
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// World-space AABB of an entity's collider as `(min, max)`.
    pub fn body_bounds(&self, id: EntityId) -> Option<(Vec2, Vec2)> {
        let body = self.scene.get(id)?.body?;
        self.physics.body_bounds(&body)
    }

    /// Get collision events from the most recent physics step.
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Run the attractor pass (if a field is given), step the simulation and
    /// sync positions back to entities.
    /// Called by the game runner before `Game::update()` on every fixed step.
    pub fn step_physics(&mut self, field: Option<&mut dyn ForceField>) {
        if let Some(field) = field {
            self.physics.apply_field(field);
        }

        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
