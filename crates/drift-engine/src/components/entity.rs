use glam::Vec2;
use crate::api::types::EntityId;
use crate::core::physics::PhysicsBody;
use crate::systems::wireframe::WireStyle;

/// Fat Entity: a single struct with optional components.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Inactive entities are skipped by the wireframe builder.
    pub active: bool,
    /// Position in world space, synced from the physics body after each step.
    pub pos: Vec2,
    /// Rotation in radians, synced from the physics body after each step.
    pub rotation: f32,
    /// How the entity is drawn in the wireframe view (invisible when `None`).
    pub wire: Option<WireStyle>,
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            rotation: 0.0,
            wire: None,
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_wire(mut self, wire: WireStyle) -> Self {
        self.wire = Some(wire);
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }
}
