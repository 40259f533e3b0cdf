//! Attractor extension point for the physics step.
//!
//! Bodies created with [`BodyDesc::with_attractor`](crate::core::physics::BodyDesc::with_attractor)
//! are visited once per step, paired with every other body in the world.
//! The game supplies a single [`ForceField`] that decides, per pair, whether a
//! force applies. Games keep their per-attractor parameters in a lookup table
//! keyed by [`EntityId`] rather than registering one closure per body.

use glam::Vec2;

use crate::api::types::EntityId;

/// Snapshot of a body taken at the start of an attractor pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBody {
    pub entity: EntityId,
    /// Center of mass in world space.
    pub position: Vec2,
}

/// Force law invoked by the engine for each (attractor, attracted) pair.
pub trait ForceField {
    /// Called once before any pair of a pass is visited.
    fn begin_pass(&mut self) {}

    /// Force to apply for this pair, or `None` when the attracted body is
    /// outside the attractor's field.
    ///
    /// The returned vector is applied as-is to both bodies.
    fn force(&mut self, attractor: &FieldBody, attracted: &FieldBody) -> Option<Vec2>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(Vec2);

    impl ForceField for Constant {
        fn force(&mut self, _attractor: &FieldBody, _attracted: &FieldBody) -> Option<Vec2> {
            Some(self.0)
        }
    }

    #[test]
    fn begin_pass_defaults_to_noop() {
        let mut field = Constant(Vec2::X);
        field.begin_pass();
        let a = FieldBody { entity: EntityId(1), position: Vec2::ZERO };
        let b = FieldBody { entity: EntityId(2), position: Vec2::ONE };
        assert_eq!(field.force(&a, &b), Some(Vec2::X));
    }
}
