/// Unique identifier for an entity in the scene.
///
/// The same value is stored in the rigid body's `user_data`, so collision
/// pairs and attractor pairs resolve back to entities without a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

impl EntityId {
    pub(crate) fn from_user_data(data: u128) -> Self {
        EntityId(data as u32)
    }

    pub(crate) fn to_user_data(self) -> u128 {
        self.0 as u128
    }
}
