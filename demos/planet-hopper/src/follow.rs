use drift_engine::{Camera2D, Viewport};
use glam::Vec2;

/// Keeps the ship's bounding-box corner at a fixed spot on screen.
///
/// The extents are captured once from the starting camera. Every active tick
/// the viewport is rebuilt from the ship's AABB minimum, so the ship appears
/// stationary while the world scrolls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    /// Negative half of the view size.
    offset: Vec2,
    /// Starting viewport maximum, added to the new minimum.
    reach: Vec2,
}

impl CameraFollow {
    pub fn capture(camera: &Camera2D) -> Self {
        let viewport = camera.viewport();
        Self {
            offset: -Vec2::new(viewport.width(), viewport.height()) * 0.5,
            reach: viewport.max,
        }
    }

    /// Viewport that places `ship_min` half a view from the top-left corner.
    pub fn viewport_for(&self, ship_min: Vec2) -> Viewport {
        let min = self.offset + ship_min;
        Viewport::new(min, min + self.reach)
    }

    pub fn apply(&self, camera: &mut Camera2D, ship_min: Vec2) {
        camera.set_viewport(self.viewport_for(ship_min));
    }
}
