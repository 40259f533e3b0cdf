//! Readouts shown under the canvas, one per HUD slot.

use glam::Vec2;

use crate::ship::FlightStep;

pub const SLOT_SPIN: usize = 0;
pub const SLOT_FORCE: usize = 1;
pub const SLOT_POSITION: usize = 2;

/// Format the three readouts for an active tick.
///
/// `spin` is in radians per tick.
pub fn readouts(step: &FlightStep, spin: f32, position: Vec2) -> [String; 3] {
    let force = step.force();
    [
        format!("ang. velocity: {:.2}", spin),
        format!(
            "x: {:.2}, y: {:.2}, acc.: {:.2}",
            force.x, force.y, step.acceleration
        ),
        format!("posX: {:.2}, posY: {:.2}", position.x, position.y),
    ]
}
