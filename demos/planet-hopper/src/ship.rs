//! Ship flight model.
//!
//! Angular velocity here is in radians per fixed step, the unit the tuning
//! constants were written for. The orchestrator converts to and from the
//! engine's radians per second.

use std::f32::consts::PI;

use drift_engine::{EntityId, KeyState};
use glam::Vec2;

use crate::config::ShipConfig;

/// Rotation per tick while LEFT or RIGHT is held.
pub const TURN_STEP: f32 = PI / 90.0;
/// Spin removed per tick by the forward thruster.
pub const FORWARD_SPIN_DRAIN: f32 = 4.0;
/// Spin removed per tick by the reverse thruster.
pub const REVERSE_SPIN_DRAIN: f32 = 10.0;
pub const FORWARD_ACCELERATION: f32 = 0.4;
pub const REVERSE_ACCELERATION: f32 = 1.0;
/// Upper bound of the committed spin after a thrust tick.
pub const MAX_SPIN: f32 = 0.1;

/// The four navigation keys, by DOM key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Left = 37,
    Up = 38,
    Right = 39,
    Down = 40,
}

impl NavKey {
    pub const ALL: [NavKey; 4] = [NavKey::Left, NavKey::Up, NavKey::Right, NavKey::Down];

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Key codes the input tracker should record.
    pub fn codes() -> Vec<u32> {
        Self::ALL.iter().map(|key| key.code()).collect()
    }
}

/// Which navigation keys are held this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavKeys {
    pub left: bool,
    pub up: bool,
    pub right: bool,
    pub down: bool,
}

impl NavKeys {
    pub fn from_state(keys: &KeyState) -> Self {
        Self {
            left: keys.is_pressed(NavKey::Left.code()),
            up: keys.is_pressed(NavKey::Up.code()),
            right: keys.is_pressed(NavKey::Right.code()),
            down: keys.is_pressed(NavKey::Down.code()),
        }
    }

    pub fn any(&self) -> bool {
        self.left || self.up || self.right || self.down
    }
}

/// Thruster constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipTuning {
    pub resistance: f32,
    pub forward_speed: f32,
    pub backward_speed: f32,
}

impl From<&ShipConfig> for ShipTuning {
    fn from(config: &ShipConfig) -> Self {
        Self {
            resistance: config.resistance,
            forward_speed: config.forward_speed,
            backward_speed: config.backward_speed,
        }
    }
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self::from(&ShipConfig::default())
    }
}

/// Outcome of one flight tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightStep {
    /// Heading to write back to the body, every tick.
    pub angle: f32,
    /// Spin after the thruster branches. Only committed when `thrust` is set.
    pub angular_velocity: f32,
    /// Tuning-scale force to apply this tick.
    pub thrust: Option<Vec2>,
    /// Acceleration factor reported to the HUD, 0 without thrust.
    pub acceleration: f32,
}

impl FlightStep {
    pub fn force(&self) -> Vec2 {
        self.thrust.unwrap_or(Vec2::ZERO)
    }
}

/// The player's ship.
#[derive(Debug, Clone)]
pub struct Ship {
    pub id: EntityId,
    pub tuning: ShipTuning,
    /// Grounded ships cannot turn or reverse.
    pub landed: bool,
}

impl Ship {
    pub fn new(id: EntityId, tuning: ShipTuning) -> Self {
        Self {
            id,
            tuning,
            landed: false,
        }
    }

    /// Derive this tick's heading, spin and thrust from the held keys.
    pub fn fly(&self, keys: NavKeys, angle: f32, angular_velocity: f32) -> FlightStep {
        let mut angle = angle;
        let mut spin = angular_velocity;
        let mut engine: Option<(f32, f32)> = None;

        if keys.left && !self.landed {
            angle -= TURN_STEP;
        } else if keys.right && !self.landed {
            angle += TURN_STEP;
        }

        if keys.up {
            spin -= FORWARD_SPIN_DRAIN;
            engine = Some((self.tuning.forward_speed, FORWARD_ACCELERATION));
        } else if keys.down && !self.landed {
            spin -= REVERSE_SPIN_DRAIN;
            engine = Some((self.tuning.backward_speed, REVERSE_ACCELERATION));
        }

        match engine {
            Some((magnitude, acceleration)) => FlightStep {
                angle,
                angular_velocity: spin.clamp(0.0, MAX_SPIN),
                thrust: Some(Vec2::from_angle(angle) * magnitude * acceleration),
                acceleration,
            },
            None => FlightStep {
                angle,
                angular_velocity: spin,
                thrust: None,
                acceleration: 0.0,
            },
        }
    }
}
