//! Planet attraction: a bounded, distance-attenuated pull.
//!
//! Inside `radius * attraction_radius` a planet pulls with
//! `(planet - body) * gravity_force * attenuation`, where the attenuation
//! ramps from 0 at the field boundary to 1 at the planet surface. Outside the
//! boundary there is no force at all.

use std::collections::{HashMap, HashSet};

use drift_engine::{EntityId, FieldBody, ForceField};
use glam::Vec2;

use crate::config::PlanetConfig;

/// Converts tuning-scale forces into engine forces.
///
/// The gravity and thrust constants are tuned for bodies of density 0.001
/// stepped in milliseconds; engine bodies have density 1 and step in seconds.
pub const FORCE_SCALE: f32 = 1e9;

/// Per-planet force law parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub radius: f32,
    pub attraction_radius: f32,
    pub gravity_force: f32,
}

/// Result of evaluating the force law for one pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pull {
    pub attenuation: f32,
    /// Tuning-scale force, before [`FORCE_SCALE`].
    pub force: Vec2,
}

impl FieldParams {
    pub fn from_planet(planet: &PlanetConfig) -> Self {
        Self {
            radius: planet.radius,
            attraction_radius: planet.attraction_radius,
            gravity_force: planet.gravity_force,
        }
    }

    /// Distance from the planet center at which the field ends.
    pub fn influence_radius(&self) -> f32 {
        self.radius * self.attraction_radius
    }

    /// Attenuation at `dist` from the planet center, or `None` outside the
    /// field. A field whose boundary coincides with the surface has no
    /// defined ramp and exerts nothing.
    pub fn attenuation(&self, dist: f32) -> Option<f32> {
        let boundary = self.influence_radius();
        // Also rejects NaN distances.
        if !(dist <= boundary) {
            return None;
        }
        let span = self.radius - boundary;
        if span.abs() <= f32::EPSILON * boundary.abs().max(1.0) {
            return None;
        }
        Some(((dist - boundary) / span).clamp(0.0, 1.0))
    }

    /// Evaluate the force law for a body at `attracted` and the planet at
    /// `attractor`.
    pub fn pull(&self, attractor: Vec2, attracted: Vec2) -> Option<Pull> {
        let offset = attractor - attracted;
        let attenuation = self.attenuation(offset.length())?;
        Some(Pull {
            attenuation,
            force: offset * self.gravity_force * attenuation,
        })
    }
}

/// Lookup table of planet fields, consulted by the engine's attractor pass.
///
/// Tracks which planets computed a pull during the latest pass so the game
/// can highlight them.
#[derive(Debug, Default)]
pub struct PlanetField {
    params: HashMap<EntityId, FieldParams>,
    active: HashSet<EntityId>,
    force_scale: f32,
}

impl PlanetField {
    pub fn new(force_scale: f32) -> Self {
        Self {
            params: HashMap::new(),
            active: HashSet::new(),
            force_scale,
        }
    }

    pub fn insert(&mut self, planet: EntityId, params: FieldParams) {
        self.params.insert(planet, params);
    }

    pub fn clear(&mut self) {
        self.params.clear();
        self.active.clear();
    }

    pub fn params(&self, planet: EntityId) -> Option<&FieldParams> {
        self.params.get(&planet)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Whether `planet` pulled on anything during the latest pass.
    pub fn is_active(&self, planet: EntityId) -> bool {
        self.active.contains(&planet)
    }
}

impl ForceField for PlanetField {
    fn begin_pass(&mut self) {
        self.active.clear();
    }

    fn force(&mut self, attractor: &FieldBody, attracted: &FieldBody) -> Option<Vec2> {
        let params = self.params.get(&attractor.entity)?;
        let pull = params.pull(attractor.position, attracted.position)?;
        self.active.insert(attractor.entity);
        Some(pull.force * self.force_scale)
    }
}
