//! Star system layout: the planet table and the ship's tuning.
//!
//! The JSON form uses the same camelCase keys as the planet table
//! (`id, posX, posY, radius, gravityForce, attractionRadius`). Missing
//! sections fall back to the built-in system.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Errors that can occur when loading a system configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document is not valid JSON for a system.
    #[error("failed to parse system config: {0}")]
    ParseError(#[from] serde_json::Error),

    /// A planet has values the force law cannot work with.
    #[error("planet {id}: {reason}")]
    InvalidPlanet { id: String, reason: &'static str },

    /// Two planets share an id.
    #[error("duplicate planet id: {0}")]
    DuplicatePlanet(String),

    /// The ship has values the flight model cannot work with.
    #[error("ship: {0}")]
    InvalidShip(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetConfig {
    pub id: String,
    pub pos_x: f32,
    pub pos_y: f32,
    pub radius: f32,
    /// Base pull per unit of distance, before attenuation.
    pub gravity_force: f32,
    /// Field boundary as a multiple of `radius`.
    pub attraction_radius: f32,
}

impl PlanetConfig {
    pub fn new(
        id: &str,
        pos: (f32, f32),
        radius: f32,
        gravity_force: f32,
        attraction_radius: f32,
    ) -> Self {
        Self {
            id: id.to_string(),
            pos_x: pos.0,
            pos_y: pos.1,
            radius,
            gravity_force,
            attraction_radius,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos_x, self.pos_y)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &'static str| ConfigError::InvalidPlanet { id: self.id.clone(), reason };
        if !(self.pos_x.is_finite() && self.pos_y.is_finite()) {
            return Err(invalid("position must be finite"));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius must be positive"));
        }
        if !(self.attraction_radius.is_finite() && self.attraction_radius >= 1.0) {
            return Err(invalid("attractionRadius must be at least 1"));
        }
        if !self.gravity_force.is_finite() {
            return Err(invalid("gravityForce must be finite"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipConfig {
    pub pos_x: f32,
    pub pos_y: f32,
    /// Circumradius of the triangular hull.
    pub size: f32,
    /// Carried with the tuning; the flight model does not read it.
    pub resistance: f32,
    /// Thrust coefficient for UP. Negative: thrust points along −heading.
    pub forward_speed: f32,
    /// Thrust coefficient for DOWN.
    pub backward_speed: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            pos_x: 400.0,
            pos_y: 200.0,
            size: 10.0,
            resistance: 800.0,
            forward_speed: -0.9e-4,
            backward_speed: 1e-5,
        }
    }
}

impl ShipConfig {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos_x, self.pos_y)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pos_x.is_finite() && self.pos_y.is_finite()) {
            return Err(ConfigError::InvalidShip("position must be finite"));
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ConfigError::InvalidShip("size must be positive"));
        }
        if !(self.forward_speed.is_finite() && self.backward_speed.is_finite()) {
            return Err(ConfigError::InvalidShip("speeds must be finite"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemConfig {
    #[serde(default)]
    pub ship: ShipConfig,
    #[serde(default = "default_planets")]
    pub planets: Vec<PlanetConfig>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ship: ShipConfig::default(),
            planets: default_planets(),
        }
    }
}

impl SystemConfig {
    /// Parse and validate a JSON system description.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SystemConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ship.validate()?;
        let mut seen = HashSet::new();
        for planet in &self.planets {
            planet.validate()?;
            if !seen.insert(planet.id.as_str()) {
                return Err(ConfigError::DuplicatePlanet(planet.id.clone()));
            }
        }
        Ok(())
    }
}

/// The built-in six-planet system.
pub fn default_planets() -> Vec<PlanetConfig> {
    vec![
        PlanetConfig::new("planet1", (400.0, 500.0), 120.0, 0.5e-7, 2.0),
        PlanetConfig::new("planet2", (1300.0, 200.0), 320.0, 0.2e-7, 2.5),
        PlanetConfig::new("planet3", (100.0, 620.0), 120.0, 0.3e-7, 4.0),
        PlanetConfig::new("planet4", (-400.0, 230.0), 120.0, 0.5e-7, 2.0),
        PlanetConfig::new("planet5", (-800.0, -350.0), 100.0, 0.5e-7, 2.0),
        PlanetConfig::new("planet6", (900.0, 650.0), 60.0, 0.8e-7, 5.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_system_is_valid() {
        let config = SystemConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.planets.len(), 6);
        assert_eq!(config.ship.position(), Vec2::new(400.0, 200.0));
    }

    #[test]
    fn parses_planet_table_keys() {
        let json = r#"{
            "planets": [
                { "id": "home", "posX": 10, "posY": -20, "radius": 50,
                  "gravityForce": 1e-7, "attractionRadius": 3 }
            ]
        }"#;
        let config = SystemConfig::from_json(json).unwrap();
        assert_eq!(config.planets.len(), 1);
        let home = &config.planets[0];
        assert_eq!(home.id, "home");
        assert_eq!(home.position(), Vec2::new(10.0, -20.0));
        assert!((home.attraction_radius - 3.0).abs() < 1e-6);
        // Ship section missing: built-in tuning.
        assert_eq!(config.ship, ShipConfig::default());
    }

    #[test]
    fn missing_planets_fall_back_to_builtin_table() {
        let config = SystemConfig::from_json(r#"{ "ship": { "forwardSpeed": -2e-4 } }"#).unwrap();
        assert_eq!(config.planets, default_planets());
        assert!((config.ship.forward_speed + 2e-4).abs() < 1e-9);
        assert!((config.ship.backward_speed - 1e-5).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_json() {
        let err = SystemConfig::from_json("{ planets: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn rejects_attraction_radius_below_one() {
        let json = r#"{ "planets": [
            { "id": "p", "posX": 0, "posY": 0, "radius": 10,
              "gravityForce": 1e-7, "attractionRadius": 0.5 } ] }"#;
        let err = SystemConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlanet { ref id, .. } if id == "p"));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut config = SystemConfig::default();
        config.planets[2].radius = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPlanet { .. })));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut config = SystemConfig::default();
        config.planets[1].id = "planet1".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "duplicate planet id: planet1");
    }

    #[test]
    fn bundled_system_matches_builtin() {
        let bundled = SystemConfig::from_json(include_str!("../assets/system.json")).unwrap();
        let builtin = SystemConfig::default();
        assert_eq!(bundled.planets.len(), builtin.planets.len());
        for (a, b) in bundled.planets.iter().zip(&builtin.planets) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.position(), b.position());
            assert_eq!(a.radius, b.radius);
            assert_eq!(a.attraction_radius, b.attraction_radius);
            assert!((a.gravity_force - b.gravity_force).abs() <= b.gravity_force * 1e-6);
        }
        assert!((bundled.ship.forward_speed - builtin.ship.forward_speed).abs() < 1e-10);
        assert_eq!(bundled.ship.position(), builtin.ship.position());
    }

    #[test]
    fn rejects_zero_size_ship() {
        let mut config = SystemConfig::default();
        config.ship.size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidShip(_))));
    }
}
