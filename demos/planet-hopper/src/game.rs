//! Planet Hopper: fly a wireframe triangle between attracting planets.
//!
//! Per fixed step the engine runs the planet fields and the physics step,
//! then `update` reads the arrow keys, steers the ship, re-centers the camera
//! and refreshes the HUD. Steps with no key held leave the ship controls,
//! camera and HUD alone.

use std::collections::HashSet;

use drift_engine::*;
use glam::Vec2;

use crate::attraction::{FieldParams, PlanetField, FORCE_SCALE};
use crate::config::SystemConfig;
use crate::follow::CameraFollow;
use crate::hud;
use crate::ship::{NavKey, NavKeys, Ship, ShipTuning};

// ── View ─────────────────────────────────────────────────────────────

/// The canvas never grows past this in either direction.
const MAX_VIEW: f32 = 1024.0;
const DEFAULT_VIEW_W: f32 = 1024.0;
const DEFAULT_VIEW_H: f32 = 768.0;

/// Viewport resize (a = width, b = height).
const CUSTOM_RESIZE: u32 = 99;

// ── Bodies ───────────────────────────────────────────────────────────

const PLANET_TAG: &str = "planet";
const SHIP_TAG: &str = "ship";

/// Linear and angular damping standing in for a 1% per-tick air drag.
const SHIP_DRAG: f32 = 0.6;

const PLANET_COLOR: WireColor = WireColor::WHITE;
/// 0xffcc00
const HIGHLIGHT_COLOR: WireColor = WireColor::new(1.0, 0.8, 0.0, 1.0);
/// 0x88ccff
const SHIP_COLOR: WireColor = WireColor::new(0.533, 0.8, 1.0, 1.0);

struct Planet {
    id: EntityId,
    name: String,
}

pub struct PlanetHopper {
    config: SystemConfig,
    field: PlanetField,
    planets: Vec<Planet>,
    ship: Option<Ship>,
    /// Planets the ship is touching right now.
    contacts: HashSet<EntityId>,
    follow: Option<CameraFollow>,
    view: Vec2,
}

impl PlanetHopper {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    pub fn with_config(config: SystemConfig) -> Self {
        Self {
            config,
            field: PlanetField::new(FORCE_SCALE),
            planets: Vec::new(),
            ship: None,
            contacts: HashSet::new(),
            follow: None,
            view: Vec2::new(DEFAULT_VIEW_W, DEFAULT_VIEW_H),
        }
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn field(&self) -> &PlanetField {
        &self.field
    }

    pub fn planet_id(&self, name: &str) -> Option<EntityId> {
        self.planets.iter().find(|p| p.name == name).map(|p| p.id)
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    // ── Setup ──────────────────────────────────────────────────────

    fn spawn_system(&mut self, ctx: &mut EngineContext) {
        for planet in &self.config.planets {
            let id = ctx.next_id();
            self.field.insert(id, FieldParams::from_planet(planet));
            ctx.spawn_with_body(
                Entity::new(id)
                    .with_tag(PLANET_TAG)
                    .with_wire(WireStyle::outline(PLANET_COLOR)),
                BodyDesc::fixed(ColliderDesc::Ball { radius: planet.radius })
                    .with_position(planet.position())
                    .with_attractor(true),
                ColliderMaterial::default(),
            );
            self.planets.push(Planet {
                id,
                name: planet.id.clone(),
            });
        }

        let ship_config = &self.config.ship;
        let id = ctx.next_id();
        ctx.spawn_with_body(
            Entity::new(id)
                .with_tag(SHIP_TAG)
                .with_wire(WireStyle::outline(SHIP_COLOR).with_indicators()),
            BodyDesc::dynamic(ColliderDesc::regular_triangle(ship_config.size))
                .with_position(ship_config.position())
                .with_linear_damping(SHIP_DRAG)
                .with_angular_damping(SHIP_DRAG)
                .with_ccd(true),
            ColliderMaterial::default(),
        );
        self.ship = Some(Ship::new(id, ShipTuning::from(ship_config)));

        log::info!(
            "planet-hopper: {} planets, ship at ({:.0}, {:.0})",
            self.planets.len(),
            ship_config.pos_x,
            ship_config.pos_y
        );
    }

    fn clear_system(&mut self, ctx: &mut EngineContext) {
        for planet in self.planets.drain(..) {
            ctx.despawn(planet.id);
        }
        if let Some(ship) = self.ship.take() {
            ctx.despawn(ship.id);
        }
        self.contacts.clear();
        self.field.clear();
    }

    /// Capture the follow extents from a fresh camera of the current view
    /// size and center the ship.
    fn reset_camera(&mut self, ctx: &mut EngineContext) {
        ctx.camera = Camera2D::new(self.view.x, self.view.y);
        let follow = CameraFollow::capture(&ctx.camera);
        if let Some((min, _)) = self.ship.as_ref().and_then(|s| ctx.body_bounds(s.id)) {
            follow.apply(&mut ctx.camera, min);
        }
        self.follow = Some(follow);
    }

    // ── Per-step passes ────────────────────────────────────────────

    fn handle_events(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Custom { kind: CUSTOM_RESIZE, a, b, .. } = *event {
                let view = Vec2::new(a, b).clamp(Vec2::ONE, Vec2::splat(MAX_VIEW));
                if view != self.view {
                    self.view = view;
                    self.reset_camera(ctx);
                }
            }
        }
    }

    /// Touching a planet grounds the ship; leaving the last one frees the
    /// controls.
    fn track_landing(&mut self, pairs: &[CollisionPair]) {
        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        for pair in pairs {
            let Some(other) = pair.other(ship.id) else {
                continue;
            };
            if self.field.params(other).is_none() {
                continue;
            }
            if pair.started {
                self.contacts.insert(other);
            } else {
                self.contacts.remove(&other);
            }
        }
        let landed = !self.contacts.is_empty();
        if landed != ship.landed {
            ship.landed = landed;
            if landed {
                log::debug!("ship landed ({} contacts)", self.contacts.len());
            } else {
                log::debug!("ship lifted off");
            }
        }
    }

    /// Color planets that pulled on something during the latest field pass.
    fn sync_highlights(&self, ctx: &mut EngineContext) {
        for planet in &self.planets {
            let color = if self.field.is_active(planet.id) {
                HIGHLIGHT_COLOR
            } else {
                PLANET_COLOR
            };
            let Some(wire) = ctx.scene.get_mut(planet.id).and_then(|e| e.wire.as_mut()) else {
                continue;
            };
            if wire.color != color {
                if color == HIGHLIGHT_COLOR {
                    log::debug!("{}: field active", planet.name);
                }
                wire.color = color;
            }
        }
    }

    fn fly(&self, ctx: &mut EngineContext, keys: NavKeys) {
        let Some(ship) = self.ship.as_ref() else {
            return;
        };
        let Some((angle, position)) = ctx.scene.get(ship.id).map(|e| (e.rotation, e.pos)) else {
            return;
        };
        let dt = ctx.physics.dt();

        let step = ship.fly(keys, angle, ctx.angular_velocity(ship.id) * dt);

        ctx.set_rotation(ship.id, step.angle);
        if let Some(thrust) = step.thrust {
            ctx.apply_force(ship.id, thrust * FORCE_SCALE);
            ctx.set_angular_velocity(ship.id, step.angular_velocity / dt);
        }

        if let (Some(follow), Some((min, _))) = (&self.follow, ctx.body_bounds(ship.id)) {
            follow.apply(&mut ctx.camera, min);
        }

        ctx.hud
            .publish(hud::readouts(&step, step.angular_velocity, position));
    }
}

impl Default for PlanetHopper {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PlanetHopper {
    fn config(&self) -> GameConfig {
        GameConfig {
            world_width: self.view.x,
            world_height: self.view.y,
            tracked_keys: NavKey::codes(),
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.spawn_system(ctx);
        self.reset_camera(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_events(ctx, input);
        self.track_landing(ctx.collisions());
        self.sync_highlights(ctx);

        if input.keys().pressed_count() == 0 {
            return;
        }
        self.fly(ctx, NavKeys::from_state(input.keys()));
    }

    fn force_field(&mut self) -> Option<&mut dyn ForceField> {
        Some(&mut self.field)
    }

    fn load_config(&mut self, ctx: &mut EngineContext, json: &str) {
        match SystemConfig::from_json(json) {
            Ok(config) => {
                self.clear_system(ctx);
                self.config = config;
                self.spawn_system(ctx);
                self.reset_camera(ctx);
            }
            Err(err) => log::warn!("planet-hopper: config rejected: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PlanetConfig, ShipConfig};
    use std::f32::consts::PI;

    fn setup(game: &mut PlanetHopper) -> (EngineContext, InputQueue) {
        let config = game.config();
        let mut ctx = EngineContext::with_config(&config);
        let input = InputQueue::with_keys(KeyState::tracking(&config.tracked_keys));
        game.init(&mut ctx);
        (ctx, input)
    }

    /// One fixed step, sequenced the way the runner does it.
    fn tick(game: &mut PlanetHopper, ctx: &mut EngineContext, input: &mut InputQueue) {
        ctx.step_physics(game.force_field());
        game.update(ctx, input);
        input.drain();
    }

    fn ship_id(game: &PlanetHopper) -> EntityId {
        game.ship().unwrap().id
    }

    fn lone_planet_system() -> SystemConfig {
        SystemConfig {
            ship: ShipConfig {
                pos_x: 150.0,
                pos_y: 0.0,
                ..ShipConfig::default()
            },
            planets: vec![PlanetConfig::new("home", (0.0, 0.0), 50.0, 0.5e-7, 4.0)],
        }
    }

    #[test]
    fn init_spawns_default_system() {
        let mut game = PlanetHopper::new();
        let (ctx, _) = setup(&mut game);

        assert_eq!(game.planet_count(), 6);
        assert_eq!(ctx.scene.ids_by_tag(PLANET_TAG).len(), 6);
        assert_eq!(ctx.physics.attractor_count(), 6);
        assert_eq!(ctx.scene.len(), 7);

        let ship = ctx.scene.get(ship_id(&game)).unwrap();
        assert_eq!(ship.pos, Vec2::new(400.0, 200.0));
        assert!(game.planet_id("planet6").is_some());
    }

    #[test]
    fn camera_starts_on_the_ship() {
        let mut game = PlanetHopper::new();
        let (ctx, _) = setup(&mut game);
        let (min, _) = ctx.body_bounds(ship_id(&game)).unwrap();
        let vp = ctx.camera.viewport();
        assert!((vp.min - (min - Vec2::new(512.0, 384.0))).length() < 1e-3);
        assert!((vp.width() - 1024.0).abs() < 1e-3);
    }

    #[test]
    fn idle_ticks_change_nothing() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);
        let start = ctx.scene.get(id).map(|e| (e.pos, e.rotation)).unwrap();
        let viewport = ctx.camera.viewport();

        for _ in 0..10 {
            tick(&mut game, &mut ctx, &mut input);
        }

        assert_eq!(ctx.hud.revision(), 0);
        assert_eq!(ctx.hud.line(0), Some(""));
        assert_eq!(ctx.camera.viewport(), viewport);
        let now = ctx.scene.get(id).map(|e| (e.pos, e.rotation)).unwrap();
        assert!((now.0 - start.0).length() < 1e-4);
        assert!((now.1 - start.1).abs() < 1e-6);
        assert_eq!(ctx.angular_velocity(id), 0.0);
    }

    #[test]
    fn hud_freezes_when_keys_are_released() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);

        input.push(InputEvent::KeyDown { key_code: NavKey::Up.code() });
        tick(&mut game, &mut ctx, &mut input);
        input.push(InputEvent::KeyUp { key_code: NavKey::Up.code() });
        let revision = ctx.hud.revision();
        let lines = ctx.hud.lines().to_vec();

        for _ in 0..10 {
            tick(&mut game, &mut ctx, &mut input);
        }
        assert_eq!(ctx.hud.revision(), revision);
        assert_eq!(ctx.hud.lines(), lines.as_slice());
    }

    #[test]
    fn left_turns_the_ship() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);

        input.push(InputEvent::KeyDown { key_code: NavKey::Left.code() });
        tick(&mut game, &mut ctx, &mut input);

        let rotation = ctx.scene.get(id).unwrap().rotation;
        assert!((rotation + PI / 90.0).abs() < 1e-5);
        assert_eq!(ctx.hud.revision(), 1);
        assert_eq!(ctx.hud.line(hud::SLOT_FORCE), Some("x: 0.00, y: 0.00, acc.: 0.00"));
        assert_eq!(ctx.hud.line(hud::SLOT_POSITION), Some("posX: 400.00, posY: 200.00"));

        tick(&mut game, &mut ctx, &mut input);
        let rotation = ctx.scene.get(id).unwrap().rotation;
        assert!((rotation + 2.0 * PI / 90.0).abs() < 1e-5);
    }

    #[test]
    fn up_pushes_the_ship_backwards_along_its_heading() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);

        input.push(InputEvent::KeyDown { key_code: NavKey::Up.code() });
        for _ in 0..3 {
            tick(&mut game, &mut ctx, &mut input);
        }

        // Heading 0 and a negative forward speed: thrust points toward −X.
        let vel = ctx.velocity(id);
        assert!(vel.x < 0.0, "vel = {:?}", vel);
        assert!(vel.y.abs() < 1e-3);
        assert_eq!(ctx.hud.line(hud::SLOT_SPIN), Some("ang. velocity: 0.00"));
        assert!(ctx.hud.line(hud::SLOT_FORCE).unwrap().ends_with("acc.: 0.40"));
    }

    #[test]
    fn camera_follows_a_moving_ship() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let before = ctx.camera.viewport();

        input.push(InputEvent::KeyDown { key_code: NavKey::Up.code() });
        for _ in 0..30 {
            tick(&mut game, &mut ctx, &mut input);
        }
        let after = ctx.camera.viewport();
        assert!(after.min.x < before.min.x);
        assert!((after.width() - before.width()).abs() < 1e-3);
    }

    #[test]
    fn planet_pulls_ship_and_lights_up() {
        let mut game = PlanetHopper::with_config(lone_planet_system());
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);
        let home = game.planet_id("home").unwrap();

        for _ in 0..5 {
            tick(&mut game, &mut ctx, &mut input);
        }

        assert!(ctx.velocity(id).x < 0.0);
        assert!(game.field().is_active(home));
        let wire = ctx.scene.get(home).unwrap().wire.unwrap();
        assert_eq!(wire.color, HIGHLIGHT_COLOR);
        assert_eq!(ctx.scene.get(home).unwrap().pos, Vec2::ZERO);
    }

    #[test]
    fn planets_out_of_range_stay_plain() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        tick(&mut game, &mut ctx, &mut input);

        for id in ctx.scene.ids_by_tag(PLANET_TAG) {
            let wire = ctx.scene.get(id).unwrap().wire.unwrap();
            assert_eq!(wire.color, PLANET_COLOR);
        }
    }

    #[test]
    fn touching_a_planet_lands_the_ship() {
        let mut config = lone_planet_system();
        // One hull vertex starts inside the planet.
        config.ship.pos_x = 0.0;
        config.ship.pos_y = -57.0;
        let mut game = PlanetHopper::with_config(config);
        let (mut ctx, mut input) = setup(&mut game);

        tick(&mut game, &mut ctx, &mut input);
        assert!(game.ship().unwrap().landed);
    }

    #[test]
    fn landing_locks_turning_until_lift_off() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);
        let planet = game.planet_id("planet1").unwrap();

        let landing = CollisionPair { entity_a: id, entity_b: planet, started: true };
        game.track_landing(&[landing]);
        assert!(game.ship().unwrap().landed);

        input.push(InputEvent::KeyDown { key_code: NavKey::Left.code() });
        tick(&mut game, &mut ctx, &mut input);
        assert!(ctx.scene.get(id).unwrap().rotation.abs() < 1e-6);

        game.track_landing(&[CollisionPair { started: false, ..landing }]);
        assert!(!game.ship().unwrap().landed);
    }

    #[test]
    fn leaving_one_of_two_planets_keeps_the_ship_down() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);
        let first = game.planet_id("planet1").unwrap();
        let second = game.planet_id("planet3").unwrap();
        let touch = |planet, started| CollisionPair { entity_a: id, entity_b: planet, started };

        game.track_landing(&[touch(first, true), touch(second, true)]);
        game.track_landing(&[touch(first, false)]);
        assert!(game.ship().unwrap().landed);

        input.push(InputEvent::KeyDown { key_code: NavKey::Right.code() });
        tick(&mut game, &mut ctx, &mut input);
        assert!(ctx.scene.get(id).unwrap().rotation.abs() < 1e-6);

        game.track_landing(&[touch(second, false)]);
        assert!(!game.ship().unwrap().landed);
    }

    #[test]
    fn camera_tracks_the_turned_hull() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);
        let id = ship_id(&game);

        input.push(InputEvent::KeyDown { key_code: NavKey::Left.code() });
        for _ in 0..20 {
            tick(&mut game, &mut ctx, &mut input);
        }

        let ship = ctx.scene.get(id).unwrap();
        let turn = Vec2::from_angle(ship.rotation);
        let ColliderDesc::Triangle { a, b, c } = ColliderDesc::regular_triangle(game.config.ship.size)
        else {
            panic!("ship hull is a triangle");
        };
        let hull_min = [a, b, c]
            .into_iter()
            .map(|p| ship.pos + turn.rotate(p))
            .fold(Vec2::splat(f32::INFINITY), Vec2::min);

        let vp = ctx.camera.viewport();
        let expected = hull_min - Vec2::new(512.0, 384.0);
        assert!((vp.min - expected).length() < 1e-2, "camera {:?}, hull {:?}", vp.min, hull_min);
    }

    #[test]
    fn resize_recaptures_the_view() {
        let mut game = PlanetHopper::new();
        let (mut ctx, mut input) = setup(&mut game);

        input.push(InputEvent::Custom { kind: CUSTOM_RESIZE, a: 600.0, b: 2000.0, c: 0.0 });
        tick(&mut game, &mut ctx, &mut input);

        let vp = ctx.camera.viewport();
        assert!((vp.width() - 600.0).abs() < 1e-3);
        assert!((vp.height() - MAX_VIEW).abs() < 1e-3);
        let (min, _) = ctx.body_bounds(ship_id(&game)).unwrap();
        assert!((vp.min - (min - Vec2::new(300.0, 512.0))).length() < 1e-3);
    }

    #[test]
    fn load_config_respawns_the_system() {
        let mut game = PlanetHopper::new();
        let (mut ctx, _) = setup(&mut game);

        let json = r#"{
            "ship": { "posX": 10, "posY": 20 },
            "planets": [
                { "id": "solo", "posX": 500, "posY": 500, "radius": 80,
                  "gravityForce": 1e-7, "attractionRadius": 3 }
            ]
        }"#;
        game.load_config(&mut ctx, json);

        assert_eq!(game.planet_count(), 1);
        assert_eq!(game.field().len(), 1);
        assert_eq!(ctx.physics.attractor_count(), 1);
        assert_eq!(ctx.scene.len(), 2);
        let ship = ctx.scene.get(ship_id(&game)).unwrap();
        assert_eq!(ship.pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn bad_config_keeps_the_current_system() {
        let mut game = PlanetHopper::new();
        let (mut ctx, _) = setup(&mut game);
        let ship = ship_id(&game);

        game.load_config(&mut ctx, r#"{ "planets": [ { "id": "x" } ] }"#);

        assert_eq!(game.planet_count(), 6);
        assert_eq!(ship_id(&game), ship);
        assert_eq!(ctx.scene.len(), 7);
    }
}
