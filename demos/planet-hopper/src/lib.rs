use wasm_bindgen::prelude::*;

pub mod attraction;
pub mod config;
pub mod follow;
pub mod game;
pub mod hud;
pub mod ship;

use game::PlanetHopper;

drift_web::export_game!(PlanetHopper, "planet-hopper");
