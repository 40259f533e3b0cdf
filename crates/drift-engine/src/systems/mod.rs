pub mod hud;
pub mod wireframe;
