pub mod field;
pub mod physics;
pub mod scene;
pub mod time;
