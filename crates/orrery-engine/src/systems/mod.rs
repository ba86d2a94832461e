pub mod render;
pub mod effects;
