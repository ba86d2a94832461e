use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod body;
mod game;
mod laser;
mod orbit;
mod sun;
use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

/// Planet name for the info panel (empty for an unknown index).
#[wasm_bindgen]
pub fn planet_name(index: u32) -> String {
    bodies::PLANETS
        .get(index as usize)
        .map(|p| p.name.to_string())
        .unwrap_or_default()
}

/// Fact sheet shown when a planet is selected.
#[wasm_bindgen]
pub fn planet_description(index: u32) -> String {
    bodies::describe(index as usize)
}
