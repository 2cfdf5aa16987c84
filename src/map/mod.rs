//! Terrain grid and map generation.

mod generator;
mod grid;

pub use generator::{generate, MapLayout, DEFAULT_SIZE};
pub use grid::{Grid, Terrain};
