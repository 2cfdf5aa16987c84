//! Core types: players, coordinates, deterministic RNG.

mod player;
mod pos;
mod rng;

pub use player::{Player, PlayerPair};
pub use pos::Pos;
pub use rng::{GameRng, GameRngState};
