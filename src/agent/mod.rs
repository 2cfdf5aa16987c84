//! The machine player: per-phase heuristics over the board's query API.

mod policy;
mod scoring;

pub use policy::{DecisionAgent, Difficulty};
