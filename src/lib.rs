//! # half-frontier
//!
//! Rules engine for a two-player, turn-based territory-control game on a
//! square grid. Each side owns a Capital and balances three unit types
//! (Farm, Industry, Army) whose counts constrain each other; armies project
//! influence that can flip or destroy enemy structures.
//!
//! ## Design Principles
//!
//! 1. **Single Source of Truth**: the [`board::Board`] holds units and all
//!    derived state; every mutation recomputes areas and resolves influence
//!    conflicts before returning.
//!
//! 2. **Pure Legality, Unconditional Apply**: legality checks are boolean
//!    queries that never fail; mutations assume the caller checked first.
//!    [`game::Match`] is the gate that pairs the two for every action source
//!    (local player, machine player, remote peer).
//!
//! 3. **Explicit Randomness**: map generation and the easy policy's random
//!    scoring take a seeded [`core::GameRng`], so games replay exactly.
//!
//! 4. **Cheap Snapshots**: unit storage is persistent (`im`), so cloning a
//!    board for the agent's search scratch space is O(1).
//!
//! ## Modules
//!
//! - `core`: players, positions, RNG
//! - `map`: terrain grid and map generation
//! - `board`: units, derived areas, influence resolution, rules engine
//! - `game`: turn/phase state machine and action gating
//! - `agent`: heuristic machine player
//! - `protocol`: wire messages and snapshot codec

pub mod agent;
pub mod board;
pub mod core;
pub mod game;
pub mod map;
pub mod protocol;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, Player, PlayerPair, Pos};

pub use crate::map::{generate, Grid, MapLayout, Terrain, DEFAULT_SIZE};

pub use crate::board::{recompute, Board, DerivedAreas, Unit, UnitKind, ARMY_MOVE_CAP};

pub use crate::game::{ActionError, BuildTally, Match, Phase};

pub use crate::agent::{DecisionAgent, Difficulty};

pub use crate::protocol::{
    decode_snapshot, encode_snapshot, GameAction, InitState, PieceRecord, ProtocolError,
    TurnUpdate,
};
