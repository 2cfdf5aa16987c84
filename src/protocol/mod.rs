//! Wire contract and snapshot codec.
//!
//! Message shapes live in [`messages`]; a whole game can also be frozen to
//! bytes with the snapshot codec for persistence or spectator catch-up.

mod messages;

pub use messages::{GameAction, InitState, PieceRecord, TurnUpdate};

use thiserror::Error;

use crate::game::Match;

/// Failures while decoding wire data or snapshots.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Grid rows missing, ragged, or of an unsupported size.
    #[error("malformed grid rows")]
    BadGrid,
    /// Unknown terrain wire code.
    #[error("unknown terrain code {0}")]
    BadTerrain(u8),
    /// Unknown unit-kind wire code.
    #[error("unknown unit code {0}")]
    BadUnit(u8),
    /// Unknown player wire code.
    #[error("unknown player code {0}")]
    BadPlayer(u8),
    /// Unit record positioned outside the grid.
    #[error("unit position ({0}, {1}) outside the grid")]
    OutOfBounds(u8, u8),
    /// Snapshot bytes failed to encode or decode.
    #[error("snapshot codec failure: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Freeze a whole game (board, turn state, counters) to bytes.
pub fn encode_snapshot(game: &Match) -> Result<Vec<u8>, ProtocolError> {
    Ok(bincode::serialize(game)?)
}

/// Restore a game from snapshot bytes.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Match, ProtocolError> {
    Ok(bincode::deserialize(bytes)?)
}
