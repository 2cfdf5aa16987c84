//! Wire messages for two-party synchronized play.
//!
//! The shapes here are a fixed contract with the relay layer: actions are
//! tagged `{"action_type": ..., "action_data": {...}}` objects, turn
//! broadcasts carry numeric player and step codes, and initial-state sync
//! carries the raw grid rows plus flat unit records.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Unit, UnitKind};
use crate::core::{Player, Pos};
use crate::map::{Grid, Terrain};

use super::ProtocolError;

/// A player action as it travels over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action_type", content = "action_data", rename_all = "snake_case")]
pub enum GameAction {
    /// Move an Army one step: `from`/`to` are `[x, y]` pairs.
    Move { from: [u8; 2], to: [u8; 2] },
    /// Build a unit (`build_type`: 0 = Farm, 1 = Industry, 2 = Army).
    Build { x: u8, y: u8, build_type: u8 },
    /// Demolish an own unit.
    Remove { x: u8, y: u8 },
    /// Advance from one phase to the next without finishing it.
    SkipPhase { from_step: u8, to_step: u8 },
    /// End the turn from any phase.
    EndTurn {},
}

impl GameAction {
    /// Move action from typed positions.
    #[must_use]
    pub fn move_army(from: Pos, to: Pos) -> Self {
        GameAction::Move {
            from: [from.x, from.y],
            to: [to.x, to.y],
        }
    }

    /// Build action from a typed position and kind.
    ///
    /// Returns `None` for kinds without a build code (Capital).
    #[must_use]
    pub fn build(pos: Pos, kind: UnitKind) -> Option<Self> {
        kind.build_code().map(|build_type| GameAction::Build {
            x: pos.x,
            y: pos.y,
            build_type,
        })
    }

    /// Remove action from a typed position.
    #[must_use]
    pub fn remove(pos: Pos) -> Self {
        GameAction::Remove { x: pos.x, y: pos.y }
    }
}

/// Turn/phase broadcast: numeric player code plus step code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnUpdate {
    pub current_player: u8,
    pub game_step: u8,
}

/// One unit record in the initial-state sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRecord {
    #[serde(rename = "type")]
    pub kind: u8,
    pub player: u8,
    pub x: u8,
    pub y: u8,
}

/// Full initial board state: terrain rows (indexed `grid[y][x]`) and units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitState {
    pub grid: Vec<Vec<u8>>,
    pub pieces: Vec<PieceRecord>,
}

impl InitState {
    /// Snapshot a board for initial-state sync.
    ///
    /// Units are listed in `(y, x)` scan order so the export is stable.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        let grid = board.grid();
        let size = grid.size();
        let rows = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| grid.terrain(Pos::new(x, y)).wire_code())
                    .collect()
            })
            .collect();

        let mut units: Vec<&Unit> = board.units().collect();
        units.sort_by_key(|u| (u.pos.y, u.pos.x));
        let pieces = units
            .into_iter()
            .map(|u| PieceRecord {
                kind: u.kind.wire_code(),
                player: u.owner.wire_code(),
                x: u.pos.x,
                y: u.pos.y,
            })
            .collect();

        Self { grid: rows, pieces }
    }

    /// Rebuild a board from a received initial state.
    pub fn into_board(self) -> Result<Board, ProtocolError> {
        let size = self.grid.len();
        if size == 0 || size > u8::MAX as usize {
            return Err(ProtocolError::BadGrid);
        }
        let mut cells = Vec::with_capacity(size * size);
        for row in &self.grid {
            if row.len() != size {
                return Err(ProtocolError::BadGrid);
            }
            for &code in row {
                cells.push(Terrain::from_wire_code(code).ok_or(ProtocolError::BadTerrain(code))?);
            }
        }
        let grid = Grid::from_cells(size as u8, cells).ok_or(ProtocolError::BadGrid)?;

        let mut units = Vec::with_capacity(self.pieces.len());
        for record in &self.pieces {
            let kind =
                UnitKind::from_wire_code(record.kind).ok_or(ProtocolError::BadUnit(record.kind))?;
            let owner = Player::from_wire_code(record.player)
                .ok_or(ProtocolError::BadPlayer(record.player))?;
            let pos = Pos::new(record.x, record.y);
            if !grid.contains(pos) {
                return Err(ProtocolError::OutOfBounds(record.x, record.y));
            }
            units.push(Unit::new(kind, owner, pos));
        }

        Ok(Board::from_parts(grid, units))
    }
}
