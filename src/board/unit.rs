//! Units: the pieces that occupy grid cells.

use serde::{Deserialize, Serialize};

use crate::core::{Player, Pos};

/// Single-step moves an Army may take per turn.
pub const ARMY_MOVE_CAP: u32 = 3;

/// Kind of unit. Closed enum; every dispatch on kind matches exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Per-player unique, indestructible; its capture ends the game.
    Capital,
    /// Mobile unit projecting influence.
    Army,
    /// Stationary; farm count caps Industry and Army counts.
    Farm,
    /// Stationary; pollutes its orthogonal neighborhood.
    Industry,
}

impl UnitKind {
    /// Wire code used for initial-state unit records
    /// (Army = 1, Farm = 2, Industry = 3, Capital = 4).
    #[must_use]
    pub const fn wire_code(self) -> u8 {
        match self {
            UnitKind::Army => 1,
            UnitKind::Farm => 2,
            UnitKind::Industry => 3,
            UnitKind::Capital => 4,
        }
    }

    /// Decode an initial-state wire code.
    #[must_use]
    pub const fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(UnitKind::Army),
            2 => Some(UnitKind::Farm),
            3 => Some(UnitKind::Industry),
            4 => Some(UnitKind::Capital),
            _ => None,
        }
    }

    /// Build-action code (Farm = 0, Industry = 1, Army = 2).
    ///
    /// Capitals cannot be built, so they have no code.
    #[must_use]
    pub const fn build_code(self) -> Option<u8> {
        match self {
            UnitKind::Farm => Some(0),
            UnitKind::Industry => Some(1),
            UnitKind::Army => Some(2),
            UnitKind::Capital => None,
        }
    }

    /// Decode a build-action code.
    #[must_use]
    pub const fn from_build_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(UnitKind::Farm),
            1 => Some(UnitKind::Industry),
            2 => Some(UnitKind::Army),
            _ => None,
        }
    }
}

/// A unit on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub kind: UnitKind,
    pub owner: Player,
    pub pos: Pos,
    /// Single-step moves taken this turn. Only meaningful for Armies;
    /// reset at the start of the owner's Move phase.
    pub move_count: u32,
}

impl Unit {
    /// Create a unit with a fresh move count.
    #[must_use]
    pub const fn new(kind: UnitKind, owner: Player, pos: Pos) -> Self {
        Self {
            kind,
            owner,
            pos,
            move_count: 0,
        }
    }
}
