//! Turn phases and per-phase budget tracking.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::board::UnitKind;

/// The three phases of a turn, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Move,
    Build,
    Remove,
}

impl Phase {
    /// Wire step code (Move = 0, Build = 1, Remove = 2).
    #[must_use]
    pub const fn step(self) -> u8 {
        match self {
            Phase::Move => 0,
            Phase::Build => 1,
            Phase::Remove => 2,
        }
    }

    /// Decode a wire step code.
    #[must_use]
    pub const fn from_step(step: u8) -> Option<Self> {
        match step {
            0 => Some(Phase::Move),
            1 => Some(Phase::Build),
            2 => Some(Phase::Remove),
            _ => None,
        }
    }

    /// The phase that follows this one, or `None` after `Remove`.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Phase::Move => Some(Phase::Build),
            Phase::Build => Some(Phase::Remove),
            Phase::Remove => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Move => "move",
            Phase::Build => "build",
            Phase::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Builds recorded during one Build phase.
///
/// At most two units of the same kind and three units total per phase, and
/// a third build must differ in kind from both prior builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTally {
    counts: [u8; 3],
}

impl BuildTally {
    /// Whether one more unit of `kind` may be built this phase.
    #[must_use]
    pub fn allows(self, kind: UnitKind) -> bool {
        let Some(code) = kind.build_code() else {
            return false;
        };
        let idx = code as usize;
        if self.counts[idx] >= 2 {
            return false;
        }
        let total = self.total();
        if total >= 3 {
            return false;
        }
        // Third build must introduce a kind not built yet this phase.
        !(total == 2 && self.counts[idx] > 0)
    }

    /// Record a completed build. Caller checks `allows` first.
    pub fn record(&mut self, kind: UnitKind) {
        if let Some(code) = kind.build_code() {
            self.counts[code as usize] += 1;
        }
    }

    /// Total builds recorded this phase.
    #[must_use]
    pub fn total(self) -> u8 {
        self.counts.iter().sum()
    }
}
