//! Influence-conflict resolution.
//!
//! After every board mutation, each Farm and Industry is checked against the
//! freshly recomputed influence sets: contested by both sides, it is
//! destroyed; claimed only by the opponent, it changes owner. Capitals and
//! Armies are exempt. Resolution is a single pass over the current sets —
//! ownership changes made here do not retrigger another pass within the same
//! mutation.

use rustc_hash::FxHashSet;

use crate::core::{Player, PlayerPair, Pos};

use super::unit::{Unit, UnitKind};

/// Apply one resolution pass. Returns true if any unit was destroyed or
/// changed owner.
pub(crate) fn resolve(
    units: &mut im::HashMap<Pos, Unit>,
    influence: &PlayerPair<FxHashSet<Pos>>,
) -> bool {
    let mut destroyed: Vec<Pos> = Vec::new();
    let mut transferred: Vec<(Pos, Player)> = Vec::new();

    for unit in units.values() {
        if !matches!(unit.kind, UnitKind::Farm | UnitKind::Industry) {
            continue;
        }
        let in_white = influence[Player::White].contains(&unit.pos);
        let in_black = influence[Player::Black].contains(&unit.pos);
        match (in_white, in_black) {
            (true, true) => destroyed.push(unit.pos),
            (true, false) if unit.owner == Player::Black => {
                transferred.push((unit.pos, Player::White));
            }
            (false, true) if unit.owner == Player::White => {
                transferred.push((unit.pos, Player::Black));
            }
            _ => {}
        }
    }

    for pos in &destroyed {
        units.remove(pos);
    }
    for (pos, new_owner) in &transferred {
        if let Some(unit) = units.get_mut(pos) {
            unit.owner = *new_owner;
        }
    }

    !destroyed.is_empty() || !transferred.is_empty()
}
