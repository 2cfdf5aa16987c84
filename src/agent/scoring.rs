//! Heuristic scoring terms shared by the decision policies.
//!
//! Weights are the reference tuning: capital capture dwarfs everything
//! (10000), army capture is worth 100, plain expansion 1 with a +10 bonus
//! inside own influence. Build and removal values are small integers shaped
//! by Manhattan distance to the two capitals and by local adjacency.

use crate::board::{Board, Unit, UnitKind};
use crate::core::{Player, Pos};

/// Score a candidate Army destination.
pub(crate) fn evaluate_move(board: &Board, player: Player, to: Pos) -> i32 {
    if let Some(target) = board.unit_at(to) {
        return match target.kind {
            UnitKind::Capital => 10_000,
            UnitKind::Army => 100,
            // Farms and industries can't be stepped on; legality filtered
            // these out already.
            UnitKind::Farm | UnitKind::Industry => 0,
        };
    }
    let mut score = 1;
    if board.areas().influence[player].contains(&to) {
        score += 10;
    }
    score
}

/// Positional term used by the hard policy: press toward the enemy Capital
/// and hug own structures.
pub(crate) fn evaluate_position_value(board: &Board, player: Player, pos: Pos) -> i32 {
    let mut score = 0;

    if let Some(enemy_capital) = board.capital_of(player.opponent()) {
        score -= pos.manhattan(enemy_capital) as i32 * 2;
    }

    for n in pos.neighbors8(board.grid().size()) {
        let Some(unit) = board.unit_at(n) else {
            continue;
        };
        if unit.owner != player {
            continue;
        }
        score += match unit.kind {
            UnitKind::Farm => 5,
            UnitKind::Industry => 8,
            UnitKind::Capital => 20,
            UnitKind::Army => 0,
        };
    }

    score
}

/// Score a candidate build position for the given kind.
pub(crate) fn evaluate_build_position(
    board: &Board,
    player: Player,
    pos: Pos,
    kind: UnitKind,
) -> i32 {
    let mut score = 0;

    if let Some(own_capital) = board.capital_of(player) {
        score += (10 - pos.manhattan(own_capital) as i32) * 2;
    }
    if let Some(enemy_capital) = board.capital_of(player.opponent()) {
        score += pos.manhattan(enemy_capital) as i32;
    }

    match kind {
        UnitKind::Farm => {
            // Keep farms away from smokestacks, whoever owns them.
            for n in pos.neighbors8(board.grid().size()) {
                if board.unit_at(n).map_or(false, |u| u.kind == UnitKind::Industry) {
                    score -= 20;
                }
            }
        }
        UnitKind::Industry => {
            for n in pos.neighbors8(board.grid().size()) {
                if board.unit_at(n).map_or(false, |u| u.kind == UnitKind::Farm) {
                    score += 10;
                }
            }
        }
        UnitKind::Army => {
            if let Some(enemy_capital) = board.capital_of(player.opponent()) {
                score += (20 - pos.manhattan(enemy_capital) as i32) * 3;
            }
        }
        UnitKind::Capital => {}
    }

    score
}

/// Value of an own unit when ranking removal candidates; lowest goes first.
pub(crate) fn evaluate_unit_value(board: &Board, player: Player, unit: &Unit) -> i32 {
    match unit.kind {
        UnitKind::Farm => 10,
        UnitKind::Industry => 15,
        UnitKind::Army => {
            let mut value = 20;
            if let Some(enemy_capital) = board.capital_of(player.opponent()) {
                value += 20 - unit.pos.manhattan(enemy_capital) as i32;
            }
            value
        }
        UnitKind::Capital => i32::MAX,
    }
}
