//! Decision policies for a machine-driven player.

use serde::{Deserialize, Serialize};

use crate::board::{Board, UnitKind, ARMY_MOVE_CAP};
use crate::core::{GameRng, Player, Pos};

use super::scoring;

/// Any candidate scoring at or below this is discarded.
const SCORE_FLOOR: i32 = -9999;

/// Policy strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Moves get a uniform random score; builds and removals stay heuristic.
    #[default]
    Easy,
    /// Heuristic scoring.
    Normal,
    /// Heuristic scoring plus positional pressure terms.
    Hard,
}

/// Chooses a full turn's worth of moves, builds, and removals.
///
/// The agent only reads the board and returns intended actions; the caller
/// applies them through the same legality-gated path as a human player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionAgent {
    difficulty: Difficulty,
}

impl DecisionAgent {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Pick up to `move_limit` Army moves, best-first.
    ///
    /// Each committed choice is applied to a scratch copy of the board so
    /// later iterations see the army at its new position; the scratch copy
    /// is dropped when the call returns. Stops early when nothing scores
    /// above the floor or a Capital capture ends the search.
    #[must_use]
    pub fn choose_moves(
        &self,
        board: &Board,
        player: Player,
        move_limit: u32,
        rng: &mut GameRng,
    ) -> Vec<(Pos, Pos)> {
        let mut moves = Vec::new();
        if board.is_danger(player) {
            return moves;
        }

        let mut scratch = board.clone();
        let mut used = 0;

        for _ in 0..move_limit {
            let mut best: Option<(Pos, Pos)> = None;
            let mut best_score = SCORE_FLOOR;

            let mut armies: Vec<(Pos, u32)> = scratch
                .units_of(player, Some(UnitKind::Army))
                .map(|u| (u.pos, u.move_count))
                .collect();
            armies.sort_by_key(|(pos, _)| (pos.y, pos.x));

            for (from, move_count) in armies {
                if move_count >= ARMY_MOVE_CAP {
                    continue;
                }
                for to in from.neighbors8(scratch.grid().size()) {
                    if !scratch.can_move_army(from, to, player, used, move_limit) {
                        continue;
                    }
                    let score = match self.difficulty {
                        Difficulty::Easy => rng.gen_range(0..11),
                        Difficulty::Normal => scoring::evaluate_move(&scratch, player, to),
                        Difficulty::Hard => {
                            scoring::evaluate_move(&scratch, player, to)
                                + scoring::evaluate_position_value(&scratch, player, to)
                        }
                    };
                    if score > best_score {
                        best_score = score;
                        best = Some((from, to));
                    }
                }
            }

            let Some((from, to)) = best else {
                break;
            };
            moves.push((from, to));
            scratch.move_unit(from, to);
            used += 1;
            if scratch.winner().is_some() {
                break;
            }
        }

        tracing::debug!(%player, count = moves.len(), "moves chosen");
        moves
    }

    /// Pick up to three builds.
    ///
    /// In danger, shore up the deficient kinds; otherwise one Farm, one
    /// Industry, one Army, each at its best-scoring legal position.
    #[must_use]
    pub fn choose_builds(&self, board: &Board, player: Player) -> Vec<(Pos, UnitKind)> {
        let mut builds = if board.is_danger(player) {
            self.emergency_builds(board, player)
        } else {
            self.strategic_builds(board, player)
        };
        builds.truncate(3);
        builds
    }

    fn emergency_builds(&self, board: &Board, player: Player) -> Vec<(Pos, UnitKind)> {
        let farm = board.count_of(player, UnitKind::Farm);
        let industry = board.count_of(player, UnitKind::Industry);
        let army = board.count_of(player, UnitKind::Army);

        let mut builds = Vec::new();
        if industry > farm / 2 {
            builds.extend(find_build_positions(board, player, UnitKind::Farm, 2));
        }
        if army > industry {
            builds.extend(find_build_positions(board, player, UnitKind::Industry, 1));
        }
        builds
    }

    fn strategic_builds(&self, board: &Board, player: Player) -> Vec<(Pos, UnitKind)> {
        let mut builds = Vec::new();
        builds.extend(find_build_positions(board, player, UnitKind::Farm, 1));
        builds.extend(find_build_positions(board, player, UnitKind::Industry, 1));
        builds.extend(find_build_positions(board, player, UnitKind::Army, 1));
        builds
    }

    /// Pick removals: emergency rebalancing first, otherwise shed the two
    /// lowest-value units.
    #[must_use]
    pub fn choose_removals(&self, board: &Board, player: Player) -> Vec<Pos> {
        let farm = board.count_of(player, UnitKind::Farm);
        let industry = board.count_of(player, UnitKind::Industry);
        let army = board.count_of(player, UnitKind::Army);

        let mut removals = Vec::new();
        if industry > farm / 2 {
            if let Some(pos) = first_removable(board, player, UnitKind::Industry) {
                removals.push(pos);
            }
        }
        if army > farm / 2 || army > industry {
            if let Some(pos) = first_removable(board, player, UnitKind::Army) {
                removals.push(pos);
            }
        }
        if !removals.is_empty() {
            return removals;
        }

        let mut candidates: Vec<(i32, Pos)> = board
            .units_of(player, None)
            .filter(|u| u.kind != UnitKind::Capital && board.can_remove(u.pos, player))
            .map(|u| (scoring::evaluate_unit_value(board, player, u), u.pos))
            .collect();
        candidates.sort_by_key(|&(value, pos)| (value, pos.y, pos.x));
        candidates.into_iter().take(2).map(|(_, pos)| pos).collect()
    }
}

/// The `count` best-scoring legal positions for building `kind`, scanned in
/// row-major order so ties resolve the same way every call.
fn find_build_positions(
    board: &Board,
    player: Player,
    kind: UnitKind,
    count: usize,
) -> Vec<(Pos, UnitKind)> {
    let mut scored: Vec<(i32, Pos)> = board
        .grid()
        .positions()
        .filter(|&pos| board.can_build(pos, player, kind))
        .map(|pos| (scoring::evaluate_build_position(board, player, pos, kind), pos))
        .collect();
    scored.sort_by_key(|&(score, _)| std::cmp::Reverse(score));
    scored
        .into_iter()
        .take(count)
        .map(|(_, pos)| (pos, kind))
        .collect()
}

fn first_removable(board: &Board, player: Player, kind: UnitKind) -> Option<Pos> {
    let mut positions: Vec<Pos> = board
        .units_of(player, Some(kind))
        .map(|u| u.pos)
        .filter(|&pos| board.can_remove(pos, player))
        .collect();
    positions.sort_by_key(|pos| (pos.y, pos.x));
    positions.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Unit;
    use crate::map::{Grid, Terrain};

    fn board(units: Vec<Unit>) -> Board {
        Board::from_parts(Grid::filled(12, Terrain::Land), units)
    }

    fn capital(player: Player, x: u8, y: u8) -> Unit {
        Unit::new(UnitKind::Capital, player, Pos::new(x, y))
    }

    fn balanced(player: Player) -> Vec<Unit> {
        vec![
            Unit::new(UnitKind::Farm, player, Pos::new(0, 3)),
            Unit::new(UnitKind::Farm, player, Pos::new(1, 3)),
            Unit::new(UnitKind::Farm, player, Pos::new(2, 3)),
            Unit::new(UnitKind::Farm, player, Pos::new(3, 3)),
            Unit::new(UnitKind::Industry, player, Pos::new(0, 5)),
            Unit::new(UnitKind::Industry, player, Pos::new(2, 5)),
        ]
    }

    #[test]
    fn test_choose_moves_prefers_capture() {
        let mut units = balanced(Player::White);
        units.push(capital(Player::White, 1, 1));
        units.push(capital(Player::Black, 10, 10));
        units.push(Unit::new(UnitKind::Army, Player::White, Pos::new(6, 6)));
        units.push(Unit::new(UnitKind::Army, Player::Black, Pos::new(7, 7)));
        // Black balance so resolution math stays out of the way.
        let board = board(units);

        let agent = DecisionAgent::new(Difficulty::Normal);
        let moves =
            agent.choose_moves(&board, Player::White, 3, &mut GameRng::new(0));

        assert_eq!(moves.first(), Some(&(Pos::new(6, 6), Pos::new(7, 7))));
    }

    #[test]
    fn test_choose_moves_stops_on_capital_capture() {
        let mut units = balanced(Player::White);
        units.push(capital(Player::White, 1, 1));
        units.push(capital(Player::Black, 7, 7));
        units.push(Unit::new(UnitKind::Army, Player::White, Pos::new(6, 6)));
        let board = board(units);

        let agent = DecisionAgent::new(Difficulty::Hard);
        let moves = agent.choose_moves(&board, Player::White, 3, &mut GameRng::new(0));

        // One move: straight onto the capital, then the search ends.
        assert_eq!(moves, vec![(Pos::new(6, 6), Pos::new(7, 7))]);
    }

    #[test]
    fn test_choose_moves_in_danger_yields_nothing() {
        let units = vec![
            capital(Player::White, 1, 1),
            capital(Player::Black, 10, 10),
            Unit::new(UnitKind::Army, Player::White, Pos::new(5, 5)),
        ];
        let board = board(units);
        assert!(board.is_danger(Player::White));

        let agent = DecisionAgent::new(Difficulty::Normal);
        assert!(agent
            .choose_moves(&board, Player::White, 3, &mut GameRng::new(0))
            .is_empty());
    }

    #[test]
    fn test_choose_moves_working_copy_does_not_leak() {
        let mut units = balanced(Player::White);
        units.push(capital(Player::White, 1, 1));
        units.push(capital(Player::Black, 10, 10));
        units.push(Unit::new(UnitKind::Army, Player::White, Pos::new(6, 6)));
        let board = board(units);
        let before = board.clone();

        let agent = DecisionAgent::new(Difficulty::Normal);
        let _ = agent.choose_moves(&board, Player::White, 3, &mut GameRng::new(0));

        assert_eq!(board, before);
    }

    #[test]
    fn test_easy_moves_are_seed_deterministic() {
        let mut units = balanced(Player::White);
        units.push(capital(Player::White, 1, 1));
        units.push(capital(Player::Black, 10, 10));
        units.push(Unit::new(UnitKind::Army, Player::White, Pos::new(6, 6)));
        let board = board(units);

        let agent = DecisionAgent::new(Difficulty::Easy);
        let a = agent.choose_moves(&board, Player::White, 3, &mut GameRng::new(5));
        let b = agent.choose_moves(&board, Player::White, 3, &mut GameRng::new(5));
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_choose_builds_strategic_order() {
        let mut units = balanced(Player::White);
        units.push(capital(Player::White, 1, 1));
        units.push(capital(Player::Black, 10, 10));
        let board = board(units);
        assert!(!board.is_danger(Player::White));

        let agent = DecisionAgent::new(Difficulty::Normal);
        let builds = agent.choose_builds(&board, Player::White);

        // 4 farms, 2 industry, 0 armies: a third industry is barred by the
        // ratio gate, an army is allowed. Farm first, army after.
        let kinds: Vec<UnitKind> = builds.iter().map(|&(_, k)| k).collect();
        assert_eq!(kinds, vec![UnitKind::Farm, UnitKind::Army]);
        for &(pos, kind) in &builds {
            assert!(board.can_build(pos, Player::White, kind));
        }
    }

    #[test]
    fn test_choose_builds_emergency_farms() {
        let units = vec![
            capital(Player::White, 1, 1),
            capital(Player::Black, 10, 10),
            Unit::new(UnitKind::Industry, Player::White, Pos::new(0, 1)),
        ];
        let board = board(units);
        assert!(board.is_danger(Player::White));

        let agent = DecisionAgent::new(Difficulty::Normal);
        let builds = agent.choose_builds(&board, Player::White);

        assert!(!builds.is_empty());
        assert!(builds.iter().all(|&(_, kind)| kind == UnitKind::Farm));
        assert!(builds.len() <= 2);
    }

    #[test]
    fn test_choose_removals_emergency_industry() {
        let units = vec![
            capital(Player::White, 1, 1),
            capital(Player::Black, 10, 10),
            Unit::new(UnitKind::Industry, Player::White, Pos::new(0, 1)),
        ];
        let board = board(units);

        let agent = DecisionAgent::new(Difficulty::Normal);
        let removals = agent.choose_removals(&board, Player::White);

        assert_eq!(removals, vec![Pos::new(0, 1)]);
    }

    #[test]
    fn test_choose_removals_sheds_lowest_value() {
        let mut units = balanced(Player::White);
        units.push(capital(Player::White, 1, 1));
        units.push(capital(Player::Black, 10, 10));
        units.push(Unit::new(UnitKind::Army, Player::White, Pos::new(5, 5)));
        units.push(Unit::new(UnitKind::Army, Player::White, Pos::new(4, 5)));
        let board = board(units);
        assert!(!board.is_danger(Player::White));

        let agent = DecisionAgent::new(Difficulty::Normal);
        let removals = agent.choose_removals(&board, Player::White);

        // No emergency: the two cheapest units are farms.
        assert_eq!(removals.len(), 2);
        for pos in removals {
            assert_eq!(board.unit_at(pos).unwrap().kind, UnitKind::Farm);
        }
    }

    #[test]
    fn test_removals_never_touch_capital() {
        let units = vec![capital(Player::White, 1, 1), capital(Player::Black, 10, 10)];
        let board = board(units);

        let agent = DecisionAgent::new(Difficulty::Normal);
        assert!(agent.choose_removals(&board, Player::White).is_empty());
    }
}
