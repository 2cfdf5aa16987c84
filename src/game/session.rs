//! A running game: board plus turn state machine.
//!
//! `Match` is the gate every action passes through, whether it came from a
//! local interface, the decision agent, or a remote peer. It rejects actions
//! from the non-active side and actions that do not fit the current phase
//! before they reach the board, and it gates every mutation behind the
//! matching legality predicate, so an illegal action is always a clean
//! error and never a partial mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::DecisionAgent;
use crate::board::{Board, UnitKind};
use crate::core::{GameRng, Player, Pos};
use crate::map::MapLayout;
use crate::protocol::{GameAction, TurnUpdate};

use super::turn::{BuildTally, Phase};

/// Why an action was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,
    /// Action issued by the non-active player.
    #[error("it is not {0}'s turn")]
    OutOfTurn(Player),
    /// Action kind does not belong to the current phase.
    #[error("action not valid during the {0} phase")]
    WrongPhase(Phase),
    /// A legality predicate said no; the board is unchanged.
    #[error("illegal action")]
    Illegal,
}

/// A game in progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    board: Board,
    current_player: Player,
    phase: Phase,
    moves_used: u32,
    move_limit: u32,
    builds: BuildTally,
}

impl Match {
    /// Start a game on a generated map. White moves first.
    #[must_use]
    pub fn new(layout: MapLayout) -> Self {
        let mut game = Self {
            board: Board::new(layout),
            current_player: Player::White,
            phase: Phase::Move,
            moves_used: 0,
            move_limit: 0,
            builds: BuildTally::default(),
        };
        game.begin_move_phase();
        game
    }

    /// The board, read-only. Mutations go through [`Match::apply`].
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// The active phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves spent so far this Move phase.
    #[must_use]
    pub fn moves_used(&self) -> u32 {
        self.moves_used
    }

    /// The Move-phase budget captured at the start of this turn.
    #[must_use]
    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    /// The winner, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// The current turn/phase broadcast.
    #[must_use]
    pub fn turn_update(&self) -> TurnUpdate {
        TurnUpdate {
            current_player: self.current_player.wire_code(),
            game_step: self.phase.step(),
        }
    }

    /// Apply one action issued by `player`.
    ///
    /// Turn and phase gating happen here; board-level legality is checked by
    /// the matching predicate before any mutation. On error the game state
    /// is exactly as it was.
    pub fn apply(&mut self, player: Player, action: &GameAction) -> Result<(), ActionError> {
        if self.board.winner().is_some() {
            return Err(ActionError::GameOver);
        }
        if player != self.current_player {
            return Err(ActionError::OutOfTurn(player));
        }

        match *action {
            GameAction::Move { from, to } => {
                if self.phase != Phase::Move {
                    return Err(ActionError::WrongPhase(self.phase));
                }
                let from = Pos::new(from[0], from[1]);
                let to = Pos::new(to[0], to[1]);
                if !self
                    .board
                    .can_move_army(from, to, player, self.moves_used, self.move_limit)
                {
                    return Err(ActionError::Illegal);
                }
                self.board.move_unit(from, to);
                self.moves_used += 1;
                if let Some(winner) = self.board.winner() {
                    tracing::info!(%winner, "capital captured");
                }
                Ok(())
            }
            GameAction::Build { x, y, build_type } => {
                if self.phase != Phase::Build {
                    return Err(ActionError::WrongPhase(self.phase));
                }
                let kind = UnitKind::from_build_code(build_type).ok_or(ActionError::Illegal)?;
                let pos = Pos::new(x, y);
                if !self.builds.allows(kind) || !self.board.can_build(pos, player, kind) {
                    return Err(ActionError::Illegal);
                }
                self.board.build_unit(pos, player, kind);
                self.builds.record(kind);
                Ok(())
            }
            GameAction::Remove { x, y } => {
                if self.phase != Phase::Remove {
                    return Err(ActionError::WrongPhase(self.phase));
                }
                let pos = Pos::new(x, y);
                if !self.board.can_remove(pos, player) {
                    return Err(ActionError::Illegal);
                }
                self.board.remove_unit(pos);
                Ok(())
            }
            GameAction::SkipPhase { from_step, to_step } => {
                let from = Phase::from_step(from_step).ok_or(ActionError::Illegal)?;
                let to = Phase::from_step(to_step).ok_or(ActionError::Illegal)?;
                if from != self.phase {
                    return Err(ActionError::WrongPhase(self.phase));
                }
                if from.next() != Some(to) {
                    return Err(ActionError::Illegal);
                }
                self.enter_phase(to);
                Ok(())
            }
            GameAction::EndTurn {} => {
                self.end_turn();
                Ok(())
            }
        }
    }

    /// Concede: the opponent wins immediately. No-op once the game is over.
    pub fn resign(&mut self, player: Player) {
        if self.board.winner().is_none() {
            let winner = player.opponent();
            tracing::info!(loser = %player, %winner, "resignation");
            self.board.set_winner(winner);
        }
    }

    /// Run the active player's whole turn with the decision agent.
    ///
    /// Each chosen action goes through [`Match::apply`]; choices that turn
    /// out illegal (the board shifts under the agent as influence resolves)
    /// are dropped, mirroring how a human's illegal click is ignored. Ends
    /// the turn unless a capital fell first.
    pub fn play_agent_turn(
        &mut self,
        agent: &DecisionAgent,
        rng: &mut GameRng,
    ) -> Result<(), ActionError> {
        if self.board.winner().is_some() {
            return Err(ActionError::GameOver);
        }
        let player = self.current_player;

        if self.phase == Phase::Move {
            for (from, to) in agent.choose_moves(&self.board, player, self.move_limit, rng) {
                self.apply_agent_action(player, &GameAction::move_army(from, to))?;
                if self.board.winner().is_some() {
                    return Ok(());
                }
            }
            self.enter_phase(Phase::Build);
        }

        if self.phase == Phase::Build {
            for (pos, kind) in agent.choose_builds(&self.board, player) {
                if let Some(action) = GameAction::build(pos, kind) {
                    self.apply_agent_action(player, &action)?;
                }
            }
            self.enter_phase(Phase::Remove);
        }

        for pos in agent.choose_removals(&self.board, player) {
            self.apply_agent_action(player, &GameAction::remove(pos))?;
        }
        self.end_turn();
        Ok(())
    }

    fn apply_agent_action(
        &mut self,
        player: Player,
        action: &GameAction,
    ) -> Result<(), ActionError> {
        match self.apply(player, action) {
            Ok(()) | Err(ActionError::Illegal) => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn enter_phase(&mut self, phase: Phase) {
        tracing::debug!(player = %self.current_player, %phase, "phase change");
        self.phase = phase;
        if phase == Phase::Build {
            self.builds = BuildTally::default();
        }
    }

    fn end_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.phase = Phase::Move;
        self.builds = BuildTally::default();
        self.begin_move_phase();
        tracing::debug!(player = %self.current_player, "turn start");
    }

    fn begin_move_phase(&mut self) {
        self.moves_used = 0;
        self.move_limit = self.board.move_limit(self.current_player);
        self.board.reset_move_count(self.current_player);
    }
}
