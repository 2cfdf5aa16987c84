//! The board: single source of truth for units and derived state.
//!
//! ## Contract
//!
//! Legality checks (`can_move_army`, `can_build`, `can_remove`) are pure
//! boolean queries and never fail. Mutations (`move_unit`, `build_unit`,
//! `remove_unit`) assume the caller already validated legality and apply
//! unconditionally; every mutation recomputes the derived areas and runs one
//! influence-resolution pass before returning, so queries never observe
//! stale derived state.
//!
//! The unit map is an `im::HashMap`, so cloning a whole board is cheap —
//! the decision agent leans on this for its per-call working copies.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerPair, Pos};
use crate::map::{Grid, MapLayout, Terrain};

use super::areas::{self, DerivedAreas};
use super::influence;
use super::unit::{Unit, UnitKind, ARMY_MOVE_CAP};

/// Game board: grid, units, and cached derived state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    units: im::HashMap<Pos, Unit>,
    danger: PlayerPair<bool>,
    areas: DerivedAreas,
    winner: Option<Player>,
}

impl Board {
    /// Start a game on a generated map: the two Capitals and nothing else.
    #[must_use]
    pub fn new(layout: MapLayout) -> Self {
        let units = Player::both()
            .into_iter()
            .map(|p| {
                let pos = layout.capitals[p];
                (pos, Unit::new(UnitKind::Capital, p, pos))
            })
            .collect();
        Self::from_raw(layout.grid, units)
    }

    /// Rebuild a board from an explicit grid and unit list (state sync).
    ///
    /// Unit positions must be unique and in bounds.
    #[must_use]
    pub fn from_parts(grid: Grid, units: Vec<Unit>) -> Self {
        debug_assert!(units.iter().all(|u| grid.contains(u.pos)));
        let map: im::HashMap<Pos, Unit> = units.into_iter().map(|u| (u.pos, u)).collect();
        Self::from_raw(grid, map)
    }

    fn from_raw(grid: Grid, units: im::HashMap<Pos, Unit>) -> Self {
        let mut board = Self {
            grid,
            units,
            danger: PlayerPair::with_value(false),
            areas: DerivedAreas::default(),
            winner: None,
        };
        board.refresh();
        board
    }

    // === Queries ===

    /// The terrain grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The unit at a position, if any.
    #[must_use]
    pub fn unit_at(&self, pos: Pos) -> Option<&Unit> {
        self.units.get(&pos)
    }

    /// All units, in no particular order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// A player's units, optionally filtered by kind.
    pub fn units_of(&self, player: Player, kind: Option<UnitKind>) -> impl Iterator<Item = &Unit> {
        self.units
            .values()
            .filter(move |u| u.owner == player && kind.map_or(true, |k| u.kind == k))
    }

    /// Count of a player's units of a kind.
    #[must_use]
    pub fn count_of(&self, player: Player, kind: UnitKind) -> usize {
        self.units_of(player, Some(kind)).count()
    }

    /// Position of a player's Capital. `None` only after it was captured.
    #[must_use]
    pub fn capital_of(&self, player: Player) -> Option<Pos> {
        self.units_of(player, Some(UnitKind::Capital))
            .map(|u| u.pos)
            .next()
    }

    /// Army moves available this turn: `max(0, industry - army + 1)`.
    #[must_use]
    pub fn move_limit(&self, player: Player) -> u32 {
        let industry = self.count_of(player, UnitKind::Industry) as i64;
        let army = self.count_of(player, UnitKind::Army) as i64;
        (industry - army + 1).max(0) as u32
    }

    /// Whether the player's resource ratios put it in the danger state.
    #[must_use]
    pub fn is_danger(&self, player: Player) -> bool {
        self.danger[player]
    }

    /// The winner, once a Capital has been captured.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// The cached derived area sets.
    #[must_use]
    pub fn areas(&self) -> &DerivedAreas {
        &self.areas
    }

    /// Whether `player` may move an Army from `from` to `to`, given the
    /// moves already spent this phase and the phase budget.
    ///
    /// Captures of an enemy Army or Capital are accepted before the per-army
    /// cap and phase budget are consulted, so a capture is always available
    /// to an army that can reach it.
    #[must_use]
    pub fn can_move_army(
        &self,
        from: Pos,
        to: Pos,
        player: Player,
        moves_used: u32,
        move_limit: u32,
    ) -> bool {
        if self.danger[player] {
            return false;
        }
        let Some(unit) = self.unit_at(from) else {
            return false;
        };
        if unit.kind != UnitKind::Army || unit.owner != player {
            return false;
        }
        if !self.grid.contains(to) || from == to || from.chebyshev(to) > 1 {
            return false;
        }
        if let Some(target) = self.unit_at(to) {
            if target.owner == player {
                return false;
            }
            return matches!(target.kind, UnitKind::Capital | UnitKind::Army);
        }
        if self.grid.terrain(to) == Terrain::Mountain {
            return false;
        }
        if unit.move_count >= ARMY_MOVE_CAP {
            return false;
        }
        moves_used < move_limit
    }

    /// Whether `player` may build a unit of `kind` at `pos`.
    ///
    /// Terrain and zone gating per kind, then ratio gating against the
    /// prospective post-build counts. Capitals are never buildable.
    #[must_use]
    pub fn can_build(&self, pos: Pos, player: Player, kind: UnitKind) -> bool {
        if !self.grid.contains(pos) || self.unit_at(pos).is_some() {
            return false;
        }

        let in_area = match kind {
            UnitKind::Farm => {
                self.grid.terrain(pos) == Terrain::Land && self.areas.farmland[player].contains(&pos)
            }
            UnitKind::Industry => {
                matches!(self.grid.terrain(pos), Terrain::Land | Terrain::Water)
                    && self.areas.development[player].contains(&pos)
            }
            UnitKind::Army => {
                self.grid.terrain(pos) == Terrain::Land
                    && self.areas.preparation[player].contains(&pos)
            }
            UnitKind::Capital => false,
        };
        if !in_area {
            return false;
        }

        let farm = self.count_of(player, UnitKind::Farm);
        let industry = self.count_of(player, UnitKind::Industry);
        let army = self.count_of(player, UnitKind::Army);
        match kind {
            UnitKind::Industry => industry + 1 <= farm / 2,
            UnitKind::Army => army + 1 <= farm / 2 && army + 1 <= industry,
            UnitKind::Farm | UnitKind::Capital => true,
        }
    }

    /// Whether `player` may demolish the unit at `pos`.
    #[must_use]
    pub fn can_remove(&self, pos: Pos, player: Player) -> bool {
        self.unit_at(pos)
            .map_or(false, |u| u.owner == player && u.kind != UnitKind::Capital)
    }

    // === Mutations ===

    /// Move a unit, capturing an enemy Army or Capital at the destination.
    ///
    /// Capturing a Capital records the mover's owner as winner.
    pub fn move_unit(&mut self, from: Pos, to: Pos) {
        let Some(mut unit) = self.units.remove(&from) else {
            debug_assert!(false, "move_unit: no unit at {from}");
            return;
        };
        if let Some(target) = self.units.get(&to) {
            debug_assert!(target.owner != unit.owner);
            if target.kind == UnitKind::Capital {
                self.winner = Some(unit.owner);
            }
            self.units.remove(&to);
        }
        unit.pos = to;
        unit.move_count += 1;
        self.units.insert(to, unit);
        self.refresh();
    }

    /// Place a newly built unit.
    ///
    /// A new Industry immediately demolishes every Farm in its orthogonal
    /// neighborhood, regardless of owner.
    pub fn build_unit(&mut self, pos: Pos, player: Player, kind: UnitKind) {
        debug_assert!(self.unit_at(pos).is_none(), "build_unit: {pos} occupied");
        self.units.insert(pos, Unit::new(kind, player, pos));

        if kind == UnitKind::Industry {
            for n in pos.neighbors4(self.grid.size()) {
                if self.units.get(&n).map_or(false, |u| u.kind == UnitKind::Farm) {
                    self.units.remove(&n);
                }
            }
        }
        self.refresh();
    }

    /// Remove the unit at `pos` unconditionally.
    pub fn remove_unit(&mut self, pos: Pos) {
        self.units.remove(&pos);
        self.refresh();
    }

    /// Record a winner directly (resignation).
    pub(crate) fn set_winner(&mut self, player: Player) {
        self.winner = Some(player);
    }

    /// Zero the move counters of a player's Armies (start of its Move phase).
    pub fn reset_move_count(&mut self, player: Player) {
        let armies: Vec<Pos> = self
            .units_of(player, Some(UnitKind::Army))
            .map(|u| u.pos)
            .collect();
        for pos in armies {
            if let Some(unit) = self.units.get_mut(&pos) {
                unit.move_count = 0;
            }
        }
        self.refresh();
    }

    /// Recompute derived areas, run one influence-resolution pass, and
    /// refresh danger flags from the final unit set.
    fn refresh(&mut self) {
        let unit_list: Vec<Unit> = self.units.values().copied().collect();
        self.areas = areas::recompute(&self.grid, &unit_list);

        if influence::resolve(&mut self.units, &self.areas.influence) {
            let unit_list: Vec<Unit> = self.units.values().copied().collect();
            self.areas = areas::recompute(&self.grid, &unit_list);
        }

        self.danger = PlayerPair::new(|player| self.compute_danger(player));
    }

    fn compute_danger(&self, player: Player) -> bool {
        let farm = self.count_of(player, UnitKind::Farm);
        let industry = self.count_of(player, UnitKind::Industry);
        let army = self.count_of(player, UnitKind::Army);

        industry > farm / 2
            || army > farm / 2
            || army > industry
            || (industry as i64) - (army as i64) + 1 < 0
    }
}
