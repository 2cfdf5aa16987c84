//! Derived area sets, recomputed from scratch after every mutation.
//!
//! Six kinds of sets drive legality and conflict resolution:
//!
//! - `built`: every occupied cell (shared between players)
//! - `forbidden`: every mountain cell (shared, player-independent)
//! - `national_scope`: 8-neighborhood union of all of a player's units
//! - `influence`: 8-neighborhood union of a player's Armies only
//! - `pollution`: 4-neighborhood union of a player's Industries, minus built
//! - `farmland` / `development` / `preparation`: the build-eligible subsets
//!   of national scope for Farm / Industry / Army respectively
//!
//! `recompute` is a pure function of grid + units. It never patches sets
//! incrementally, so its output is independent of unit ordering and of any
//! previous cached value.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerPair, Pos};
use crate::map::{Grid, Terrain};

use super::unit::{Unit, UnitKind};

/// The full set of derived areas for both players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedAreas {
    /// All occupied cells.
    pub built: FxHashSet<Pos>,
    /// All mountain cells.
    pub forbidden: FxHashSet<Pos>,
    /// 8-neighborhood union of each player's units.
    pub national_scope: PlayerPair<FxHashSet<Pos>>,
    /// 8-neighborhood union of each player's Armies.
    pub influence: PlayerPair<FxHashSet<Pos>>,
    /// 4-neighborhood union of each player's Industries, minus built cells.
    pub pollution: PlayerPair<FxHashSet<Pos>>,
    /// Where each player may build a Farm.
    pub farmland: PlayerPair<FxHashSet<Pos>>,
    /// Where each player may build an Industry.
    pub development: PlayerPair<FxHashSet<Pos>>,
    /// Where each player may build an Army.
    pub preparation: PlayerPair<FxHashSet<Pos>>,
}

/// Recompute every derived set for both players.
///
/// Safe on an empty or partially-built unit set: with only a Capital placed,
/// national scope (and therefore the build areas) is already nonempty.
#[must_use]
pub fn recompute(grid: &Grid, units: &[Unit]) -> DerivedAreas {
    let size = grid.size();

    let built: FxHashSet<Pos> = units.iter().map(|u| u.pos).collect();

    let forbidden: FxHashSet<Pos> = grid
        .positions()
        .filter(|&pos| grid.terrain(pos) == Terrain::Mountain)
        .collect();

    let national_scope = PlayerPair::new(|player| {
        neighborhood_union(units.iter().filter(|u| u.owner == player), size)
    });

    let influence = PlayerPair::new(|player| {
        neighborhood_union(
            units
                .iter()
                .filter(|u| u.owner == player && u.kind == UnitKind::Army),
            size,
        )
    });

    let pollution = PlayerPair::new(|player| {
        let mut set = FxHashSet::default();
        for unit in units
            .iter()
            .filter(|u| u.owner == player && u.kind == UnitKind::Industry)
        {
            for n in unit.pos.neighbors4(size) {
                if !built.contains(&n) {
                    set.insert(n);
                }
            }
        }
        set
    });

    let farmland = PlayerPair::new(|player| {
        let enemy = player.opponent();
        national_scope[player]
            .iter()
            .copied()
            .filter(|pos| {
                grid.terrain(*pos) == Terrain::Land
                    && !built.contains(pos)
                    && !pollution[player].contains(pos)
                    && !influence[enemy].contains(pos)
            })
            .collect()
    });

    // Development has no Land requirement: Industry may sit on Water.
    let development = PlayerPair::new(|player| {
        let enemy = player.opponent();
        national_scope[player]
            .iter()
            .copied()
            .filter(|pos| {
                !forbidden.contains(pos) && !built.contains(pos) && !influence[enemy].contains(pos)
            })
            .collect()
    });

    let preparation = PlayerPair::new(|player| {
        national_scope[player]
            .iter()
            .copied()
            .filter(|pos| grid.terrain(*pos) == Terrain::Land && !built.contains(pos))
            .collect()
    });

    DerivedAreas {
        built,
        forbidden,
        national_scope,
        influence,
        pollution,
        farmland,
        development,
        preparation,
    }
}

fn neighborhood_union<'a>(units: impl Iterator<Item = &'a Unit>, size: u8) -> FxHashSet<Pos> {
    let mut set = FxHashSet::default();
    for unit in units {
        for n in unit.pos.neighbors8(size) {
            set.insert(n);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;

    fn land_grid(size: u8) -> Grid {
        Grid::filled(size, Terrain::Land)
    }

    #[test]
    fn test_empty_units() {
        let areas = recompute(&land_grid(6), &[]);
        assert!(areas.built.is_empty());
        assert!(areas.national_scope[Player::White].is_empty());
        assert!(areas.farmland[Player::Black].is_empty());
    }

    #[test]
    fn test_capital_alone_opens_build_areas() {
        let units = [Unit::new(UnitKind::Capital, Player::White, Pos::new(3, 3))];
        let areas = recompute(&land_grid(8), &units);

        // 8 neighbors, all land, none built, no enemy influence.
        assert_eq!(areas.national_scope[Player::White].len(), 8);
        assert_eq!(areas.farmland[Player::White].len(), 8);
        assert_eq!(areas.development[Player::White].len(), 8);
        assert_eq!(areas.preparation[Player::White].len(), 8);
        assert!(areas.farmland[Player::Black].is_empty());
    }

    #[test]
    fn test_influence_only_from_armies() {
        let units = [
            Unit::new(UnitKind::Capital, Player::White, Pos::new(1, 1)),
            Unit::new(UnitKind::Army, Player::White, Pos::new(5, 5)),
        ];
        let areas = recompute(&land_grid(8), &units);

        assert!(areas.influence[Player::White].contains(&Pos::new(4, 4)));
        assert!(!areas.influence[Player::White].contains(&Pos::new(0, 0)));
        assert_eq!(areas.influence[Player::White].len(), 8);
    }

    #[test]
    fn test_pollution_excludes_built() {
        let units = [
            Unit::new(UnitKind::Industry, Player::White, Pos::new(3, 3)),
            Unit::new(UnitKind::Farm, Player::White, Pos::new(3, 2)),
        ];
        let areas = recompute(&land_grid(8), &units);

        let pollution = &areas.pollution[Player::White];
        assert!(pollution.contains(&Pos::new(2, 3)));
        assert!(pollution.contains(&Pos::new(4, 3)));
        assert!(pollution.contains(&Pos::new(3, 4)));
        // The farm occupies (3, 2), so it is built, not polluted.
        assert!(!pollution.contains(&Pos::new(3, 2)));
        assert_eq!(pollution.len(), 3);
    }

    #[test]
    fn test_pollution_is_per_player() {
        let units = [
            Unit::new(UnitKind::Capital, Player::Black, Pos::new(2, 3)),
            Unit::new(UnitKind::Industry, Player::White, Pos::new(3, 3)),
        ];
        let areas = recompute(&land_grid(8), &units);

        // Black's farmland around its capital is reduced only by *its own*
        // pollution (none) and White's influence (none) and built cells.
        assert!(areas.pollution[Player::Black].is_empty());
        assert!(areas.farmland[Player::Black].contains(&Pos::new(2, 2)));
    }

    #[test]
    fn test_enemy_influence_blocks_farmland_and_development() {
        let units = [
            Unit::new(UnitKind::Capital, Player::White, Pos::new(2, 2)),
            Unit::new(UnitKind::Army, Player::Black, Pos::new(4, 2)),
        ];
        let areas = recompute(&land_grid(8), &units);

        // (3, 2) neighbors both the white capital and the black army.
        assert!(areas.national_scope[Player::White].contains(&Pos::new(3, 2)));
        assert!(areas.influence[Player::Black].contains(&Pos::new(3, 2)));
        assert!(!areas.farmland[Player::White].contains(&Pos::new(3, 2)));
        assert!(!areas.development[Player::White].contains(&Pos::new(3, 2)));
        // Preparation ignores enemy influence.
        assert!(areas.preparation[Player::White].contains(&Pos::new(3, 2)));
    }

    #[test]
    fn test_development_allows_water_but_not_mountain() {
        let mut grid = land_grid(8);
        grid.set(Pos::new(3, 2), Terrain::Water);
        grid.set(Pos::new(1, 2), Terrain::Mountain);
        let units = [Unit::new(UnitKind::Capital, Player::White, Pos::new(2, 2))];
        let areas = recompute(&grid, &units);

        assert!(areas.development[Player::White].contains(&Pos::new(3, 2)));
        assert!(!areas.development[Player::White].contains(&Pos::new(1, 2)));
        // Farms and armies cannot use water.
        assert!(!areas.farmland[Player::White].contains(&Pos::new(3, 2)));
        assert!(!areas.preparation[Player::White].contains(&Pos::new(3, 2)));
    }

    #[test]
    fn test_order_independent() {
        let mut units = vec![
            Unit::new(UnitKind::Capital, Player::White, Pos::new(1, 1)),
            Unit::new(UnitKind::Army, Player::White, Pos::new(4, 4)),
            Unit::new(UnitKind::Industry, Player::Black, Pos::new(6, 6)),
            Unit::new(UnitKind::Farm, Player::Black, Pos::new(6, 4)),
        ];
        let forward = recompute(&land_grid(9), &units);
        units.reverse();
        let reversed = recompute(&land_grid(9), &units);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_idempotent() {
        let units = [
            Unit::new(UnitKind::Capital, Player::White, Pos::new(1, 1)),
            Unit::new(UnitKind::Army, Player::Black, Pos::new(4, 4)),
        ];
        let grid = land_grid(9);
        assert_eq!(recompute(&grid, &units), recompute(&grid, &units));
    }
}
