//! Map generation: terrain scatter and capital placement.
//!
//! The terrain mix is fixed by the rules: on an N-wide grid, N²/2 cells are
//! land, and half of those are raised into mountains. Capitals must start on
//! land with at least two land neighbors so both sides can expand; if a
//! random grid can't supply two such cells the whole grid is rerolled, up to
//! a bounded number of attempts, after which the two opposite corners are
//! used regardless of terrain.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, Player, PlayerPair, Pos};
use crate::map::grid::{Grid, Terrain};

/// Reference grid dimension.
pub const DEFAULT_SIZE: u8 = 14;

/// How many full grid regenerations to attempt before the corner fallback.
const PLACEMENT_ATTEMPTS: usize = 10;

/// Minimum land cells in a capital candidate's 8-neighborhood.
const MIN_CAPITAL_LAND_NEIGHBORS: usize = 2;

/// A generated map: terrain plus the two capital positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayout {
    pub grid: Grid,
    pub capitals: PlayerPair<Pos>,
}

/// Generate a map. Same seed, same layout.
#[must_use]
pub fn generate(size: u8, rng: &mut GameRng) -> MapLayout {
    assert!(size >= 2, "grid must be at least 2x2");

    let mut grid = scatter_terrain(size, rng);
    for _ in 0..PLACEMENT_ATTEMPTS {
        if let Some((white, black)) = find_capital_pair(&grid) {
            return MapLayout {
                grid,
                capitals: PlayerPair::new(|p| match p {
                    Player::White => white,
                    Player::Black => black,
                }),
            };
        }
        grid = scatter_terrain(size, rng);
    }

    // Fallback: opposite corners, whatever the terrain there is.
    tracing::warn!(size, attempts = PLACEMENT_ATTEMPTS, "no capital pair found, using corners");
    let far = size - 1;
    MapLayout {
        grid,
        capitals: PlayerPair::new(|p| match p {
            Player::White => Pos::new(0, 0),
            Player::Black => Pos::new(far, far),
        }),
    }
}

/// All water, then N²/2 random land cells, then half of those to mountain.
fn scatter_terrain(size: u8, rng: &mut GameRng) -> Grid {
    let mut grid = Grid::filled(size, Terrain::Water);

    let mut positions: Vec<Pos> = grid.positions().collect();
    rng.shuffle(&mut positions);

    let land_total = positions.len() / 2;
    let mut land: Vec<Pos> = positions[..land_total].to_vec();
    for &pos in &land {
        grid.set(pos, Terrain::Land);
    }

    rng.shuffle(&mut land);
    for &pos in &land[..land_total / 2] {
        grid.set(pos, Terrain::Mountain);
    }

    grid
}

/// Find the max-Manhattan-distance pair of capital candidates, if at least
/// two exist. Ties break to the first maximal pair in scan order.
fn find_capital_pair(grid: &Grid) -> Option<(Pos, Pos)> {
    let candidates: Vec<Pos> = grid
        .positions()
        .filter(|&pos| grid.terrain(pos) == Terrain::Land && land_neighbors(grid, pos) >= MIN_CAPITAL_LAND_NEIGHBORS)
        .collect();

    if candidates.len() < 2 {
        return None;
    }

    let mut best: Option<(Pos, Pos)> = None;
    let mut best_distance = 0;
    for (i, &a) in candidates.iter().enumerate() {
        for &b in &candidates[i + 1..] {
            let distance = a.manhattan(b);
            if distance > best_distance {
                best_distance = distance;
                best = Some((a, b));
            }
        }
    }
    best
}

fn land_neighbors(grid: &Grid, pos: Pos) -> usize {
    pos.neighbors8(grid.size())
        .iter()
        .filter(|&&n| grid.terrain(n) == Terrain::Land)
        .count()
}
