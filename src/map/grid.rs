//! Terrain and the immutable game grid.

use serde::{Deserialize, Serialize};

use crate::core::Pos;

/// Cell terrain, fixed for the lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Land,
    Water,
    Mountain,
}

impl Terrain {
    /// Wire code used for initial-state sync (Land = 0, Water = 1, Mountain = 2).
    #[must_use]
    pub const fn wire_code(self) -> u8 {
        match self {
            Terrain::Land => 0,
            Terrain::Water => 1,
            Terrain::Mountain => 2,
        }
    }

    /// Decode a wire code back into terrain.
    #[must_use]
    pub const fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Terrain::Land),
            1 => Some(Terrain::Water),
            2 => Some(Terrain::Mountain),
            _ => None,
        }
    }
}

/// Square grid of terrain cells. Immutable after generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: u8,
    cells: Vec<Terrain>,
}

impl Grid {
    /// Build a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len() != size * size` or `size == 0`.
    #[must_use]
    pub fn from_cells(size: u8, cells: Vec<Terrain>) -> Option<Self> {
        if size == 0 || cells.len() != usize::from(size) * usize::from(size) {
            return None;
        }
        Some(Self { size, cells })
    }

    /// Build an all-`fill` grid (test scaffolding and fallback paths).
    #[must_use]
    pub fn filled(size: u8, fill: Terrain) -> Self {
        assert!(size > 0, "Grid size must be nonzero");
        Self {
            size,
            cells: vec![fill; usize::from(size) * usize::from(size)],
        }
    }

    /// Grid edge length.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether a position lies on the grid.
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    /// Terrain at a position. Panics if out of bounds.
    #[must_use]
    pub fn terrain(&self, pos: Pos) -> Terrain {
        debug_assert!(self.contains(pos), "position {pos} outside {}x{} grid", self.size, self.size);
        self.cells[usize::from(pos.y) * usize::from(self.size) + usize::from(pos.x)]
    }

    /// All positions in row-major scan order (y outer, x inner).
    ///
    /// This order is load-bearing: capital candidate scans and the AI's
    /// build-position scans tie-break by it.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let size = self.size;
        (0..size).flat_map(move |y| (0..size).map(move |x| Pos::new(x, y)))
    }

    /// Count cells of the given terrain.
    #[must_use]
    pub fn count(&self, terrain: Terrain) -> usize {
        self.cells.iter().filter(|&&t| t == terrain).count()
    }

    pub(crate) fn set(&mut self, pos: Pos, terrain: Terrain) {
        debug_assert!(self.contains(pos));
        self.cells[usize::from(pos.y) * usize::from(self.size) + usize::from(pos.x)] = terrain;
    }
}
