//! Grid coordinates and neighborhood iteration.
//!
//! Everything territorial in the rules is defined over two neighborhoods:
//! the 8-cell ring (movement, national scope, influence) and the 4-cell
//! orthogonal cross (pollution, the Industry demolition effect).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A cell coordinate on the square grid.
///
/// `x` grows rightward, `y` grows downward, both 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: u8,
    pub y: u8,
}

/// The 8 king-move offsets, row-major scan order.
const OFFSETS_8: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The 4 orthogonal offsets.
const OFFSETS_4: [(i16, i16); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Pos {
    /// Create a position.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// In-bounds cells of the 8-neighborhood on a `size`-wide grid.
    #[must_use]
    pub fn neighbors8(self, size: u8) -> SmallVec<[Pos; 8]> {
        self.offset_neighbors(&OFFSETS_8, size)
    }

    /// In-bounds cells of the orthogonal 4-neighborhood on a `size`-wide grid.
    #[must_use]
    pub fn neighbors4(self, size: u8) -> SmallVec<[Pos; 8]> {
        self.offset_neighbors(&OFFSETS_4, size)
    }

    fn offset_neighbors(self, offsets: &[(i16, i16)], size: u8) -> SmallVec<[Pos; 8]> {
        let mut out = SmallVec::new();
        for &(dx, dy) in offsets {
            let nx = i16::from(self.x) + dx;
            let ny = i16::from(self.y) + dy;
            if (0..i16::from(size)).contains(&nx) && (0..i16::from(size)).contains(&ny) {
                out.push(Pos::new(nx as u8, ny as u8));
            }
        }
        out
    }

    /// Manhattan distance.
    #[must_use]
    pub fn manhattan(self, other: Pos) -> u32 {
        let dx = i32::from(self.x) - i32::from(other.x);
        let dy = i32::from(self.y) - i32::from(other.y);
        (dx.abs() + dy.abs()) as u32
    }

    /// Chebyshev (king-move) distance.
    #[must_use]
    pub fn chebyshev(self, other: Pos) -> u32 {
        let dx = (i32::from(self.x) - i32::from(other.x)).unsigned_abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).unsigned_abs();
        dx.max(dy)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors8_interior() {
        let n = Pos::new(5, 5).neighbors8(14);
        assert_eq!(n.len(), 8);
        assert!(n.contains(&Pos::new(4, 4)));
        assert!(n.contains(&Pos::new(6, 6)));
        assert!(!n.contains(&Pos::new(5, 5)));
    }

    #[test]
    fn test_neighbors8_corner() {
        let n = Pos::new(0, 0).neighbors8(14);
        assert_eq!(n.len(), 3);
        assert!(n.contains(&Pos::new(1, 0)));
        assert!(n.contains(&Pos::new(0, 1)));
        assert!(n.contains(&Pos::new(1, 1)));
    }

    #[test]
    fn test_neighbors4_edge() {
        let n = Pos::new(0, 5).neighbors4(14);
        assert_eq!(n.len(), 3);
        assert!(n.contains(&Pos::new(1, 5)));
        assert!(n.contains(&Pos::new(0, 4)));
        assert!(n.contains(&Pos::new(0, 6)));
        assert!(!n.contains(&Pos::new(1, 4)));
    }

    #[test]
    fn test_distances() {
        let a = Pos::new(1, 2);
        let b = Pos::new(4, 0);
        assert_eq!(a.manhattan(b), 5);
        assert_eq!(b.manhattan(a), 5);
        assert_eq!(a.chebyshev(b), 3);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Pos::new(3, 11)), "(3, 11)");
    }
}
