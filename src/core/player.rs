//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The game is strictly two-sided. `Player` is a closed enum so every
//! branch on sides is checked exhaustively at compile time.
//!
//! ## PlayerPair
//!
//! Per-player data storage with O(1) access, indexable by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides. White always takes the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Wire code used by the relay protocol (White = 1, Black = 2).
    #[must_use]
    pub const fn wire_code(self) -> u8 {
        match self {
            Player::White => 1,
            Player::Black => 2,
        }
    }

    /// Decode a wire code back into a player.
    #[must_use]
    pub const fn from_wire_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Player::White),
            2 => Some(Player::Black),
            _ => None,
        }
    }

    /// Both players, White first.
    #[must_use]
    pub const fn both() -> [Player; 2] {
        [Player::White, Player::Black]
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use half_frontier::core::{Player, PlayerPair};
///
/// let mut score: PlayerPair<i32> = PlayerPair::with_value(0);
/// score[Player::White] = 3;
///
/// assert_eq!(score[Player::White], 3);
/// assert_eq!(score[Player::Black], 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    white: T,
    black: T,
}

impl<T> PlayerPair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            white: factory(Player::White),
            black: factory(Player::Black),
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            white: value.clone(),
            black: value,
        }
    }

    /// Get a reference to a player's entry.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        match player {
            Player::White => &self.white,
            Player::Black => &self.black,
        }
    }

    /// Get a mutable reference to a player's entry.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        match player {
            Player::White => &mut self.white,
            Player::Black => &mut self.black,
        }
    }

    /// Iterate over (Player, &T) pairs, White first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        [(Player::White, &self.white), (Player::Black, &self.black)].into_iter()
    }
}

impl<T> Index<Player> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerPair<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Player::White.opponent(), Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.opponent().opponent(), Player::White);
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(Player::White.wire_code(), 1);
        assert_eq!(Player::Black.wire_code(), 2);
        assert_eq!(Player::from_wire_code(1), Some(Player::White));
        assert_eq!(Player::from_wire_code(2), Some(Player::Black));
        assert_eq!(Player::from_wire_code(0), None);
        assert_eq!(Player::from_wire_code(3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Player::White), "White");
        assert_eq!(format!("{}", Player::Black), "Black");
    }

    #[test]
    fn test_pair_factory() {
        let pair = PlayerPair::new(|p| p.wire_code());
        assert_eq!(pair[Player::White], 1);
        assert_eq!(pair[Player::Black], 2);
    }

    #[test]
    fn test_pair_mutation() {
        let mut pair: PlayerPair<Vec<i32>> = PlayerPair::with_value(Vec::new());
        pair[Player::Black].push(7);

        assert!(pair[Player::White].is_empty());
        assert_eq!(pair[Player::Black], vec![7]);
    }

    #[test]
    fn test_pair_iter() {
        let pair = PlayerPair::new(|p| p.wire_code());
        let collected: Vec<_> = pair.iter().collect();
        assert_eq!(collected, vec![(Player::White, &1), (Player::Black, &2)]);
    }

    #[test]
    fn test_pair_serialization() {
        let pair: PlayerPair<i32> = PlayerPair::new(|p| p.wire_code() as i32);
        let json = serde_json::to_string(&pair).unwrap();
        let back: PlayerPair<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(pair, back);
    }
}
