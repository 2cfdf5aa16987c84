//! Units, derived areas, and the board rules engine.

mod areas;
mod engine;
mod influence;
mod unit;

pub use areas::{recompute, DerivedAreas};
pub use engine::Board;
pub use unit::{Unit, UnitKind, ARMY_MOVE_CAP};
