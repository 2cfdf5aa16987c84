//! The turn state machine and the action gate.

mod session;
mod turn;

pub use session::{ActionError, Match};
pub use turn::{BuildTally, Phase};
