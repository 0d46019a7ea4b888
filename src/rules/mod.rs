//! Rules engine trait and the board mechanics moves are built from.
//!
//! Games implement `RulesEngine` to define:
//! - Which pits a gamer may sow
//! - How a move turns one room snapshot into the next
//! - When the game is over and who won
//!
//! `sowing` and `capture` are the mechanical steps a move is composed of;
//! they mutate a room in place and never check legality.

pub mod capture;
pub mod engine;
pub mod sowing;

pub use capture::resolve_capture;
pub use engine::{GameResult, MoveOutcome, RulesEngine, Transition};
pub use sowing::{sow, Sown};
