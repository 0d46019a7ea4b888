//! Core game types: stones, gamers, room state, moves, RNG, configuration.
//!
//! Everything the rules, turn and sync layers share lives here. None of these
//! types know how a move is resolved; that belongs to `rules` and `games`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{Stone, StoneColor, StoneNo};
pub use player::{GamerId, Seat};
pub use rng::GameRng;
pub use config::{
    MangalaConfig, SowingRule, DEFAULT_STONES_PER_PIT, DEFAULT_TURN_TIMEOUT_SECS, PITS_PER_ROW,
};
pub use action::{Capture, CaptureKind, Move, MoveRecord, Sweep};
pub use state::{ExitGame, Gamer, InvariantViolation, Room, RoomPatch, RowCounts};
