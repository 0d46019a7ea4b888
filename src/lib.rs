//! # mangala
//!
//! Game core for two-player online Mangala (Kalaha-style mancala) played
//! over a shared room document.
//!
//! ## Design Principles
//!
//! 1. **Pure Moves**: the engine maps `(room, move, now)` to the next room
//!    and a record of what happened. It never mutates its input and never
//!    errors on illegal input.
//!
//! 2. **One Ring**: both rows and both treasuries form a 14-slot ring, so
//!    sowing is a forward walk with the opponent's treasury skipped.
//!
//! 3. **Patches, Not Documents**: every change is published as a merge-by-id
//!    `RoomPatch`, optionally guarded by the version it was computed from.
//!
//! ## Modules
//!
//! - `board`: pits, treasuries and the ring
//! - `core`: stones, gamers, room state, moves, RNG, configuration
//! - `rules`: `RulesEngine` trait, sowing and capture mechanics
//! - `games`: the Mangala rules engine
//! - `turn`: lifecycle phases, turn clock, join/exit/rematch, standings
//! - `sync`: room store contract, in-memory store, gamer sessions

pub mod board;
pub mod core;
pub mod games;
pub mod rules;
pub mod sync;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Capture, CaptureKind, ExitGame, GameRng, Gamer, GamerId, InvariantViolation, MangalaConfig,
    Move, MoveRecord, Room, RoomPatch, RowCounts, Seat, SowingRule, Stone, StoneColor, StoneNo,
    Sweep,
};

pub use crate::board::{Location, Pit, Ring, Side, Spot, Treasury};

pub use crate::rules::{GameResult, MoveOutcome, RulesEngine, Transition};

pub use crate::games::mangala::{Mangala, MangalaBuilder};

pub use crate::turn::{Standings, TurnClock, TurnError, TurnPhase};

pub use crate::sync::{
    MemoryRoomStore, RoomEvent, RoomId, RoomSession, RoomStore, SessionError, StoreError, Version,
    Versioned,
};
