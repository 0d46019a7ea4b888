//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - Which moves are legal
//! - How a move produces the next room snapshot
//! - Win/loss conditions

use chrono::{DateTime, Utc};

use crate::core::action::{Move, MoveRecord};
use crate::core::config::{MangalaConfig, PITS_PER_ROW};
use crate::core::player::GamerId;
use crate::core::state::{Room, RoomPatch};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Larger treasury.
    Winner(GamerId),
    /// Equal treasuries.
    Draw,
    /// A gamer left before the board was cleared; no stone-based winner.
    Forfeit { exited: GamerId },
}

impl GameResult {
    /// Check if a gamer won.
    #[must_use]
    pub fn is_winner(&self, gamer: &GamerId) -> bool {
        matches!(self, GameResult::Winner(g) if g == gamer)
    }

    /// Winner id as written to `winnerGamer`.
    #[must_use]
    pub fn winner(&self) -> Option<&GamerId> {
        match self {
            GameResult::Winner(g) => Some(g),
            GameResult::Draw | GameResult::Forfeit { .. } => None,
        }
    }
}

/// The next snapshot plus an account of how it was reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub room: Room,
    pub record: MoveRecord,
}

impl Transition {
    /// Fields a move rewrites, as a merge-by-id patch.
    #[must_use]
    pub fn patch(&self) -> RoomPatch {
        RoomPatch {
            gamer1: Some(self.room.gamer1.clone()),
            gamer2: Some(self.room.gamer2.clone()),
            move_order: Some(self.room.move_order.clone()),
            move_start_timestamp: self.room.move_start_timestamp,
            is_game_completed: Some(self.room.is_game_completed),
            winner_gamer: Some(self.room.winner_gamer.clone()),
            ..RoomPatch::default()
        }
    }
}

/// What `apply_move` produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was not legal; the room is unchanged.
    NoChange,
    /// The move was resolved.
    Applied(Transition),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }

    /// Borrow the transition, if the move was applied.
    #[must_use]
    pub fn transition(&self) -> Option<&Transition> {
        match self {
            MoveOutcome::Applied(t) => Some(t),
            MoveOutcome::NoChange => None,
        }
    }

    /// Take the transition, if the move was applied.
    #[must_use]
    pub fn into_transition(self) -> Option<Transition> {
        match self {
            MoveOutcome::Applied(t) => Some(t),
            MoveOutcome::NoChange => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `is_legal`: false for anyone but the turn holder
/// - `apply_move`: must be pure; the input room is never mutated
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &MangalaConfig;

    /// Whether `gamer` may sow `pit` on their own row right now.
    fn is_legal(&self, room: &Room, gamer: &GamerId, pit: usize) -> bool;

    /// Resolve a move.
    ///
    /// Illegal moves return `MoveOutcome::NoChange`, never an error.
    fn apply_move(&self, room: &Room, mv: &Move, now: DateTime<Utc>) -> MoveOutcome;

    /// Check if the game is over.
    fn is_terminal(&self, room: &Room) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Enumerate all legal moves for a gamer.
    fn legal_moves(&self, room: &Room, gamer: &GamerId) -> Vec<Move> {
        (0..PITS_PER_ROW)
            .filter(|&pit| self.is_legal(room, gamer, pit))
            .map(|pit| Move::new(gamer.clone(), pit))
            .collect()
    }
}
