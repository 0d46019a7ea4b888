//! Moves and move records.
//!
//! A `Move` is what a gamer asks for: "sow pit N". A `MoveRecord` is what the
//! engine reports back once the move has been resolved: where the last stone
//! landed, what was captured, whether the row emptied. Records are the
//! per-move delta of a game and can be replayed or audited without the
//! snapshots they were computed from.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::{GamerId, Seat};
use crate::board::Location;

/// A request to sow one of the mover's own pits.
///
/// ```
/// use mangala::core::{GamerId, Move};
///
/// let mv = Move::new(GamerId::new("alice"), 2);
/// assert_eq!(mv.pit, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Gamer asking to move.
    pub gamer: GamerId,
    /// Index of the pit on the gamer's own row.
    pub pit: usize,
}

impl Move {
    #[must_use]
    pub fn new(gamer: GamerId, pit: usize) -> Self {
        Self { gamer, pit }
    }
}

/// Which rule moved stones out of a pit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureKind {
    /// Last stone made an opponent pit even.
    Even,
    /// Last stone landed in an empty own pit facing a non-empty opponent pit.
    LastStonePair,
}

/// Stones moved into the mover's treasury by a capture rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub kind: CaptureKind,
    /// Pit the capture was triggered on.
    pub at: Location,
    /// Stones banked.
    pub stones: usize,
}

/// End-of-game sweep of a row into its own treasury.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sweep {
    pub seat: Seat,
    pub stones: usize,
}

/// Resolved move with everything needed to explain the transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Who moved.
    pub gamer: GamerId,

    /// Seat of the mover.
    pub seat: Seat,

    /// Source pit.
    pub pit: usize,

    /// Stones picked up from the source pit.
    pub sown: usize,

    /// Where the last stone was dropped.
    pub last: Location,

    /// At most one capture fires per move; kept as a list for replay tooling.
    pub captures: SmallVec<[Capture; 2]>,

    /// Row swept at game end, if any.
    pub sweep: Option<Sweep>,

    /// Mover keeps the turn.
    pub extra_turn: bool,

    /// Move ended the game.
    pub completed: bool,
}

impl MoveRecord {
    /// Total stones banked by captures on this move.
    #[must_use]
    pub fn captured(&self) -> usize {
        self.captures.iter().map(|c| c.stones).sum()
    }
}
