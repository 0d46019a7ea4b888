//! Game configuration types.
//!
//! A room is played under a `MangalaConfig`:
//! - `stones_per_pit`: how many stones each pit is seeded with
//! - `turn_timeout`: how long a gamer may think before losing the turn
//! - `sowing`: where the first stone of a sow lands
//! - `optimistic_writes`: whether published snapshots carry an expected version
//! - `seed`: seed for stone colors
//!
//! The number of pits per row is fixed by the board.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Pits on each gamer's row.
pub const PITS_PER_ROW: usize = 6;

/// Default stones per pit for a fresh board.
pub const DEFAULT_STONES_PER_PIT: usize = 4;

/// Default length of a turn before it is forfeited to the opponent.
pub const DEFAULT_TURN_TIMEOUT_SECS: i64 = 60;

/// Where the first stone of a sow is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SowingRule {
    /// Every stone goes to the next slot; the source pit stays empty.
    #[default]
    NextSlot,
    /// The first stone goes back into the source pit unless it was the only
    /// stone, in which case it moves on like any other.
    SourceFirst,
}

/// Complete game configuration.
#[derive(Clone, Debug)]
pub struct MangalaConfig {
    /// Stones per pit on a freshly seeded board.
    pub stones_per_pit: usize,

    /// Turn length before `moveOrder` is flipped.
    pub turn_timeout: Duration,

    /// First-stone placement rule.
    pub sowing: SowingRule,

    /// Publish with an expected version instead of blind writes.
    pub optimistic_writes: bool,

    /// Seed for the stone color generator.
    pub seed: u64,
}

impl Default for MangalaConfig {
    fn default() -> Self {
        Self {
            stones_per_pit: DEFAULT_STONES_PER_PIT,
            turn_timeout: Duration::seconds(DEFAULT_TURN_TIMEOUT_SECS),
            sowing: SowingRule::default(),
            optimistic_writes: true,
            seed: 0,
        }
    }
}

impl MangalaConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set stones per pit.
    #[must_use]
    pub fn with_stones_per_pit(mut self, stones: usize) -> Self {
        assert!(stones > 0, "Pits must start with at least 1 stone");
        self.stones_per_pit = stones;
        self
    }

    /// Set the turn timeout.
    #[must_use]
    pub fn with_turn_timeout(mut self, timeout: Duration) -> Self {
        assert!(timeout > Duration::zero(), "Turn timeout must be positive");
        self.turn_timeout = timeout;
        self
    }

    /// Set the sowing rule.
    #[must_use]
    pub fn with_sowing(mut self, rule: SowingRule) -> Self {
        self.sowing = rule;
        self
    }

    /// Toggle optimistic writes.
    #[must_use]
    pub fn with_optimistic_writes(mut self, enabled: bool) -> Self {
        self.optimistic_writes = enabled;
        self
    }

    /// Set the color seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Stones on one gamer's row at the start of a game.
    #[must_use]
    pub fn stones_per_row(&self) -> usize {
        PITS_PER_ROW * self.stones_per_pit
    }

    /// Stones on the whole board; conserved for the life of a game.
    #[must_use]
    pub fn total_stones(&self) -> usize {
        2 * self.stones_per_row()
    }
}
