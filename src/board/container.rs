//! Stone containers: pits and treasuries.
//!
//! Both are ordered sequences of stones backed by `im::Vector`, so cloning a
//! room to compute the next snapshot shares structure with the previous one.
//! Containers perform no validation; the move engine decides what is legal.
//!
//! ```
//! use mangala::board::{Pit, Treasury};
//! use mangala::core::{Stone, StoneColor, StoneNo};
//!
//! let mut pit = Pit::new();
//! pit.push(Stone::new(StoneNo(1), StoneColor::Blue));
//! pit.push(Stone::new(StoneNo(2), StoneColor::Rose));
//!
//! let mut treasury = Treasury::new();
//! treasury.append(pit.take_all());
//!
//! assert!(pit.is_empty());
//! assert_eq!(treasury.len(), 2);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::entity::Stone;

/// Ordered container of stones on a gamer's row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pit {
    stones: Vector<Stone>,
}

impl Pit {
    /// Create an empty pit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pit holding the given stones in order.
    pub fn from_stones(stones: impl IntoIterator<Item = Stone>) -> Self {
        Self {
            stones: stones.into_iter().collect(),
        }
    }

    /// Number of stones in the pit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Stones in drop order (first dropped first).
    pub fn stones(&self) -> impl Iterator<Item = &Stone> {
        self.stones.iter()
    }

    /// Drop a stone on top of the pit.
    pub fn push(&mut self, stone: Stone) {
        self.stones.push_back(stone);
    }

    /// Remove and return every stone, leaving the pit empty.
    pub fn take_all(&mut self) -> Vector<Stone> {
        std::mem::take(&mut self.stones)
    }
}

/// A gamer's scoring store. Stones banked here stay for the rest of the game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Treasury {
    stones: Vector<Stone>,
}

impl Treasury {
    /// Create an empty treasury.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score: number of banked stones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Banked stones in deposit order.
    pub fn stones(&self) -> impl Iterator<Item = &Stone> {
        self.stones.iter()
    }

    /// Bank a single stone.
    pub fn push(&mut self, stone: Stone) {
        self.stones.push_back(stone);
    }

    /// Bank a batch of stones, keeping their order.
    pub fn append(&mut self, stones: Vector<Stone>) {
        self.stones.append(stones);
    }
}
