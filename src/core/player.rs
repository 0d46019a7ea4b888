//! Gamer identification and seats.
//!
//! ## GamerId
//!
//! Opaque identifier supplied by the identity provider. The engine only
//! compares ids for equality.
//!
//! ## Seat
//!
//! The two records of a room: `Gamer1` is always the room's creator and
//! owner, `Gamer2` is whoever joins second.

use serde::{Deserialize, Serialize};

/// Opaque gamer identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GamerId(String);

impl GamerId {
    /// Create a gamer ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GamerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GamerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GamerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the two gamer records in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Gamer1,
    Gamer2,
}

impl Seat {
    /// Both seats in document order.
    pub const ALL: [Seat; 2] = [Seat::Gamer1, Seat::Gamer2];

    /// The opposite seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Seat::Gamer1 => Seat::Gamer2,
            Seat::Gamer2 => Seat::Gamer1,
        }
    }

    /// 0 for gamer 1, 1 for gamer 2.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::Gamer1 => 0,
            Seat::Gamer2 => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Gamer1 => f.write_str("gamer1"),
            Seat::Gamer2 => f.write_str("gamer2"),
        }
    }
}
