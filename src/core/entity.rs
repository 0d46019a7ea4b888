//! Stone identification.
//!
//! Every stone on the board carries a unique `StoneNo` assigned when the
//! board is seeded, plus a display color that has no effect on play.
//!
//! ## Numbering
//!
//! Numbers are allocated sequentially starting at 1, pit by pit:
//! gamer 1's pits first, then gamer 2's. A fresh default board therefore
//! holds stones `1..=48`.
//!
//! ```
//! use mangala::core::{Stone, StoneColor, StoneNo};
//!
//! let stone = Stone::new(StoneNo(7), StoneColor::Teal);
//! assert_eq!(stone.no, StoneNo(7));
//! assert_eq!(stone.no.next(), StoneNo(8));
//! ```

use serde::{Deserialize, Serialize};

/// Unique sequence number of a stone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoneNo(pub u32);

impl StoneNo {
    /// First number handed out on a fresh board.
    pub const FIRST: StoneNo = StoneNo(1);

    /// The number following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Get the raw number.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for StoneNo {
    fn from(no: u32) -> Self {
        Self(no)
    }
}

impl std::fmt::Display for StoneNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stone({})", self.0)
    }
}

/// Display color of a stone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoneColor {
    Blue,
    Indigo,
    Rose,
    Amber,
    Green,
    Teal,
    Cyan,
}

impl StoneColor {
    /// Palette stones are drawn from.
    pub const PALETTE: [StoneColor; 7] = [
        StoneColor::Blue,
        StoneColor::Indigo,
        StoneColor::Rose,
        StoneColor::Amber,
        StoneColor::Green,
        StoneColor::Teal,
        StoneColor::Cyan,
    ];
}

/// An indivisible playing piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stone {
    pub no: StoneNo,
    pub color: StoneColor,
}

impl Stone {
    #[must_use]
    pub const fn new(no: StoneNo, color: StoneColor) -> Self {
        Self { no, color }
    }
}
