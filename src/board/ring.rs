//! The board as a single ring of 14 slots.
//!
//! Both rows and both treasuries form one cycle that every sow walks
//! forward. Slots are numbered relative to the room owner:
//!
//! ```text
//!            owner treasury (13)
//!  owner pits:   0   1   2   3   4   5      slots 12 11 10  9  8  7
//!  guest pits:   0   1   2   3   4   5      slots  0  1  2  3  4  5
//!            guest treasury (6)
//! ```
//!
//! Pits sharing an index sit in the same column and face each other. The
//! owner sows toward pit 0 and then into its treasury; the guest sows toward
//! pit 5 and then into its treasury. A mover never drops a stone into the
//! opponent's treasury.
//!
//! ```
//! use mangala::board::{Location, Ring, Side};
//!
//! let from = Ring::slot_of(Location::pit(Side::Guest, 5));
//! let next = Ring::advance(from, Side::Guest);
//! assert_eq!(Ring::locate(next), Location::treasury(Side::Guest));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::config::PITS_PER_ROW;

/// Slots on the ring: two rows plus two treasuries.
pub const RING_LEN: usize = 2 * PITS_PER_ROW + 2;

const GUEST_TREASURY: usize = PITS_PER_ROW;
const OWNER_TREASURY: usize = RING_LEN - 1;

/// Board side relative to the room owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The room's creator (`gameOwner`).
    Owner,
    /// The gamer who joined second.
    Guest,
}

impl Side {
    /// The opposite side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Owner => Side::Guest,
            Side::Guest => Side::Owner,
        }
    }
}

/// Container within one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spot {
    Pit(usize),
    Treasury,
}

/// A container on the board: which side, and which pit or the treasury.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub side: Side,
    pub spot: Spot,
}

impl Location {
    #[must_use]
    pub const fn pit(side: Side, index: usize) -> Self {
        Self {
            side,
            spot: Spot::Pit(index),
        }
    }

    #[must_use]
    pub const fn treasury(side: Side) -> Self {
        Self {
            side,
            spot: Spot::Treasury,
        }
    }

    /// Pit index if this location is a pit.
    #[must_use]
    pub const fn pit_index(self) -> Option<usize> {
        match self.spot {
            Spot::Pit(i) => Some(i),
            Spot::Treasury => None,
        }
    }

    #[must_use]
    pub const fn is_treasury(self) -> bool {
        matches!(self.spot, Spot::Treasury)
    }

    /// The pit facing this one across the board.
    ///
    /// Returns `None` for treasuries.
    #[must_use]
    pub const fn mirrored(self) -> Option<Location> {
        match self.spot {
            Spot::Pit(i) => Some(Location::pit(self.side.opponent(), i)),
            Spot::Treasury => None,
        }
    }
}

/// Index translation between ring slots and board locations.
pub struct Ring;

impl Ring {
    /// Ring slot of a location.
    ///
    /// Panics if a pit index is out of range.
    #[must_use]
    pub fn slot_of(location: Location) -> usize {
        match (location.side, location.spot) {
            (Side::Guest, Spot::Pit(i)) => {
                assert!(i < PITS_PER_ROW, "pit index {} out of range", i);
                i
            }
            (Side::Guest, Spot::Treasury) => GUEST_TREASURY,
            (Side::Owner, Spot::Pit(i)) => {
                assert!(i < PITS_PER_ROW, "pit index {} out of range", i);
                OWNER_TREASURY - 1 - i
            }
            (Side::Owner, Spot::Treasury) => OWNER_TREASURY,
        }
    }

    /// Location of a ring slot.
    #[must_use]
    pub fn locate(slot: usize) -> Location {
        let slot = slot % RING_LEN;
        match slot {
            s if s < GUEST_TREASURY => Location::pit(Side::Guest, s),
            GUEST_TREASURY => Location::treasury(Side::Guest),
            OWNER_TREASURY => Location::treasury(Side::Owner),
            s => Location::pit(Side::Owner, OWNER_TREASURY - 1 - s),
        }
    }

    /// Next slot a stone sown by `mover` lands in after `slot`.
    ///
    /// Skips the opponent's treasury.
    #[must_use]
    pub fn advance(slot: usize, mover: Side) -> usize {
        let skip = Self::slot_of(Location::treasury(mover.opponent()));
        let next = (slot + 1) % RING_LEN;
        if next == skip {
            (next + 1) % RING_LEN
        } else {
            next
        }
    }
}
