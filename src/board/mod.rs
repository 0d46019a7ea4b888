//! Board model: stones, pits, treasuries and the ring that joins them.
//!
//! ## Key Types
//!
//! - `Pit`, `Treasury`: ordered stone containers with no game logic
//! - `Side`: owner or guest, relative to the room's `gameOwner`
//! - `Location`: a pit or treasury on one side
//! - `Ring`: translation between the 14 ring slots and locations

pub mod container;
pub mod ring;

pub use container::{Pit, Treasury};
pub use ring::{Location, Ring, Side, Spot, RING_LEN};
