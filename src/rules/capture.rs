//! Capture rules, checked once on the last stone of a sow.
//!
//! - **Even**: the last stone lands on an opponent pit whose count is now
//!   even and non-zero. That pit goes to the mover's treasury.
//! - **Last-stone pair**: the last stone lands on the mover's own pit, which
//!   now holds exactly one stone, and the pit facing it is non-empty. Both
//!   pits go to the mover's treasury.
//!
//! A landing is either on the opponent's row or the mover's own, so at most
//! one rule fires.

use crate::board::{Location, Side};
use crate::core::action::{Capture, CaptureKind};
use crate::core::state::Room;

use super::sowing::{bank, take_pit};

/// Apply whichever capture rule the last stone triggers.
pub fn resolve_capture(room: &mut Room, mover: Side, last: Location) -> Option<Capture> {
    if last.is_treasury() {
        return None;
    }

    if last.side == mover.opponent() {
        let count = room.count_at(last);
        if count == 0 || count % 2 != 0 {
            return None;
        }
        let stones = take_pit(room, last);
        bank(room, mover, stones);
        return Some(Capture {
            kind: CaptureKind::Even,
            at: last,
            stones: count,
        });
    }

    let facing = last.mirrored()?;
    let facing_count = room.count_at(facing);
    if room.count_at(last) != 1 || facing_count == 0 {
        return None;
    }

    let mut stones = take_pit(room, last);
    stones.append(take_pit(room, facing));
    bank(room, mover, stones);

    Some(Capture {
        kind: CaptureKind::LastStonePair,
        at: last,
        stones: 1 + facing_count,
    })
}
