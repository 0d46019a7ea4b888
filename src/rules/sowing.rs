//! Sowing: lifting a pit and dropping its stones one by one around the ring.

use im::Vector;

use crate::board::{Location, Ring, Side, Spot};
use crate::core::config::SowingRule;
use crate::core::entity::Stone;
use crate::core::state::Room;

/// Result of a sow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sown {
    /// Stones lifted from the source pit.
    pub stones: usize,
    /// Where the last stone was dropped.
    pub last: Location,
}

/// Lift every stone from `mover`'s pit `pit` and sow them forward.
///
/// The opponent's treasury is skipped. Under `SowingRule::SourceFirst` the
/// first stone of a multi-stone pit goes back into the source pit.
///
/// The caller guarantees the pit exists and is non-empty.
pub fn sow(room: &mut Room, mover: Side, pit: usize, rule: SowingRule) -> Sown {
    let source = Location::pit(mover, pit);
    let lifted = take_pit(room, source);
    let stones = lifted.len();

    let mut slot = Ring::slot_of(source);
    let mut last = source;
    let mut iter = lifted.into_iter();

    if rule == SowingRule::SourceFirst && stones > 1 {
        if let Some(first) = iter.next() {
            deposit(room, source, first);
        }
    }

    for stone in iter {
        slot = Ring::advance(slot, mover);
        last = Ring::locate(slot);
        deposit(room, last, stone);
    }

    Sown { stones, last }
}

/// Drop one stone into the container at `at`.
pub(crate) fn deposit(room: &mut Room, at: Location, stone: Stone) {
    let seat = room.seat_of_side(at.side);
    let gamer = room.gamer_mut(seat);
    match at.spot {
        Spot::Pit(i) => gamer.pits[i].push(stone),
        Spot::Treasury => gamer.treasury.push(stone),
    }
}

/// Empty the pit at `at`. Treasuries are never emptied; they yield nothing.
pub(crate) fn take_pit(room: &mut Room, at: Location) -> Vector<Stone> {
    let seat = room.seat_of_side(at.side);
    match at.spot {
        Spot::Pit(i) => room.gamer_mut(seat).pits[i].take_all(),
        Spot::Treasury => Vector::new(),
    }
}

/// Move a batch of stones into `side`'s treasury.
pub(crate) fn bank(room: &mut Room, side: Side, stones: Vector<Stone>) {
    let seat = room.seat_of_side(side);
    room.gamer_mut(seat).treasury.append(stones);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::{GamerId, Seat};
    use crate::core::state::RowCounts;

    fn room(owner: [usize; 6], guest: [usize; 6]) -> Room {
        Room::from_counts(
            GamerId::new("owner"),
            Some(GamerId::new("guest")),
            RowCounts::new(owner, 0),
            RowCounts::new(guest, 0),
        )
    }

    #[test]
    fn test_guest_sows_along_own_row() {
        let mut room = room([4; 6], [4; 6]);

        let sown = sow(&mut room, Side::Guest, 0, SowingRule::NextSlot);

        assert_eq!(sown.stones, 4);
        assert_eq!(sown.last, Location::pit(Side::Guest, 4));
        assert_eq!(room.gamer2.pit_counts(), [0, 5, 5, 5, 5, 4]);
        assert_eq!(room.gamer1.pit_counts(), [4; 6]);
    }

    #[test]
    fn test_owner_sows_toward_pit_zero() {
        let mut room = room([4; 6], [4; 6]);

        let sown = sow(&mut room, Side::Owner, 5, SowingRule::NextSlot);

        assert_eq!(sown.last, Location::pit(Side::Owner, 1));
        assert_eq!(room.gamer1.pit_counts(), [4, 5, 5, 5, 5, 0]);
    }

    #[test]
    fn test_sow_crosses_into_opponent_row() {
        let mut room = room([0, 3, 0, 0, 0, 0], [0; 6]);

        let sown = sow(&mut room, Side::Owner, 1, SowingRule::NextSlot);

        assert_eq!(sown.last, Location::pit(Side::Guest, 0));
        assert_eq!(room.gamer1.score(), 1);
        assert_eq!(room.gamer1.pit_counts(), [1, 0, 0, 0, 0, 0]);
        assert_eq!(room.gamer2.pit_counts(), [1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_source_first_keeps_one_stone() {
        let mut room = room([4; 6], [4; 6]);

        let sown = sow(&mut room, Side::Guest, 0, SowingRule::SourceFirst);

        assert_eq!(sown.last, Location::pit(Side::Guest, 3));
        assert_eq!(room.gamer2.pit_counts(), [1, 5, 5, 5, 4, 4]);
    }

    #[test]
    fn test_source_first_single_stone_moves_on() {
        let mut room = room([4; 6], [0, 0, 0, 0, 0, 1]);

        let sown = sow(&mut room, Side::Guest, 5, SowingRule::SourceFirst);

        assert_eq!(sown.last, Location::treasury(Side::Guest));
        assert_eq!(room.gamer(Seat::Gamer2).score(), 1);
    }

    #[test]
    fn test_long_sow_skips_opponent_treasury() {
        // 13 stones lap the ring once, skipping the owner's treasury.
        let mut room = room([4; 6], [0, 0, 13, 0, 0, 0]);

        let sown = sow(&mut room, Side::Guest, 2, SowingRule::NextSlot);

        assert_eq!(sown.last, Location::pit(Side::Guest, 2));
        assert_eq!(room.gamer1.score(), 0);
        assert_eq!(room.gamer2.score(), 1);
        assert_eq!(room.gamer2.pit_counts(), [1, 1, 1, 1, 1, 1]);
        assert_eq!(room.gamer1.pit_counts(), [5; 6]);
    }
}
