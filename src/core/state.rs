//! Room state: the shared document both gamers read and write.
//!
//! ## Room
//!
//! Full game state as stored in the document database:
//! - Both gamer records (pits and treasury)
//! - Owner, turn holder and turn start
//! - Lifecycle flags, winner, voluntary exit
//!
//! Field names serialize in camelCase to match the stored document.
//!
//! ## RoomPatch
//!
//! A merge-by-id write: only fields that are set are written. Moves, turn
//! expiry, joins and exits all publish patches rather than whole rooms.

use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Deserializer, Serialize};

use super::config::{MangalaConfig, PITS_PER_ROW};
use super::entity::{Stone, StoneColor, StoneNo};
use super::player::{GamerId, Seat};
use super::rng::GameRng;
use crate::board::{Location, Pit, Side, Spot, Treasury};

/// One gamer's half of the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gamer {
    /// `None` until someone takes the seat.
    pub id: Option<GamerId>,

    /// Pits 0..6 on this gamer's row.
    pub pits: [Pit; PITS_PER_ROW],

    /// Scoring store.
    #[serde(rename = "treasure")]
    pub treasury: Treasury,
}

impl Gamer {
    /// A gamer with empty pits and treasury.
    #[must_use]
    pub fn empty(id: Option<GamerId>) -> Self {
        Self {
            id,
            pits: std::array::from_fn(|_| Pit::new()),
            treasury: Treasury::new(),
        }
    }

    /// A gamer with every pit stocked with `stones_per_pit` fresh stones.
    ///
    /// Stones are numbered from `next_no`, which is advanced past the last
    /// number used.
    pub fn seeded(
        id: Option<GamerId>,
        stones_per_pit: usize,
        next_no: &mut StoneNo,
        rng: &mut GameRng,
    ) -> Self {
        let mut gamer = Self::empty(id);
        for pit in gamer.pits.iter_mut() {
            for _ in 0..stones_per_pit {
                pit.push(Stone::new(*next_no, rng.stone_color()));
                *next_no = next_no.next();
            }
        }
        gamer
    }

    /// Get a pit by index.
    #[must_use]
    pub fn pit(&self, index: usize) -> Option<&Pit> {
        self.pits.get(index)
    }

    /// Stone count of every pit, in index order.
    #[must_use]
    pub fn pit_counts(&self) -> [usize; PITS_PER_ROW] {
        std::array::from_fn(|i| self.pits[i].len())
    }

    /// Stones still on the row.
    #[must_use]
    pub fn row_stones(&self) -> usize {
        self.pits.iter().map(Pit::len).sum()
    }

    /// True when all six pits are empty.
    #[must_use]
    pub fn is_row_empty(&self) -> bool {
        self.pits.iter().all(Pit::is_empty)
    }

    /// Treasury size.
    #[must_use]
    pub fn score(&self) -> usize {
        self.treasury.len()
    }

    /// Stones on the row and in the treasury.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.row_stones() + self.treasury.len()
    }

    fn stones(&self) -> impl Iterator<Item = &Stone> {
        self.pits
            .iter()
            .flat_map(|p| p.stones())
            .chain(self.treasury.stones())
    }
}

/// Marker left by a gamer who exited voluntarily.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitGame {
    pub user_id: GamerId,
}

/// Stone counts for one row, used to lay out a board directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowCounts {
    pub pits: [usize; PITS_PER_ROW],
    pub treasury: usize,
}

impl RowCounts {
    #[must_use]
    pub const fn new(pits: [usize; PITS_PER_ROW], treasury: usize) -> Self {
        Self { pits, treasury }
    }
}

/// Invariant violations detected by `Room::audit`.
///
/// These indicate an engine bug, never an illegal move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("expected {expected} stones on the board, found {found}")]
    StoneCount { expected: usize, found: usize },

    #[error("{0} appears in more than one container")]
    DuplicateStone(StoneNo),

    #[error("isGameCompleted is {completed} but an empty row is {row_empty}")]
    CompletionMismatch { completed: bool, row_empty: bool },

    #[error("moveOrder {0} does not hold a seat")]
    MoveOrderUnseated(GamerId),
}

/// Complete shared state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Creator and owner.
    pub gamer1: Gamer,

    /// Second gamer; id is `None` until someone joins.
    pub gamer2: Gamer,

    /// Id of gamer 1; decides board orientation.
    pub game_owner: GamerId,

    /// Id of the gamer whose turn it is.
    pub move_order: GamerId,

    /// Start of the current turn.
    pub move_start_timestamp: Option<DateTime<Utc>>,

    pub is_game_started: bool,

    pub is_game_completed: bool,

    /// Winner, or `None` for a draw, an unfinished game, or a forfeit.
    pub winner_gamer: Option<GamerId>,

    /// Set when a gamer leaves voluntarily.
    pub exit_game: Option<ExitGame>,
}

impl Room {
    /// Create a room for `owner` with both rows freshly stocked.
    ///
    /// Stones are numbered `1..=config.total_stones()`, owner's row first.
    pub fn new(owner: GamerId, config: &MangalaConfig, rng: &mut GameRng) -> Self {
        let mut next_no = StoneNo::FIRST;
        let gamer1 = Gamer::seeded(Some(owner.clone()), config.stones_per_pit, &mut next_no, rng);
        let gamer2 = Gamer::seeded(None, config.stones_per_pit, &mut next_no, rng);

        Self {
            gamer1,
            gamer2,
            game_owner: owner.clone(),
            move_order: owner,
            move_start_timestamp: None,
            is_game_started: false,
            is_game_completed: false,
            winner_gamer: None,
            exit_game: None,
        }
    }

    /// Build a room with explicit stone counts.
    ///
    /// Stones are numbered sequentially across gamer 1's pits, gamer 1's
    /// treasury, gamer 2's pits and gamer 2's treasury. The room counts as
    /// started when a guest is given; the turn belongs to the owner.
    #[must_use]
    pub fn from_counts(
        owner: GamerId,
        guest: Option<GamerId>,
        gamer1: RowCounts,
        gamer2: RowCounts,
    ) -> Self {
        let mut next_no = StoneNo::FIRST;
        let mut fresh = || {
            let no = next_no;
            next_no = no.next();
            let color = StoneColor::PALETTE[no.raw() as usize % StoneColor::PALETTE.len()];
            Stone::new(no, color)
        };

        let mut build = |id: Option<GamerId>, counts: RowCounts| {
            let mut gamer = Gamer::empty(id);
            for (pit, &count) in gamer.pits.iter_mut().zip(counts.pits.iter()) {
                for _ in 0..count {
                    pit.push(fresh());
                }
            }
            for _ in 0..counts.treasury {
                gamer.treasury.push(fresh());
            }
            gamer
        };

        let started = guest.is_some();
        let gamer1 = build(Some(owner.clone()), gamer1);
        let gamer2 = build(guest, gamer2);

        Self {
            gamer1,
            gamer2,
            game_owner: owner.clone(),
            move_order: owner,
            move_start_timestamp: None,
            is_game_started: started,
            is_game_completed: false,
            winner_gamer: None,
            exit_game: None,
        }
    }

    // === Seats ===

    /// Get a gamer record.
    #[must_use]
    pub fn gamer(&self, seat: Seat) -> &Gamer {
        match seat {
            Seat::Gamer1 => &self.gamer1,
            Seat::Gamer2 => &self.gamer2,
        }
    }

    /// Get a mutable gamer record.
    pub fn gamer_mut(&mut self, seat: Seat) -> &mut Gamer {
        match seat {
            Seat::Gamer1 => &mut self.gamer1,
            Seat::Gamer2 => &mut self.gamer2,
        }
    }

    /// Seat held by `id`, if any.
    #[must_use]
    pub fn seat_of(&self, id: &GamerId) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|&seat| self.gamer(seat).id.as_ref() == Some(id))
    }

    /// Id seated at `seat`.
    #[must_use]
    pub fn gamer_id(&self, seat: Seat) -> Option<&GamerId> {
        self.gamer(seat).id.as_ref()
    }

    /// Seat of the room owner.
    ///
    /// Falls back to gamer 1, which always holds the owner in a well-formed room.
    #[must_use]
    pub fn owner_seat(&self) -> Seat {
        self.seat_of(&self.game_owner).unwrap_or(Seat::Gamer1)
    }

    /// Board side of a seat.
    #[must_use]
    pub fn side_of_seat(&self, seat: Seat) -> Side {
        if seat == self.owner_seat() {
            Side::Owner
        } else {
            Side::Guest
        }
    }

    /// Seat drawn on a board side.
    #[must_use]
    pub fn seat_of_side(&self, side: Side) -> Seat {
        match side {
            Side::Owner => self.owner_seat(),
            Side::Guest => self.owner_seat().other(),
        }
    }

    /// Id of the other seated gamer.
    #[must_use]
    pub fn opponent_of(&self, id: &GamerId) -> Option<&GamerId> {
        let seat = self.seat_of(id)?;
        self.gamer_id(seat.other())
    }

    /// True when both seats are taken.
    #[must_use]
    pub fn both_seated(&self) -> bool {
        self.gamer1.id.is_some() && self.gamer2.id.is_some()
    }

    /// Started and not yet completed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_game_started && !self.is_game_completed
    }

    // === Board access ===

    /// Pit at a board location. `None` for treasuries or bad indices.
    #[must_use]
    pub fn pit_at(&self, location: Location) -> Option<&Pit> {
        let seat = self.seat_of_side(location.side);
        match location.spot {
            Spot::Pit(i) => self.gamer(seat).pit(i),
            Spot::Treasury => None,
        }
    }

    /// Stones in the container at `location`.
    #[must_use]
    pub fn count_at(&self, location: Location) -> usize {
        let seat = self.seat_of_side(location.side);
        match location.spot {
            Spot::Pit(i) => self.gamer(seat).pit(i).map_or(0, Pit::len),
            Spot::Treasury => self.gamer(seat).treasury.len(),
        }
    }

    /// Treasury sizes as `(gamer1, gamer2)`.
    #[must_use]
    pub fn scores(&self) -> (usize, usize) {
        (self.gamer1.score(), self.gamer2.score())
    }

    /// Stones across every container.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.gamer1.stone_count() + self.gamer2.stone_count()
    }

    /// True when either row is empty.
    #[must_use]
    pub fn any_row_empty(&self) -> bool {
        self.gamer1.is_row_empty() || self.gamer2.is_row_empty()
    }

    /// Check structural invariants.
    ///
    /// - Stone total matches the configuration
    /// - Every stone number is held by exactly one container
    /// - Completion matches an empty row unless a gamer exited
    /// - The turn holder is seated while the game is active
    pub fn audit(&self, config: &MangalaConfig) -> Result<(), InvariantViolation> {
        let found = self.stone_count();
        if found != config.total_stones() {
            return Err(InvariantViolation::StoneCount {
                expected: config.total_stones(),
                found,
            });
        }

        let mut seen = FxHashSet::default();
        for stone in self.gamer1.stones().chain(self.gamer2.stones()) {
            if !seen.insert(stone.no) {
                return Err(InvariantViolation::DuplicateStone(stone.no));
            }
        }

        if self.exit_game.is_none() {
            let row_empty = self.any_row_empty();
            if self.is_game_completed != row_empty {
                return Err(InvariantViolation::CompletionMismatch {
                    completed: self.is_game_completed,
                    row_empty,
                });
            }
        }

        if self.is_active() && self.seat_of(&self.move_order).is_none() {
            return Err(InvariantViolation::MoveOrderUnseated(self.move_order.clone()));
        }

        Ok(())
    }

    // === Encoding ===

    /// Encode the room as bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a room from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Partial room update written with merge semantics.
///
/// `None` leaves a field untouched. Nullable fields use a nested option so
/// that clearing them (`Some(None)`) is distinct from not writing them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamer1: Option<Gamer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamer2: Option<Gamer>,

    /// Writes `gamer2.id` only, as when a second gamer joins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamer2_id: Option<GamerId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_order: Option<GamerId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_start_timestamp: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_game_started: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_game_completed: Option<bool>,

    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub winner_gamer: Option<Option<GamerId>>,

    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_game: Option<Option<ExitGame>>,
}

impl RoomPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the patch writes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Document field names this patch writes.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.gamer1.is_some() {
            fields.push("gamer1");
        }
        if self.gamer2.is_some() {
            fields.push("gamer2");
        }
        if self.gamer2_id.is_some() {
            fields.push("gamer2.id");
        }
        if self.move_order.is_some() {
            fields.push("moveOrder");
        }
        if self.move_start_timestamp.is_some() {
            fields.push("moveStartTimestamp");
        }
        if self.is_game_started.is_some() {
            fields.push("isGameStarted");
        }
        if self.is_game_completed.is_some() {
            fields.push("isGameCompleted");
        }
        if self.winner_gamer.is_some() {
            fields.push("winnerGamer");
        }
        if self.exit_game.is_some() {
            fields.push("exitGame");
        }
        fields
    }

    /// Merge this patch into `room`.
    pub fn apply_to(&self, room: &mut Room) {
        if let Some(gamer) = &self.gamer1 {
            room.gamer1 = gamer.clone();
        }
        if let Some(gamer) = &self.gamer2 {
            room.gamer2 = gamer.clone();
        }
        if let Some(id) = &self.gamer2_id {
            room.gamer2.id = Some(id.clone());
        }
        if let Some(id) = &self.move_order {
            room.move_order = id.clone();
        }
        if let Some(ts) = self.move_start_timestamp {
            room.move_start_timestamp = Some(ts);
        }
        if let Some(started) = self.is_game_started {
            room.is_game_started = started;
        }
        if let Some(completed) = self.is_game_completed {
            room.is_game_completed = completed;
        }
        if let Some(winner) = &self.winner_gamer {
            room.winner_gamer = winner.clone();
        }
        if let Some(exit) = &self.exit_game {
            room.exit_game = exit.clone();
        }
    }

    /// Return a copy of `room` with this patch merged in.
    #[must_use]
    pub fn applied(&self, room: &Room) -> Room {
        let mut next = room.clone();
        self.apply_to(&mut next);
        next
    }
}
