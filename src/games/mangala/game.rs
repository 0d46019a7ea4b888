//! Mangala game implementation.

use chrono::{DateTime, Duration, Utc};
use smallvec::SmallVec;

use crate::board::Location;
use crate::core::{
    GameRng, GamerId, MangalaConfig, Move, MoveRecord, Room, Seat, SowingRule, Sweep, PITS_PER_ROW,
};
use crate::rules::{resolve_capture, sow, GameResult, MoveOutcome, RulesEngine, Transition};

/// The Mangala rules engine.
#[derive(Clone, Debug, Default)]
pub struct Mangala {
    config: MangalaConfig,
}

/// Builder for creating a Mangala game and its first room.
#[derive(Clone, Debug, Default)]
pub struct MangalaBuilder {
    config: MangalaConfig,
}

impl MangalaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stones_per_pit(mut self, stones: usize) -> Self {
        self.config = self.config.with_stones_per_pit(stones);
        self
    }

    pub fn turn_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_turn_timeout(timeout);
        self
    }

    pub fn sowing(mut self, rule: SowingRule) -> Self {
        self.config = self.config.with_sowing(rule);
        self
    }

    pub fn optimistic_writes(mut self, enabled: bool) -> Self {
        self.config = self.config.with_optimistic_writes(enabled);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_seed(seed);
        self
    }

    /// Build the engine and a fresh room owned by `owner`.
    pub fn build(self, owner: impl Into<GamerId>) -> (Mangala, Room) {
        let mut rng = GameRng::new(self.config.seed);
        let room = Room::new(owner.into(), &self.config, &mut rng);
        (Mangala::new(self.config), room)
    }
}

impl Mangala {
    /// Create an engine for a configuration.
    pub fn new(config: MangalaConfig) -> Self {
        Self { config }
    }

    /// Create a fresh, unstarted room.
    pub fn new_room(&self, owner: GamerId, rng: &mut GameRng) -> Room {
        Room::new(owner, &self.config, rng)
    }

    /// Winner by treasury size, `None` on a tie.
    pub fn leader(room: &Room) -> Option<GamerId> {
        let (one, two) = room.scores();
        let seat = match one.cmp(&two) {
            std::cmp::Ordering::Greater => Seat::Gamer1,
            std::cmp::Ordering::Less => Seat::Gamer2,
            std::cmp::Ordering::Equal => return None,
        };
        room.gamer_id(seat).cloned()
    }

    /// Result of a completed room, `None` while it is running.
    ///
    /// An exit only counts as a forfeit when it ended a board that was still
    /// in play; leaving after the last move keeps the stone result.
    pub fn result(room: &Room) -> Option<GameResult> {
        if !room.is_game_completed {
            return None;
        }
        match &room.exit_game {
            Some(exit) if !room.any_row_empty() => Some(GameResult::Forfeit {
                exited: exit.user_id.clone(),
            }),
            _ => Some(match Self::leader(room) {
                Some(winner) => GameResult::Winner(winner),
                None => GameResult::Draw,
            }),
        }
    }

    /// End the game if either row is empty.
    ///
    /// The row that still holds stones is swept into its own treasury.
    fn settle(room: &mut Room, mover: Seat) -> Option<Option<Sweep>> {
        let mover_empty = room.gamer(mover).is_row_empty();
        let other_empty = room.gamer(mover.other()).is_row_empty();
        if !mover_empty && !other_empty {
            return None;
        }

        let holder = if mover_empty { mover.other() } else { mover };
        let gamer = room.gamer_mut(holder);
        let mut swept = 0;
        for pit in gamer.pits.iter_mut() {
            let stones = pit.take_all();
            swept += stones.len();
            gamer.treasury.append(stones);
        }

        Some((swept > 0).then_some(Sweep {
            seat: holder,
            stones: swept,
        }))
    }
}

impl RulesEngine for Mangala {
    fn config(&self) -> &MangalaConfig {
        &self.config
    }

    fn is_legal(&self, room: &Room, gamer: &GamerId, pit: usize) -> bool {
        if pit >= PITS_PER_ROW
            || room.move_order != *gamer
            || !room.is_active()
            || !room.both_seated()
            || room.seat_of(&room.game_owner).is_none()
        {
            return false;
        }

        room.seat_of(gamer)
            .and_then(|seat| room.gamer(seat).pit(pit))
            .is_some_and(|p| !p.is_empty())
    }

    fn apply_move(&self, room: &Room, mv: &Move, now: DateTime<Utc>) -> MoveOutcome {
        if !self.is_legal(room, &mv.gamer, mv.pit) {
            tracing::trace!(gamer = %mv.gamer, pit = mv.pit, "rejected illegal move");
            return MoveOutcome::NoChange;
        }
        let (Some(seat), Some(opponent)) = (room.seat_of(&mv.gamer), room.opponent_of(&mv.gamer))
        else {
            return MoveOutcome::NoChange;
        };
        let opponent = opponent.clone();

        let mut next = room.clone();
        let side = next.side_of_seat(seat);

        let sown = sow(&mut next, side, mv.pit, self.config.sowing);
        let mut captures = SmallVec::new();
        if let Some(capture) = resolve_capture(&mut next, side, sown.last) {
            tracing::debug!(
                gamer = %mv.gamer,
                kind = ?capture.kind,
                stones = capture.stones,
                "capture"
            );
            captures.push(capture);
        }

        let extra_turn = sown.last == Location::treasury(side);
        let settled = Self::settle(&mut next, seat);
        let completed = settled.is_some();

        next.move_order = if extra_turn { mv.gamer.clone() } else { opponent };
        next.move_start_timestamp = Some(now);
        next.is_game_completed = completed;
        next.winner_gamer = if completed { Self::leader(&next) } else { None };

        debug_assert_eq!(
            next.stone_count(),
            room.stone_count(),
            "sowing must conserve stones"
        );
        debug_assert_eq!(next.is_game_completed, next.any_row_empty());

        let record = MoveRecord {
            gamer: mv.gamer.clone(),
            seat,
            pit: mv.pit,
            sown: sown.stones,
            last: sown.last,
            captures,
            sweep: settled.flatten(),
            extra_turn,
            completed,
        };

        tracing::debug!(
            gamer = %mv.gamer,
            pit = mv.pit,
            sown = record.sown,
            captured = record.captured(),
            extra_turn,
            "applied move"
        );
        if completed {
            let (one, two) = next.scores();
            tracing::info!(
                gamer1 = one,
                gamer2 = two,
                winner = ?next.winner_gamer,
                "game completed"
            );
        }

        MoveOutcome::Applied(Transition { room: next, record })
    }

    fn is_terminal(&self, room: &Room) -> Option<GameResult> {
        Self::result(room)
    }
}
