//! Room lifecycle: joining, turn expiry, exits and rematches.
//!
//! Every operation reads a room snapshot and returns the `RoomPatch` to
//! publish. Nothing here touches the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::config::MangalaConfig;
use crate::core::player::GamerId;
use crate::core::rng::GameRng;
use crate::core::state::{ExitGame, Gamer, Room, RoomPatch};

use super::clock::TurnClock;

/// Where a room is in its lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Created, second seat empty.
    WaitingForSecondPlayer,
    /// In play; the given gamer holds the turn.
    AwaitingMove(GamerId),
    /// Board cleared or a gamer exited.
    Completed,
}

impl TurnPhase {
    /// Phase of a room snapshot.
    #[must_use]
    pub fn of(room: &Room) -> Self {
        if room.is_game_completed {
            TurnPhase::Completed
        } else if !room.is_game_started {
            TurnPhase::WaitingForSecondPlayer
        } else {
            TurnPhase::AwaitingMove(room.move_order.clone())
        }
    }

    /// True if `gamer` may move now.
    #[must_use]
    pub fn is_turn_of(&self, gamer: &GamerId) -> bool {
        matches!(self, TurnPhase::AwaitingMove(g) if g == gamer)
    }
}

/// Rejected lifecycle requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TurnError {
    #[error("room already has two gamers")]
    RoomFull,

    #[error("gamer {0} already holds a seat")]
    AlreadySeated(GamerId),

    #[error("gamer {0} does not hold a seat")]
    NotSeated(GamerId),

    #[error("game is not completed")]
    NotCompleted,

    #[error("opponent has left the room")]
    OpponentMissing,

    #[error("room is closed")]
    Closed,
}

/// Seat `user` as gamer 2 and start the game.
pub fn join(room: &Room, user: &GamerId, now: DateTime<Utc>) -> Result<RoomPatch, TurnError> {
    if room.seat_of(user).is_some() {
        return Err(TurnError::AlreadySeated(user.clone()));
    }
    if room.gamer2.id.is_some() {
        return Err(TurnError::RoomFull);
    }
    if room.is_game_completed || room.exit_game.is_some() {
        return Err(TurnError::Closed);
    }

    tracing::info!(gamer = %user, owner = %room.game_owner, "second gamer joined");

    Ok(RoomPatch {
        gamer2_id: Some(user.clone()),
        is_game_started: Some(true),
        move_start_timestamp: Some(now),
        ..RoomPatch::default()
    })
}

/// Hand the turn to the opponent once it has run for the full timeout.
///
/// Returns `None` while the turn is still running or no turn is in play.
pub fn expire_turn(room: &Room, config: &MangalaConfig, now: DateTime<Utc>) -> Option<RoomPatch> {
    let TurnPhase::AwaitingMove(current) = TurnPhase::of(room) else {
        return None;
    };
    let clock = TurnClock::for_room(room, config)?;
    if !clock.is_expired(now) {
        return None;
    }
    let next = room.opponent_of(&current)?;

    tracing::debug!(
        from = %current,
        to = %next,
        elapsed_ms = clock.elapsed(now).num_milliseconds(),
        "turn expired"
    );

    Some(RoomPatch {
        move_order: Some(next.clone()),
        move_start_timestamp: Some(now),
        ..RoomPatch::default()
    })
}

/// Leave the room. An unfinished game ends with no winner.
pub fn exit(room: &Room, user: &GamerId, now: DateTime<Utc>) -> Result<RoomPatch, TurnError> {
    if room.seat_of(user).is_none() {
        return Err(TurnError::NotSeated(user.clone()));
    }

    let mut patch = RoomPatch {
        exit_game: Some(Some(ExitGame {
            user_id: user.clone(),
        })),
        ..RoomPatch::default()
    };
    if !room.is_game_completed {
        patch.is_game_completed = Some(true);
        patch.winner_gamer = Some(None);
    }

    tracing::info!(gamer = %user, at = %now, forfeit = !room.is_game_completed, "gamer exited");
    Ok(patch)
}

/// Reseed a finished room and start a new game with `user` to move.
///
/// Seats and ownership are kept. Stones are renumbered from 1.
pub fn rematch(
    room: &Room,
    user: &GamerId,
    config: &MangalaConfig,
    rng: &mut GameRng,
    now: DateTime<Utc>,
) -> Result<RoomPatch, TurnError> {
    if room.seat_of(user).is_none() {
        return Err(TurnError::NotSeated(user.clone()));
    }
    if !room.is_game_completed {
        return Err(TurnError::NotCompleted);
    }
    if !room.both_seated() || room.exit_game.is_some() {
        return Err(TurnError::OpponentMissing);
    }

    let fresh = Room::new(room.game_owner.clone(), config, rng);
    let reseat = |seated: &Gamer, fresh: Gamer| Gamer {
        id: seated.id.clone(),
        ..fresh
    };

    tracing::info!(gamer = %user, "rematch started");

    Ok(RoomPatch {
        gamer1: Some(reseat(&room.gamer1, fresh.gamer1)),
        gamer2: Some(reseat(&room.gamer2, fresh.gamer2)),
        move_order: Some(user.clone()),
        move_start_timestamp: Some(now),
        is_game_started: Some(true),
        is_game_completed: Some(false),
        winner_gamer: Some(None),
        exit_game: Some(None),
        ..RoomPatch::default()
    })
}

/// The remaining gamer may delete a room once the other has exited.
#[must_use]
pub fn can_delete(room: &Room, user: &GamerId) -> bool {
    room.seat_of(user).is_some()
        && room
            .exit_game
            .as_ref()
            .is_some_and(|exit| exit.user_id != *user)
}
