//! A gamer's live view of one room.
//!
//! `RoomSession` holds the last snapshot the gamer has seen, computes every
//! change locally from it and publishes the resulting patch. A failed
//! publish leaves the local view untouched; the error carries the notice to
//! show.

use chrono::{DateTime, Utc};

use super::error::SessionError;
use super::store::{RoomEvent, RoomId, RoomStore, Subscription, Version, Versioned};
use crate::core::{GameRng, GamerId, Move, MoveRecord, Room, RoomPatch};
use crate::games::mangala::Mangala;
use crate::rules::{MoveOutcome, RulesEngine};
use crate::turn::{self, Standings, TurnClock, TurnError, TurnPhase};

/// Client-side session for one gamer in one room.
pub struct RoomSession<S: RoomStore> {
    store: S,
    engine: Mangala,
    room_id: RoomId,
    user: GamerId,
    snapshot: Versioned<Room>,
    subscription: Subscription,
    rng: GameRng,
}

impl<S: RoomStore> RoomSession<S> {
    /// Create a room owned by `user` and open a session on it.
    pub fn create(store: S, engine: Mangala, user: Option<GamerId>) -> Result<Self, SessionError> {
        let user = user.ok_or(SessionError::Unauthorized)?;
        let mut rng = GameRng::new(engine.config().seed);
        let room = engine.new_room(user.clone(), &mut rng);
        let room_id = store
            .create(&room)
            .map_err(|e| SessionError::store("creating a room", e))?;

        tracing::info!(room = %room_id, owner = %user, "room opened");
        Self::attach(store, engine, room_id, user, rng)
    }

    /// Open an existing room.
    ///
    /// A signed-in visitor takes the free second seat. A visitor who cannot
    /// be seated, because the room is full or already over, is unauthorized.
    pub fn open(
        store: S,
        engine: Mangala,
        room_id: RoomId,
        user: Option<GamerId>,
        now: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let user = user.ok_or(SessionError::Unauthorized)?;
        let rng = GameRng::new(engine.config().seed);
        let mut session = Self::attach(store, engine, room_id, user, rng)?;

        if session.room().seat_of(&session.user).is_none() {
            let patch = turn::join(session.room(), &session.user, now).map_err(|err| match err {
                TurnError::RoomFull | TurnError::Closed => {
                    tracing::debug!(
                        room = %session.room_id,
                        gamer = %session.user,
                        reason = %err,
                        "visitor turned away"
                    );
                    SessionError::Unauthorized
                }
                err => SessionError::Turn(err),
            })?;
            session.publish(patch, "joining the room")?;
        }
        Ok(session)
    }

    fn attach(
        store: S,
        engine: Mangala,
        room_id: RoomId,
        user: GamerId,
        rng: GameRng,
    ) -> Result<Self, SessionError> {
        let snapshot = store
            .get(&room_id)
            .map_err(|e| SessionError::store("loading the room", e))?;
        let subscription = store
            .subscribe(&room_id)
            .map_err(|e| SessionError::store("loading the room", e))?;

        Ok(Self {
            store,
            engine,
            room_id,
            user,
            snapshot,
            subscription,
            rng,
        })
    }

    // === Accessors ===

    /// Last snapshot seen.
    pub fn room(&self) -> &Room {
        &self.snapshot.value
    }

    /// Version of the last snapshot seen.
    pub fn version(&self) -> Version {
        self.snapshot.version
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn user(&self) -> &GamerId {
        &self.user
    }

    pub fn engine(&self) -> &Mangala {
        &self.engine
    }

    pub fn phase(&self) -> TurnPhase {
        TurnPhase::of(self.room())
    }

    /// True when it is this gamer's turn.
    pub fn has_turn(&self) -> bool {
        self.phase().is_turn_of(&self.user)
    }

    pub fn clock(&self) -> Option<TurnClock> {
        TurnClock::for_room(self.room(), self.engine.config())
    }

    pub fn standings(&self) -> Standings {
        turn::standings(self.room())
    }

    // === Actions ===

    /// Sow one of this gamer's pits.
    ///
    /// Returns `None` when the click is not a legal move; nothing is written.
    pub fn click_pit(
        &mut self,
        pit: usize,
        now: DateTime<Utc>,
    ) -> Result<Option<MoveRecord>, SessionError> {
        let mv = Move::new(self.user.clone(), pit);
        match self.engine.apply_move(self.room(), &mv, now) {
            MoveOutcome::NoChange => Ok(None),
            MoveOutcome::Applied(transition) => {
                self.publish(transition.patch(), "making a move")?;
                Ok(Some(transition.record))
            }
        }
    }

    /// Flip the turn if it has timed out. Returns whether a flip was written.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        match turn::expire_turn(self.room(), self.engine.config(), now) {
            Some(patch) => {
                self.publish(patch, "updating the turn")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Leave the room.
    pub fn exit(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let patch = turn::exit(self.room(), &self.user, now)?;
        self.publish(patch, "exiting game")?;
        Ok(())
    }

    /// Start a rematch in a finished room with this gamer to move.
    pub fn new_game(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let patch = turn::rematch(
            &self.snapshot.value,
            &self.user,
            self.engine.config(),
            &mut self.rng,
            now,
        )?;
        self.publish(patch, "starting a new game")?;
        Ok(())
    }

    /// Delete the room after the opponent has left.
    pub fn delete(self) -> Result<(), SessionError> {
        if !turn::can_delete(self.room(), &self.user) {
            return Err(SessionError::Unauthorized);
        }
        self.store
            .delete(&self.room_id)
            .map_err(|e| SessionError::store("deleting the room", e))?;

        tracing::info!(room = %self.room_id, gamer = %self.user, "room deleted");
        Ok(())
    }

    /// Apply pushed changes. Returns how many newer snapshots were taken.
    pub fn sync(&mut self) -> Result<usize, SessionError> {
        let mut taken = 0;
        for event in self.subscription.drain() {
            match event {
                RoomEvent::Updated(snapshot) if snapshot.version > self.snapshot.version => {
                    self.snapshot = snapshot;
                    taken += 1;
                }
                RoomEvent::Updated(_) => {}
                RoomEvent::Deleted => return Err(SessionError::RoomGone(self.room_id.clone())),
            }
        }
        Ok(taken)
    }

    /// Write `patch`, guarded by the current version when configured.
    fn publish(&mut self, patch: RoomPatch, action: &'static str) -> Result<(), SessionError> {
        let expected = self
            .engine
            .config()
            .optimistic_writes
            .then_some(self.snapshot.version);

        match self.store.merge(&self.room_id, &patch, expected) {
            Ok(version) => {
                self.snapshot = Versioned {
                    version,
                    value: patch.applied(&self.snapshot.value),
                };
                Ok(())
            }
            Err(err) => {
                tracing::warn!(
                    room = %self.room_id,
                    gamer = %self.user,
                    action,
                    error = %err,
                    "publish failed"
                );
                Err(SessionError::store(action, err))
            }
        }
    }
}

impl<S: RoomStore> std::fmt::Debug for RoomSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomSession")
            .field("room_id", &self.room_id)
            .field("user", &self.user)
            .field("version", &self.snapshot.version)
            .finish()
    }
}

