//! Room store contract.
//!
//! The store holds one document per room and supports:
//! - Create, read and delete by id
//! - Merge-by-id writes of a `RoomPatch`, optionally guarded by the version
//!   the writer last saw
//! - Push subscriptions that deliver every change to a room

use std::sync::mpsc::{Receiver, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::StoreError;
use crate::core::state::{Room, RoomPatch};

/// Document id of a room.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic document version, bumped on every write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub u64);

impl Version {
    /// Version of a newly created document.
    pub const INITIAL: Version = Version(1);

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A value together with the document version it was read at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Versioned<T> {
    pub version: Version,
    pub value: T,
}

/// Change notification pushed to subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoomEvent {
    /// New snapshot after a write. Also sent once on subscribe.
    Updated(Versioned<Room>),
    /// The room document was deleted.
    Deleted,
}

/// Receiving end of a room subscription.
#[derive(Debug)]
pub struct Subscription {
    room: RoomId,
    events: Receiver<RoomEvent>,
}

impl Subscription {
    pub fn new(room: RoomId, events: Receiver<RoomEvent>) -> Self {
        Self { room, events }
    }

    /// Room this subscription follows.
    #[must_use]
    pub fn room(&self) -> &RoomId {
        &self.room
    }

    /// Next pending event without blocking.
    ///
    /// `None` when nothing is pending or the store has gone away.
    pub fn try_next(&self) -> Option<RoomEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Wait up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<RoomEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Every pending event, oldest first.
    pub fn drain(&self) -> Vec<RoomEvent> {
        self.events.try_iter().collect()
    }
}

/// Document store holding rooms.
pub trait RoomStore {
    /// Store a new room and return its id.
    fn create(&self, room: &Room) -> Result<RoomId, StoreError>;

    /// Read the latest snapshot.
    fn get(&self, id: &RoomId) -> Result<Versioned<Room>, StoreError>;

    /// Merge `patch` into the stored room.
    ///
    /// With `expected` set the write fails with `VersionConflict` unless the
    /// stored version still matches. With `None` it always wins.
    fn merge(
        &self,
        id: &RoomId,
        patch: &RoomPatch,
        expected: Option<Version>,
    ) -> Result<Version, StoreError>;

    /// Remove the room.
    fn delete(&self, id: &RoomId) -> Result<(), StoreError>;

    /// Follow changes to a room.
    fn subscribe(&self, id: &RoomId) -> Result<Subscription, StoreError>;
}
