//! In-memory room store.
//!
//! Rooms are kept as bincode documents, so every read decodes a fresh copy
//! and no caller can alias stored state. Clones share the same rooms.

use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::FxHashMap;

use super::error::StoreError;
use super::store::{RoomEvent, RoomId, RoomStore, Subscription, Version, Versioned};
use crate::core::state::{Room, RoomPatch};

struct Document {
    version: Version,
    bytes: Vec<u8>,
    subscribers: Vec<Sender<RoomEvent>>,
}

impl Document {
    fn decode(&self) -> Result<Versioned<Room>, StoreError> {
        Ok(Versioned {
            version: self.version,
            value: Room::from_bytes(&self.bytes)?,
        })
    }

    /// Push an event, dropping subscribers that hung up.
    fn notify(&mut self, event: &RoomEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[derive(Default)]
struct Inner {
    rooms: FxHashMap<RoomId, Document>,
    next_id: u64,
    offline: bool,
}

/// Thread-safe in-memory `RoomStore`.
#[derive(Clone, Default)]
pub struct MemoryRoomStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing the connection. While offline every call fails with
    /// `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.offline = offline;
        }
    }

    /// Number of stored rooms.
    pub fn len(&self) -> usize {
        self.inner.lock().map_or(0, |inner| inner.rooms.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;
        if inner.offline {
            return Err(StoreError::Unavailable("store offline".to_string()));
        }
        Ok(inner)
    }
}

impl std::fmt::Debug for MemoryRoomStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRoomStore")
            .field("rooms", &self.len())
            .finish()
    }
}

impl RoomStore for MemoryRoomStore {
    fn create(&self, room: &Room) -> Result<RoomId, StoreError> {
        let bytes = room.to_bytes()?;
        let mut inner = self.lock()?;

        inner.next_id += 1;
        let id = RoomId::new(format!("room-{}", inner.next_id));
        inner.rooms.insert(
            id.clone(),
            Document {
                version: Version::INITIAL,
                bytes,
                subscribers: Vec::new(),
            },
        );

        tracing::debug!(room = %id, owner = %room.game_owner, "room created");
        Ok(id)
    }

    fn get(&self, id: &RoomId) -> Result<Versioned<Room>, StoreError> {
        let inner = self.lock()?;
        inner
            .rooms
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?
            .decode()
    }

    fn merge(
        &self,
        id: &RoomId,
        patch: &RoomPatch,
        expected: Option<Version>,
    ) -> Result<Version, StoreError> {
        let mut inner = self.lock()?;
        let doc = inner
            .rooms
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if let Some(expected) = expected {
            if expected != doc.version {
                tracing::warn!(
                    room = %id,
                    %expected,
                    actual = %doc.version,
                    "rejected stale write"
                );
                return Err(StoreError::VersionConflict {
                    expected,
                    actual: doc.version,
                });
            }
        }

        let mut room = Room::from_bytes(&doc.bytes)?;
        patch.apply_to(&mut room);
        doc.bytes = room.to_bytes()?;
        doc.version = doc.version.next();

        tracing::debug!(
            room = %id,
            version = %doc.version,
            fields = ?patch.fields(),
            guarded = expected.is_some(),
            "room merged"
        );

        let version = doc.version;
        doc.notify(&RoomEvent::Updated(Versioned {
            version,
            value: room,
        }));
        Ok(version)
    }

    fn delete(&self, id: &RoomId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let mut doc = inner
            .rooms
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        doc.notify(&RoomEvent::Deleted);
        tracing::debug!(room = %id, "room deleted");
        Ok(())
    }

    fn subscribe(&self, id: &RoomId) -> Result<Subscription, StoreError> {
        let mut inner = self.lock()?;
        let doc = inner
            .rooms
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        let (tx, rx) = mpsc::channel();
        // Subscribers get the current snapshot first.
        if tx.send(RoomEvent::Updated(doc.decode()?)).is_ok() {
            doc.subscribers.push(tx);
        }
        Ok(Subscription::new(id.clone(), rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, GamerId, MangalaConfig};

    fn room() -> Room {
        Room::new(GamerId::new("owner"), &MangalaConfig::default(), &mut GameRng::new(4))
    }

    #[test]
    fn test_create_and_get() {
        let store = MemoryRoomStore::new();
        let id = store.create(&room()).unwrap();

        let read = store.get(&id).unwrap();
        assert_eq!(read.version, Version::INITIAL);
        assert_eq!(read.value, room());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_room() {
        let store = MemoryRoomStore::new();
        let id = RoomId::new("nope");

        assert!(matches!(store.get(&id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete(&id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.subscribe(&id), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_guarded_merge() {
        let store = MemoryRoomStore::new();
        let id = store.create(&room()).unwrap();
        let patch = RoomPatch {
            is_game_started: Some(true),
            ..RoomPatch::default()
        };

        let v2 = store.merge(&id, &patch, Some(Version::INITIAL)).unwrap();
        assert_eq!(v2, Version(2));
        assert!(store.get(&id).unwrap().value.is_game_started);

        let stale = store.merge(&id, &patch, Some(Version::INITIAL));
        assert!(matches!(
            stale,
            Err(StoreError::VersionConflict {
                expected: Version(1),
                actual: Version(2)
            })
        ));
    }

    #[test]
    fn test_blind_merge_always_wins() {
        let store = MemoryRoomStore::new();
        let id = store.create(&room()).unwrap();

        store.merge(&id, &RoomPatch::default(), None).unwrap();
        let v = store
            .merge(
                &id,
                &RoomPatch {
                    move_order: Some(GamerId::new("someone")),
                    ..RoomPatch::default()
                },
                None,
            )
            .unwrap();

        assert_eq!(v, Version(3));
        assert_eq!(store.get(&id).unwrap().value.move_order, GamerId::new("someone"));
    }

    #[test]
    fn test_subscribers_see_changes() {
        let store = MemoryRoomStore::new();
        let id = store.create(&room()).unwrap();
        let sub = store.subscribe(&id).unwrap();

        let patch = RoomPatch {
            is_game_started: Some(true),
            ..RoomPatch::default()
        };
        store.merge(&id, &patch, None).unwrap();
        store.delete(&id).unwrap();

        let events = sub.drain();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], RoomEvent::Updated(v) if v.version == Version(1)));
        assert!(matches!(&events[1], RoomEvent::Updated(v) if v.value.is_game_started));
        assert_eq!(events[2], RoomEvent::Deleted);
        assert!(store.is_empty());
    }

    #[test]
    fn test_offline_store() {
        let store = MemoryRoomStore::new();
        let id = store.create(&room()).unwrap();

        store.set_offline(true);
        assert!(matches!(store.get(&id), Err(StoreError::Unavailable(_))));

        store.set_offline(false);
        assert!(store.get(&id).is_ok());
    }

    #[test]
    fn test_clones_share_rooms() {
        let store = MemoryRoomStore::new();
        let other = store.clone();
        let id = store.create(&room()).unwrap();

        assert!(other.get(&id).is_ok());
    }
}
