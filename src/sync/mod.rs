//! Room synchronization: the document store contract and the client glue
//! that reads snapshots from it and publishes changes.
//!
//! - `RoomStore`: create/read/merge/delete/subscribe by room id
//! - `MemoryRoomStore`: in-process store backed by bincode documents
//! - `RoomSession`: one gamer's view of one room

pub mod error;
pub mod memory;
pub mod session;
pub mod store;

pub use error::{SessionError, StoreError};
pub use memory::MemoryRoomStore;
pub use session::RoomSession;
pub use store::{RoomEvent, RoomId, RoomStore, Subscription, Version, Versioned};
