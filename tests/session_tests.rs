//! Two gamers sharing one room through the in-memory store.

use chrono::{DateTime, TimeZone, Utc};

use mangala::core::GamerId;
use mangala::games::mangala::{Mangala, MangalaBuilder};
use mangala::rules::RulesEngine;
use mangala::sync::{MemoryRoomStore, RoomSession, RoomStore, SessionError, StoreError, Version};
use mangala::turn::TurnPhase;

fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn owner() -> GamerId {
    GamerId::new("owner")
}

fn guest() -> GamerId {
    GamerId::new("guest")
}

fn engine(optimistic: bool) -> Mangala {
    MangalaBuilder::new().optimistic_writes(optimistic).build("owner").0
}

fn pair(optimistic: bool) -> (MemoryRoomStore, RoomSession<MemoryRoomStore>, RoomSession<MemoryRoomStore>) {
    let store = MemoryRoomStore::new();
    let mut host = RoomSession::create(store.clone(), engine(optimistic), Some(owner())).unwrap();
    let visitor = RoomSession::open(
        store.clone(),
        engine(optimistic),
        host.room_id().clone(),
        Some(guest()),
        t(0),
    )
    .unwrap();
    host.sync().unwrap();
    (store, host, visitor)
}

// =============================================================================
// Joining Tests
// =============================================================================

/// Test that opening a room as a second user joins and starts the game.
#[test]
fn test_join_through_session() {
    let (_, host, visitor) = pair(true);

    assert_eq!(visitor.room().gamer2.id, Some(guest()));
    assert_eq!(host.room(), visitor.room());
    assert_eq!(host.version(), Version(2));
    assert_eq!(host.phase(), TurnPhase::AwaitingMove(owner()));
    assert!(host.has_turn());
    assert!(!visitor.has_turn());
    assert!(host.clock().is_some());
}

/// Test that sessions require a signed-in user.
#[test]
fn test_unauthenticated_user_is_rejected() {
    let store = MemoryRoomStore::new();
    let host = RoomSession::create(store.clone(), Mangala::default(), Some(owner())).unwrap();

    let err = RoomSession::open(store.clone(), Mangala::default(), host.room_id().clone(), None, t(0))
        .unwrap_err();
    assert!(matches!(err, SessionError::Unauthorized));
    assert!(err.is_redirect());

    assert!(matches!(
        RoomSession::create(store, Mangala::default(), None),
        Err(SessionError::Unauthorized)
    ));
}

/// Test that a user without a seat in a full room is sent away.
#[test]
fn test_full_room() {
    let (store, host, _visitor) = pair(true);

    let err = RoomSession::open(
        store,
        Mangala::default(),
        host.room_id().clone(),
        Some(GamerId::new("third")),
        t(1),
    )
    .unwrap_err();
    assert!(matches!(err, SessionError::Unauthorized));
    assert!(err.is_redirect());
    assert!(!err.is_transient());
}

/// Test that a closed room cannot be taken over by a new visitor.
#[test]
fn test_closed_room_turns_visitor_away() {
    let store = MemoryRoomStore::new();
    let mut host = RoomSession::create(store.clone(), engine(true), Some(owner())).unwrap();
    host.exit(t(1)).unwrap();

    let err = RoomSession::open(store, engine(true), host.room_id().clone(), Some(guest()), t(2))
        .unwrap_err();
    assert!(matches!(err, SessionError::Unauthorized));
    assert!(err.is_redirect());
}

// =============================================================================
// Publishing Tests
// =============================================================================

/// Test that a move published by one gamer reaches the other.
#[test]
fn test_moves_propagate() {
    let (_, mut host, mut visitor) = pair(true);

    let record = host.click_pit(5, t(5)).unwrap().unwrap();
    assert_eq!(record.sown, 4);
    assert_eq!(host.room().gamer1.pit_counts(), [4, 5, 5, 5, 5, 0]);

    assert_eq!(visitor.sync().unwrap(), 1);
    assert_eq!(visitor.room(), host.room());
    assert!(visitor.has_turn());

    // Not the host's turn any more: nothing is written.
    assert!(host.click_pit(0, t(6)).unwrap().is_none());
    assert_eq!(host.version(), visitor.version());
}

/// Test that a stale write is rejected and the local view is kept.
#[test]
fn test_stale_write_conflict() {
    let (store, mut host, mut visitor) = pair(true);

    // The visitor's timer flips the turn while the host still sees its own turn.
    assert!(visitor.tick(t(61)).unwrap());

    let before = host.room().clone();
    let err = host.click_pit(5, t(61)).unwrap_err();

    assert!(matches!(
        err,
        SessionError::Store {
            source: StoreError::VersionConflict { .. },
            ..
        }
    ));
    assert!(err.is_transient());
    assert_eq!(host.room(), &before);

    host.sync().unwrap();
    assert_eq!(host.phase(), TurnPhase::AwaitingMove(guest()));
    assert_eq!(host.room(), &store.get(host.room_id()).unwrap().value);
}

/// Test that blind writes let the last writer win.
#[test]
fn test_blind_writes_last_writer_wins() {
    let (store, mut host, mut visitor) = pair(false);

    assert!(visitor.tick(t(61)).unwrap());
    assert!(host.click_pit(5, t(61)).unwrap().is_some());

    let stored = store.get(host.room_id()).unwrap();
    assert_eq!(stored.version, Version(4));
    assert_eq!(stored.value.gamer1.pit_counts(), [4, 5, 5, 5, 5, 0]);
}

/// Test that a failed publish shows a retryable notice and changes nothing.
#[test]
fn test_store_outage() {
    let (store, mut host, _visitor) = pair(true);
    let before = host.room().clone();

    store.set_offline(true);
    let err = host.click_pit(5, t(3)).unwrap_err();

    assert!(err.is_transient());
    assert_eq!(
        err.notice(),
        "Oops! Something went wrong while making a move. Please try again!"
    );
    assert_eq!(host.room(), &before);

    store.set_offline(false);
    assert!(host.click_pit(5, t(4)).unwrap().is_some());
}

// =============================================================================
// Exit and Deletion Tests
// =============================================================================

/// Test exit, deletion, and what the leaving gamer sees afterwards.
#[test]
fn test_exit_and_delete() {
    let (store, mut host, mut visitor) = pair(true);

    visitor.exit(t(10)).unwrap();
    host.sync().unwrap();
    assert_eq!(host.phase(), TurnPhase::Completed);
    assert_eq!(host.standings().headline(), "guest left the game");

    host.delete().unwrap();
    assert!(store.is_empty());

    let err = visitor.sync().unwrap_err();
    assert!(matches!(err, SessionError::RoomGone(_)));
    assert_eq!(err.notice(), "This room no longer exists.");
}

/// Test that the gamer who exited cannot delete the room.
#[test]
fn test_exiting_gamer_cannot_delete() {
    let (store, _host, mut visitor) = pair(true);

    visitor.exit(t(10)).unwrap();
    assert!(matches!(visitor.delete(), Err(SessionError::Unauthorized)));
    assert_eq!(store.len(), 1);
}

// =============================================================================
// Full Game Tests
// =============================================================================

/// Play both sessions to the end, each gamer sowing their last non-empty pit.
fn play_out(
    host: &mut RoomSession<MemoryRoomStore>,
    visitor: &mut RoomSession<MemoryRoomStore>,
) -> i64 {
    let mut clock = 0;

    while host.phase() != TurnPhase::Completed {
        clock += 1;
        assert!(clock < 1000, "game did not finish");

        let (mover, watcher) = if host.has_turn() {
            (&mut *host, &mut *visitor)
        } else {
            (&mut *visitor, &mut *host)
        };
        let seat = mover.room().seat_of(mover.user()).unwrap();
        let pit = (0..6)
            .rev()
            .find(|&p| !mover.room().gamer(seat).pits[p].is_empty())
            .unwrap();

        assert!(mover.click_pit(pit, t(clock)).unwrap().is_some());
        watcher.sync().unwrap();
    }
    clock
}

/// Test a full game played through both sessions, then a rematch.
#[test]
fn test_full_game_and_new_game() {
    let (_, mut host, mut visitor) = pair(true);
    let clock = play_out(&mut host, &mut visitor);

    assert_eq!(host.room(), visitor.room());
    assert!(host.standings().result.is_some());

    visitor.new_game(t(clock + 1)).unwrap();
    host.sync().unwrap();

    assert_eq!(host.phase(), TurnPhase::AwaitingMove(guest()));
    assert_eq!(host.room().scores(), (0, 0));
    assert_eq!(host.room().game_owner, owner());
    assert!(host.room().audit(host.engine().config()).is_ok());
}

/// Test that leaving after the board is decided keeps the stone result.
#[test]
fn test_exit_after_finish_keeps_winner() {
    let (_, mut host, mut visitor) = pair(true);
    let clock = play_out(&mut host, &mut visitor);
    let before = host.engine().is_terminal(host.room());
    let winner = host.room().winner_gamer.clone();

    visitor.exit(t(clock + 1)).unwrap();
    host.sync().unwrap();

    assert!(host.room().exit_game.is_some());
    assert_eq!(host.room().winner_gamer, winner);
    assert_eq!(host.engine().is_terminal(host.room()), before);
    assert_eq!(
        host.standings().result.as_ref().and_then(|r| r.winner()).cloned(),
        winner
    );
}
