//! Turn coordination: who may act, for how long, and how a room moves
//! through its lifecycle.
//!
//! ```text
//! WaitingForSecondPlayer --join--> AwaitingMove(owner)
//! AwaitingMove(a) --move / timeout--> AwaitingMove(b) | Completed
//! AwaitingMove(_) --exit--> Completed
//! Completed --rematch--> AwaitingMove(requester)
//! ```

pub mod clock;
pub mod coordinator;
pub mod standings;

pub use clock::TurnClock;
pub use coordinator::{can_delete, exit, expire_turn, join, rematch, TurnError, TurnPhase};
pub use standings::{standings, Standing, Standings};
