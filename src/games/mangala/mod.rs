//! Mangala: two rows of six pits, two treasuries, sow and capture.
//!
//! - Each gamer starts with six pits of four stones
//! - On your turn: lift one of your pits and sow it around the board
//! - Land the last stone in your treasury to move again
//! - Capture opponent pits you make even, or a facing pit when your last stone
//!   lands alone in one of your own pits
//! - The game ends when either row is empty; the larger treasury wins

mod game;

pub use game::{Mangala, MangalaBuilder};
