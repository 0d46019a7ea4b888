//! Final standings shown when a game ends.

use serde::{Deserialize, Serialize};

use crate::core::player::{GamerId, Seat};
use crate::core::state::Room;
use crate::games::mangala::Mangala;
use crate::rules::GameResult;

/// One gamer's line in the standings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub seat: Seat,
    pub gamer: Option<GamerId>,
    pub treasury: usize,
}

/// Both gamers ordered by treasury size, largest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standings {
    pub entries: [Standing; 2],
    /// `None` while the game is still running.
    pub result: Option<GameResult>,
}

impl Standings {
    /// Headline using raw gamer ids.
    #[must_use]
    pub fn headline(&self) -> String {
        self.headline_with(|id| id.to_string())
    }

    /// Headline using display names resolved by `name`.
    pub fn headline_with(&self, name: impl Fn(&GamerId) -> String) -> String {
        match &self.result {
            Some(GameResult::Winner(id)) => format!("{} wins", name(id)),
            Some(GameResult::Draw) => "Draw".to_string(),
            Some(GameResult::Forfeit { exited }) => format!("{} left the game", name(exited)),
            None => "Game in progress".to_string(),
        }
    }

    /// Leading entry.
    #[must_use]
    pub fn leader(&self) -> &Standing {
        &self.entries[0]
    }
}

/// Compute standings for a room.
#[must_use]
pub fn standings(room: &Room) -> Standings {
    let mut entries = Seat::ALL.map(|seat| Standing {
        seat,
        gamer: room.gamer_id(seat).cloned(),
        treasury: room.gamer(seat).score(),
    });
    entries.sort_by(|a, b| b.treasury.cmp(&a.treasury).then(a.seat.index().cmp(&b.seat.index())));

    let result = Mangala::result(room);

    Standings { entries, result }
}
