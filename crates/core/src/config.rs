use serde::{Deserialize, Serialize};

pub const GRID_SLOTS: usize = 10;
pub const HAND_SLOTS: usize = 5;
pub const DECK_COPIES: usize = 2;
pub const WILD_CARDS: usize = 4;
pub const STANDARD_DECK: usize = 52;
pub const TOTAL_CARDS: usize = DECK_COPIES * STANDARD_DECK + WILD_CARDS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed shuffle seed. `None` draws one from OS entropy when the game is
    /// created; restarts keep consuming the same generator either way.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}
