use crate::{Card, GRID_SLOTS, HAND_SLOTS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Hand(usize),
    Grid(usize),
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// The card the next grid gesture would move, resolved once per gesture.
/// Precedence is current card, then hand selection, then grid selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPlay {
    None,
    FromDraw(Card),
    FromHand(usize),
    FromGrid(usize),
}

impl PendingPlay {
    pub fn origin(self) -> Option<Origin> {
        match self {
            PendingPlay::None => None,
            PendingPlay::FromDraw(_) => Some(Origin::Draw),
            PendingPlay::FromHand(index) => Some(Origin::Hand(index)),
            PendingPlay::FromGrid(index) => Some(Origin::Grid(index)),
        }
    }
}

/// Where a placed card came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Origin {
    Draw,
    Hand(usize),
    Grid(usize),
}

/// Read-only view handed to presentation code after every action.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Snapshot {
    pub seed: u64,
    pub deck_len: usize,
    pub current: Option<Card>,
    pub grid: [Option<Card>; GRID_SLOTS],
    pub hand: [Option<Card>; HAND_SLOTS],
    pub selection: Selection,
    pub outcome: Outcome,
    /// Cards buried under a pile's visible card by placements.
    pub covered: usize,
}

impl Snapshot {
    /// Cards in every zone, buried pile cards included. Stays at the full
    /// deck size for a dealt game.
    pub fn card_count(&self) -> usize {
        self.deck_len
            + self.covered
            + usize::from(self.current.is_some())
            + self.hand.iter().flatten().count()
            + self.grid.iter().flatten().count()
    }
}

/// An arbitrary position, used to set up specific situations without
/// playing a game into them. `deck` is ordered bottom to top.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Layout {
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub grid: [Option<Card>; GRID_SLOTS],
    #[serde(default)]
    pub hand: [Option<Card>; HAND_SLOTS],
    #[serde(default)]
    pub current: Option<Card>,
    #[serde(default)]
    pub covered: usize,
}
