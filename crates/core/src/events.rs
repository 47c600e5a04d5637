use crate::{Card, Origin, Selection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    GameStarted {
        seed: u64,
        deck_len: usize,
    },
    CardDrawn {
        card: Card,
        remaining: usize,
    },
    CardStashed {
        card: Card,
        slot: usize,
    },
    CardPlaced {
        card: Card,
        from: Origin,
        to: usize,
        replaced: Option<Card>,
    },
    SelectionChanged {
        selection: Selection,
    },
    GameWon,
    GameLost {
        card: Card,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
