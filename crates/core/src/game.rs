use crate::{
    rules, Card, Deck, Event, EventBus, GameConfig, Layout, Origin, Outcome, PendingPlay,
    RngState, Selection, Snapshot, GRID_SLOTS, HAND_SLOTS,
};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Grid,
    Hand,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Grid => f.write_str("grid"),
            Zone::Hand => f.write_str("hand"),
        }
    }
}

/// Why an action left the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejected {
    #[error("no card to play")]
    NoCardToPlay,
    #[error("{zone} slot {index} is empty")]
    SlotEmpty { zone: Zone, index: usize },
    #[error("{zone} slot {index} is occupied")]
    SlotOccupied { zone: Zone, index: usize },
    #[error("cannot place {play:?} onto {pile:?}")]
    RankMismatch { play: Card, pile: Option<Card> },
    #[error("a drawn card is waiting to be placed")]
    WrongPhase,
    #[error("deck is empty")]
    DeckEmpty,
    #[error("{zone} slot {index} out of range (0..{len})")]
    IndexOutOfRange { zone: Zone, index: usize, len: usize },
    #[error("game is over ({0:?})")]
    GameOver(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    Drew(Card),
    Stashed { card: Card, slot: usize },
    Selected(Selection),
    Deselected,
    Placed { card: Card, from: Origin, to: usize },
}

/// One game instance. All state is owned here; presentation code reads it
/// through [`Game::snapshot`] after each action.
#[derive(Debug, Clone)]
pub struct Game {
    rng: RngState,
    deck: Deck,
    grid: [Option<Card>; GRID_SLOTS],
    hand: [Option<Card>; HAND_SLOTS],
    current: Option<Card>,
    selection: Selection,
    outcome: Outcome,
    covered: usize,
}

impl Game {
    pub fn new(config: &GameConfig, events: &mut EventBus) -> Self {
        let mut game = Self::empty(RngState::from_option(config.seed));
        game.start_game(events);
        game
    }

    pub fn from_layout(layout: Layout, config: &GameConfig) -> Self {
        let mut game = Self::empty(RngState::from_option(config.seed));
        game.deck = Deck::from_cards(layout.deck);
        game.grid = layout.grid;
        game.hand = layout.hand;
        game.current = layout.current;
        game.covered = layout.covered;
        game.refresh_outcome(&mut EventBus::default());
        game
    }

    fn empty(rng: RngState) -> Self {
        Self {
            rng,
            deck: Deck::default(),
            grid: [None; GRID_SLOTS],
            hand: [None; HAND_SLOTS],
            current: None,
            selection: Selection::None,
            outcome: Outcome::InProgress,
            covered: 0,
        }
    }

    /// Discards everything and deals a fresh game from a newly shuffled
    /// double deck. Always succeeds, including after a win or loss.
    pub fn start_game(&mut self, events: &mut EventBus) {
        let mut deck = Deck::full();
        deck.shuffle(&mut self.rng);
        let mut grid = [None; GRID_SLOTS];
        for slot in grid.iter_mut() {
            *slot = deck.draw();
        }
        self.deck = deck;
        self.grid = grid;
        self.hand = [None; HAND_SLOTS];
        self.current = None;
        self.selection = Selection::None;
        self.outcome = Outcome::InProgress;
        self.covered = 0;
        info!(seed = self.rng.seed(), deck = self.deck.len(), "game started");
        events.push(Event::GameStarted {
            seed: self.rng.seed(),
            deck_len: self.deck.len(),
        });
    }

    pub fn draw_card(&mut self, events: &mut EventBus) -> Result<Accepted, MoveRejected> {
        self.ensure_in_progress()?;
        if self.current.is_some() {
            return Err(MoveRejected::WrongPhase);
        }
        let card = self.deck.draw().ok_or(MoveRejected::DeckEmpty)?;
        self.current = Some(card);
        self.selection = Selection::None;
        debug!(?card, remaining = self.deck.len(), "card drawn");
        events.push(Event::CardDrawn {
            card,
            remaining: self.deck.len(),
        });
        self.refresh_outcome(events);
        Ok(Accepted::Drew(card))
    }

    /// A grid gesture. Plays the pending card onto `index` when there is
    /// one, otherwise selects or deselects the pile.
    pub fn select_grid_slot(
        &mut self,
        index: usize,
        events: &mut EventBus,
    ) -> Result<Accepted, MoveRejected> {
        self.ensure_in_progress()?;
        check_index(Zone::Grid, index, GRID_SLOTS)?;
        match self.pending_play() {
            PendingPlay::FromGrid(source) if source == index => {
                Ok(self.change_selection(Selection::None, events))
            }
            PendingPlay::None => {
                if self.grid[index].is_none() {
                    return Err(MoveRejected::SlotEmpty {
                        zone: Zone::Grid,
                        index,
                    });
                }
                Ok(self.change_selection(Selection::Grid(index), events))
            }
            pending => self.play_onto(pending, index, events),
        }
    }

    /// A hand gesture. Stashes the drawn card into an empty slot, or toggles
    /// the selection of an occupied slot when nothing is drawn.
    pub fn select_hand_slot(
        &mut self,
        index: usize,
        events: &mut EventBus,
    ) -> Result<Accepted, MoveRejected> {
        self.ensure_in_progress()?;
        check_index(Zone::Hand, index, HAND_SLOTS)?;
        match (self.current, self.hand[index]) {
            (Some(card), None) => {
                self.hand[index] = Some(card);
                self.current = None;
                self.selection = Selection::None;
                debug!(?card, slot = index, "card stashed");
                events.push(Event::CardStashed { card, slot: index });
                self.refresh_outcome(events);
                Ok(Accepted::Stashed { card, slot: index })
            }
            (Some(_), Some(_)) => Err(MoveRejected::SlotOccupied {
                zone: Zone::Hand,
                index,
            }),
            (None, Some(_)) => {
                let next = if self.selection == Selection::Hand(index) {
                    Selection::None
                } else {
                    Selection::Hand(index)
                };
                Ok(self.change_selection(next, events))
            }
            (None, None) => Err(MoveRejected::SlotEmpty {
                zone: Zone::Hand,
                index,
            }),
        }
    }

    pub fn pending_play(&self) -> PendingPlay {
        if let Some(card) = self.current {
            return PendingPlay::FromDraw(card);
        }
        match self.selection {
            Selection::Hand(index) if occupied(&self.hand, index) => PendingPlay::FromHand(index),
            Selection::Grid(index) if occupied(&self.grid, index) => PendingPlay::FromGrid(index),
            _ => PendingPlay::None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            seed: self.rng.seed(),
            deck_len: self.deck.len(),
            current: self.current,
            grid: self.grid,
            hand: self.hand,
            selection: self.selection,
            outcome: self.outcome,
            covered: self.covered,
        }
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn grid(&self) -> &[Option<Card>; GRID_SLOTS] {
        &self.grid
    }

    pub fn hand(&self) -> &[Option<Card>; HAND_SLOTS] {
        &self.hand
    }

    pub fn current(&self) -> Option<Card> {
        self.current
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn play_onto(
        &mut self,
        pending: PendingPlay,
        target: usize,
        events: &mut EventBus,
    ) -> Result<Accepted, MoveRejected> {
        let (card, from) = match pending {
            PendingPlay::None => return Err(MoveRejected::NoCardToPlay),
            PendingPlay::FromDraw(card) => (card, Origin::Draw),
            PendingPlay::FromHand(index) => (
                self.hand[index].ok_or(MoveRejected::NoCardToPlay)?,
                Origin::Hand(index),
            ),
            PendingPlay::FromGrid(index) => (
                self.grid[index].ok_or(MoveRejected::NoCardToPlay)?,
                Origin::Grid(index),
            ),
        };
        let replaced = self.grid[target];
        rules::check_move(&card, replaced.as_ref())?;

        match from {
            Origin::Draw => self.current = None,
            Origin::Hand(index) => self.hand[index] = None,
            Origin::Grid(index) => self.grid[index] = None,
        }
        if replaced.is_some() {
            self.covered += 1;
        }
        self.grid[target] = Some(card);
        self.selection = Selection::None;
        debug!(?card, ?from, to = target, ?replaced, "card placed");
        events.push(Event::CardPlaced {
            card,
            from,
            to: target,
            replaced,
        });
        self.refresh_outcome(events);
        Ok(Accepted::Placed {
            card,
            from,
            to: target,
        })
    }

    fn change_selection(&mut self, selection: Selection, events: &mut EventBus) -> Accepted {
        self.selection = selection;
        debug!(?selection, "selection changed");
        events.push(Event::SelectionChanged { selection });
        match selection {
            Selection::None => Accepted::Deselected,
            other => Accepted::Selected(other),
        }
    }

    fn ensure_in_progress(&self) -> Result<(), MoveRejected> {
        if self.outcome.is_terminal() {
            Err(MoveRejected::GameOver(self.outcome))
        } else {
            Ok(())
        }
    }

    /// Latches a win or loss. Once terminal, only `start_game` clears it.
    fn refresh_outcome(&mut self, events: &mut EventBus) {
        if self.outcome.is_terminal() {
            return;
        }
        if rules::is_lost(self.current.as_ref(), &self.hand, &self.grid) {
            self.outcome = Outcome::Lost;
            if let Some(card) = self.current {
                info!(?card, "game lost");
                events.push(Event::GameLost { card });
            }
        } else if rules::is_won(self.deck.len(), self.current.as_ref(), &self.hand) {
            self.outcome = Outcome::Won;
            info!("game won");
            events.push(Event::GameWon);
        }
    }
}

fn check_index(zone: Zone, index: usize, len: usize) -> Result<(), MoveRejected> {
    if index < len {
        Ok(())
    } else {
        Err(MoveRejected::IndexOutOfRange { zone, index, len })
    }
}

fn occupied(slots: &[Option<Card>], index: usize) -> bool {
    slots.get(index).is_some_and(Option::is_some)
}
