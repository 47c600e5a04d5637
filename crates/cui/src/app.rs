use crate::script::ScriptAction;
use std::collections::VecDeque;
use tracing::debug;
use wildpile_core::{
    Accepted, Card, Event, EventBus, Game, GameConfig, MoveRejected, Origin, Outcome, Rank,
    Selection, Suit, GRID_SLOTS, HAND_SLOTS, TOTAL_CARDS,
};

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Grid,
    Hand,
}

pub struct App {
    pub game: Game,
    pub events: EventBus,
    pub focus: FocusPane,
    pub grid_cursor: usize,
    pub hand_cursor: usize,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &GameConfig) -> Self {
        let mut events = EventBus::default();
        let game = Game::new(config, &mut events);
        let mut app = Self {
            game,
            events,
            focus: FocusPane::Grid,
            grid_cursor: 0,
            hand_cursor: 0,
            event_log: VecDeque::new(),
            status_line: "ready".to_string(),
            show_help: false,
            should_quit: false,
        };
        app.flush_events();
        app
    }

    pub fn focus_label(&self, pane: FocusPane) -> &'static str {
        match pane {
            FocusPane::Grid => "Grid",
            FocusPane::Hand => "Hand",
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPane::Grid => FocusPane::Hand,
            FocusPane::Hand => FocusPane::Grid,
        };
    }

    pub fn move_cursor(&mut self, down: bool) {
        match self.focus {
            FocusPane::Grid => move_index(&mut self.grid_cursor, GRID_SLOTS, down),
            FocusPane::Hand => move_index(&mut self.hand_cursor, HAND_SLOTS, down),
        }
    }

    /// Enter/space: restart after a finished game, otherwise act on the
    /// slot under the cursor in the focused pane.
    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.game.outcome().is_terminal() {
            self.restart();
            return;
        }
        match self.focus {
            FocusPane::Grid => self.select_grid(self.grid_cursor),
            FocusPane::Hand => self.select_hand(self.hand_cursor),
        }
    }

    pub fn close_overlay(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.game.outcome().is_terminal() {
            self.restart();
        }
    }

    pub fn draw(&mut self) {
        self.perform(ScriptAction::Draw);
    }

    pub fn select_grid(&mut self, index: usize) {
        self.grid_cursor = index.min(GRID_SLOTS - 1);
        self.focus = FocusPane::Grid;
        self.perform(ScriptAction::Grid { index });
    }

    pub fn select_hand(&mut self, index: usize) {
        self.hand_cursor = index.min(HAND_SLOTS - 1);
        self.focus = FocusPane::Hand;
        self.perform(ScriptAction::Hand { index });
    }

    pub fn restart(&mut self) {
        self.perform(ScriptAction::Restart);
    }

    /// Replays a script before the terminal takes over. Stops at the first
    /// rejected action.
    pub fn auto_perform_actions(&mut self, actions: &[ScriptAction]) -> Result<(), String> {
        for (step, action) in actions.iter().enumerate() {
            if let Err(err) = action.apply(&mut self.game, &mut self.events) {
                self.flush_events();
                return Err(format!("step {step} ({action}) rejected: {err}"));
            }
        }
        self.flush_events();
        self.push_status(format!("replayed {} actions", actions.len()));
        Ok(())
    }

    fn perform(&mut self, action: ScriptAction) {
        debug!(%action, "ui action");
        match action.apply(&mut self.game, &mut self.events) {
            Ok(Some(accepted)) => self.push_status(describe_accepted(&accepted)),
            Ok(None) => self.push_status("new game"),
            Err(err) => self.push_rejection(err),
        }
        self.flush_events();
    }

    pub fn next_hint(&self) -> String {
        match self.game.outcome() {
            Outcome::Won => return "you win, press r for a new game".to_string(),
            Outcome::Lost => return "game over, press r to restart".to_string(),
            Outcome::InProgress => {}
        }
        if self.game.current().is_some() {
            return "place the drawn card on a pile or an empty hand slot".to_string();
        }
        match self.game.selection() {
            Selection::Hand(index) => format!("choose a pile for hand card {index}"),
            Selection::Grid(index) => format!("choose a pile for the card from pile {index}"),
            Selection::None if !self.game.deck().is_empty() => {
                "draw a card or pick a card to move".to_string()
            }
            Selection::None => "play out your hand".to_string(),
        }
    }

    pub fn outcome_message(&self) -> Option<(&'static str, String)> {
        match self.game.outcome() {
            Outcome::InProgress => None,
            Outcome::Won => Some((
                "You Win!",
                format!("Congratulations! You successfully placed all {TOTAL_CARDS} cards."),
            )),
            Outcome::Lost => Some((
                "Game Over",
                "Your hand is full and you have no valid moves for the drawn card.".to_string(),
            )),
        }
    }

    pub fn grid_label(&self, index: usize) -> String {
        let marker = if self.game.selection() == Selection::Grid(index) {
            "*"
        } else {
            " "
        };
        format!("{marker} {index}: {}", slot_text(self.game.grid()[index]))
    }

    pub fn hand_label(&self, index: usize) -> String {
        let marker = if self.game.selection() == Selection::Hand(index) {
            "*"
        } else {
            " "
        };
        format!(
            "{marker} F{}: {}",
            index + 1,
            slot_text(self.game.hand()[index])
        )
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    pub fn push_rejection(&mut self, err: MoveRejected) {
        self.status_line = format!("no move: {err}");
    }

    fn flush_events(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let drained: Vec<_> = self.events.drain().collect();
        for event in drained {
            self.push_event_line(format_event(&event));
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}

fn describe_accepted(accepted: &Accepted) -> String {
    match accepted {
        Accepted::Drew(card) => format!("drew {}", format_card(card)),
        Accepted::Stashed { card, slot } => format!("kept {} in hand slot {slot}", format_card(card)),
        Accepted::Selected(Selection::Hand(index)) => format!("selected hand slot {index}"),
        Accepted::Selected(Selection::Grid(index)) => format!("selected pile {index}"),
        Accepted::Selected(Selection::None) | Accepted::Deselected => "selection cleared".to_string(),
        Accepted::Placed { card, to, .. } => format!("placed {} on pile {to}", format_card(card)),
    }
}

fn format_origin(origin: &Origin) -> String {
    match origin {
        Origin::Draw => "draw".to_string(),
        Origin::Hand(index) => format!("hand {index}"),
        Origin::Grid(index) => format!("pile {index}"),
    }
}

pub fn format_event(event: &Event) -> String {
    match event {
        Event::GameStarted { seed, deck_len } => {
            format!("new game (seed {seed}), {deck_len} cards in deck")
        }
        Event::CardDrawn { card, remaining } => {
            format!("drew {} ({remaining} left)", format_card(card))
        }
        Event::CardStashed { card, slot } => format!("{} -> hand {slot}", format_card(card)),
        Event::CardPlaced {
            card,
            from,
            to,
            replaced,
        } => match replaced {
            Some(under) => format!(
                "{} from {} -> pile {to} over {}",
                format_card(card),
                format_origin(from),
                format_card(under)
            ),
            None => format!(
                "{} from {} -> pile {to}",
                format_card(card),
                format_origin(from)
            ),
        },
        Event::SelectionChanged { selection } => match selection {
            Selection::None => "selection cleared".to_string(),
            Selection::Hand(index) => format!("selected hand {index}"),
            Selection::Grid(index) => format!("selected pile {index}"),
        },
        Event::GameWon => "all cards placed, you win".to_string(),
        Event::GameLost { card } => format!("no place for {}, game over", format_card(card)),
    }
}

pub fn slot_text(card: Option<Card>) -> String {
    card.map(|card| format_card(&card))
        .unwrap_or_else(|| "--".to_string())
}

pub fn format_card(card: &Card) -> String {
    if card.is_wild() {
        return "FREE".to_string();
    }
    format!("{}{}", rank_short(card.rank), suit_short(card.suit))
}

fn rank_short(rank: Rank) -> &'static str {
    match rank {
        Rank::Ace => "A",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Wild => "*",
    }
}

fn suit_short(suit: Suit) -> &'static str {
    match suit {
        Suit::Clubs => "♣",
        Suit::Diamonds => "♦",
        Suit::Hearts => "♥",
        Suit::Spades => "♠",
        Suit::Wild => "*",
    }
}
