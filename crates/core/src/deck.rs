use crate::{Card, Rank, RngState, Suit, DECK_COPIES, STANDARD_DECK, TOTAL_CARDS, WILD_CARDS};
use serde::{Deserialize, Serialize};

/// Undrawn cards. The top of the deck is the last element.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK);
        for suit in Suit::STANDARD {
            for rank in Rank::STANDARD {
                cards.push(Card::standard(suit, rank));
            }
        }
        Self { cards }
    }

    /// Two standard decks followed by the wild cards, unshuffled.
    pub fn full() -> Self {
        let mut cards = Vec::with_capacity(TOTAL_CARDS);
        for _ in 0..DECK_COPIES {
            cards.extend(Self::standard52().cards);
        }
        cards.extend(std::iter::repeat(Card::wild()).take(WILD_CARDS));
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn full_deck_has_two_copies_and_four_wilds() {
        let deck = Deck::full();
        assert_eq!(deck.len(), TOTAL_CARDS);
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in &deck.cards {
            *counts.entry(*card).or_default() += 1;
        }
        assert_eq!(counts.len(), 53);
        assert_eq!(counts[&Card::wild()], 4);
        assert_eq!(counts[&Card::standard(Suit::Hearts, Rank::Queen)], 2);
    }

    #[test]
    fn draw_pops_from_the_top() {
        let mut deck = Deck::from_cards(vec![
            Card::standard(Suit::Clubs, Rank::Two),
            Card::standard(Suit::Clubs, Rank::Three),
        ]);
        assert_eq!(deck.draw(), Some(Card::standard(Suit::Clubs, Rank::Three)));
        assert_eq!(deck.draw(), Some(Card::standard(Suit::Clubs, Rank::Two)));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn shuffle_is_reproducible_per_seed() {
        let mut a = Deck::full();
        let mut b = Deck::full();
        a.shuffle(&mut RngState::from_seed(7));
        b.shuffle(&mut RngState::from_seed(7));
        assert_eq!(a, b);
        assert_ne!(a, Deck::full());
    }
}
