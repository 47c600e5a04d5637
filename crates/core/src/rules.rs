//! Placement and terminal-state rules. Pure functions over zone contents.

use crate::{Card, MoveRejected, Rank};

/// Whether `play` may be put on a pile whose visible card is `pile`.
///
/// Empty piles take anything, wild cards match anything in either
/// direction, and otherwise ranks must be adjacent with King and Ace
/// wrapping around.
pub fn is_valid_move(play: &Card, pile: Option<&Card>) -> bool {
    let Some(pile) = pile else {
        return true;
    };
    if play.is_wild() || pile.is_wild() {
        return true;
    }
    let play = play.value();
    let pile = pile.value();
    play == pile + 1
        || play + 1 == pile
        || (pile == Rank::King.value() && play == Rank::Ace.value())
        || (pile == Rank::Ace.value() && play == Rank::King.value())
}

pub fn check_move(play: &Card, pile: Option<&Card>) -> Result<(), MoveRejected> {
    if is_valid_move(play, pile) {
        Ok(())
    } else {
        Err(MoveRejected::RankMismatch {
            play: *play,
            pile: pile.copied(),
        })
    }
}

pub fn accepts_anywhere(card: &Card, grid: &[Option<Card>]) -> bool {
    grid.iter().any(|pile| is_valid_move(card, pile.as_ref()))
}

/// A drawn card with a full hand and nowhere to go on the grid.
pub fn is_lost(current: Option<&Card>, hand: &[Option<Card>], grid: &[Option<Card>]) -> bool {
    let Some(card) = current else {
        return false;
    };
    hand.iter().all(Option::is_some) && !accepts_anywhere(card, grid)
}

/// Nothing left outside the grid. Grid contents do not matter.
pub fn is_won(deck_len: usize, current: Option<&Card>, hand: &[Option<Card>]) -> bool {
    deck_len == 0 && current.is_none() && hand.iter().all(Option::is_none)
}
