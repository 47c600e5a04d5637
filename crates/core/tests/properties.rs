use proptest::prelude::*;
use std::collections::HashMap;
use wildpile_core::{
    Card, EventBus, Game, GameConfig, MoveRejected, Outcome, Rank, Selection, Suit, TOTAL_CARDS,
};

#[derive(Debug, Clone, Copy)]
enum Op {
    Draw,
    Grid(usize),
    Hand(usize),
    Restart,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Draw),
        5 => (0usize..12).prop_map(Op::Grid),
        3 => (0usize..7).prop_map(Op::Hand),
        1 => Just(Op::Restart),
    ]
}

fn apply(game: &mut Game, op: Op, events: &mut EventBus) -> Option<MoveRejected> {
    match op {
        Op::Draw => game.draw_card(events).err(),
        Op::Grid(index) => game.select_grid_slot(index, events).err(),
        Op::Hand(index) => game.select_hand_slot(index, events).err(),
        Op::Restart => {
            game.start_game(events);
            None
        }
    }
}

proptest! {
    #[test]
    fn cards_are_conserved_and_rejections_change_nothing(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 0..300),
    ) {
        let mut events = EventBus::default();
        let mut game = Game::new(&GameConfig::seeded(seed), &mut events);
        for op in ops {
            let before = game.snapshot();
            let rejected = apply(&mut game, op, &mut events);
            let after = game.snapshot();

            prop_assert_eq!(after.card_count(), TOTAL_CARDS);
            if after.current.is_some() {
                prop_assert_eq!(after.selection, Selection::None);
            }
            if let Some(reason) = rejected {
                prop_assert_eq!(&after, &before, "{:?} rejected with {}", op, reason);
            }
            if before.outcome.is_terminal() && !matches!(op, Op::Restart) {
                prop_assert_eq!(rejected, Some(MoveRejected::GameOver(before.outcome)));
            }
            if after.outcome == Outcome::Won {
                prop_assert_eq!(after.deck_len, 0);
                prop_assert!(after.hand.iter().all(Option::is_none));
            }
            let _ = events.drain().count();
        }
    }

    #[test]
    fn every_deal_has_the_full_composition(seed in any::<u64>()) {
        let game = Game::new(&GameConfig::seeded(seed), &mut EventBus::default());
        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in game.deck().cards.iter().chain(game.grid().iter().flatten()) {
            *counts.entry(*card).or_default() += 1;
        }
        prop_assert_eq!(counts.len(), 53);
        prop_assert_eq!(counts[&Card::wild()], 4);
        prop_assert!(counts
            .iter()
            .filter(|(card, _)| !card.is_wild())
            .all(|(_, count)| *count == 2));
    }
}

/// The first pile is the last card of the shuffled deck. Without a shuffle
/// it would always be a wild card.
#[test]
fn first_pile_is_uniform_across_seeds() {
    const GAMES: u64 = 10_800;
    let mut counts: HashMap<Card, u32> = HashMap::new();
    for seed in 0..GAMES {
        let game = Game::new(&GameConfig::seeded(seed), &mut EventBus::default());
        let first = game.grid()[0].expect("dealt");
        *counts.entry(first).or_default() += 1;
    }

    // 2/108 of games per standard card, 4/108 for wild.
    let wild = counts.get(&Card::wild()).copied().unwrap_or(0);
    assert!((300..=500).contains(&wild), "wild drawn {wild} times");
    for suit in Suit::STANDARD {
        for rank in Rank::STANDARD {
            let seen = counts
                .get(&Card::standard(suit, rank))
                .copied()
                .unwrap_or(0);
            assert!(
                (110..=290).contains(&seen),
                "{rank:?} of {suit:?} drawn {seen} times"
            );
        }
    }
}
