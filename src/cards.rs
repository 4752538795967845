//! The one capability with no network call: a uniform draw from a
//! standard 52-card deck.

use rand::seq::SliceRandom;
use rand::Rng;

pub const SUITS: [&str; 4] = ["Hearts", "Diamonds", "Clubs", "Spades"];

pub const RANKS: [&str; 13] = [
    "2", "3", "4", "5", "6", "7", "8", "9", "10", "Jack", "Queen", "King", "Ace",
];

/// Draws one card using the supplied rng.
pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> String {
    // choose on a non-empty array cannot fail
    let suit = SUITS.choose(rng).unwrap_or(&SUITS[0]);
    let rank = RANKS.choose(rng).unwrap_or(&RANKS[0]);
    format!("{} of {}", rank, suit)
}

/// Draws one card from the thread-local rng.
pub fn random_card() -> String {
    draw(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn is_valid_card(card: &str) -> bool {
        let Some((rank, suit)) = card.split_once(" of ") else {
            return false;
        };
        RANKS.contains(&rank) && SUITS.contains(&suit)
    }

    #[test]
    fn every_draw_is_a_valid_card() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let card = draw(&mut rng);
            assert!(is_valid_card(&card), "invalid card: {card}");
        }
    }

    #[test]
    fn large_sample_covers_the_whole_deck_roughly_uniformly() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<String, u32> = HashMap::new();
        let draws = 52_000;

        for _ in 0..draws {
            *counts.entry(draw(&mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 52);
        // expectation is 1000 per card; allow a wide band
        for (card, count) in &counts {
            assert!(
                (500..=2_000).contains(count),
                "card {card} drawn {count} times"
            );
        }
    }

    #[test]
    fn thread_rng_wrapper_produces_valid_cards() {
        for _ in 0..100 {
            assert!(is_valid_card(&random_card()));
        }
    }
}
