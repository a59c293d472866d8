//! Blackjack hand scoring with standard soft/hard Ace resolution.

use crate::card::Card;

/// Calculates the blackjack total of a hand. Every Ace starts at 11; while
/// the total exceeds 21 and an Ace is still counted as 11, one Ace is
/// recounted as 1.
pub fn score_of(cards: &[Card]) -> u8 {
    let mut total: u8 = 0;
    let mut aces = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += card.value();
    }

    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }

    total
}

/// A natural blackjack: exactly two cards totaling 21.
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && score_of(cards) == 21
}
