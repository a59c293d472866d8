//! The playing card value types. A `Card` is a plain `(suit, rank)` pair that
//! is cheap to copy; its blackjack base value treats every Ace as 11, the
//! downgrade to 1 is the hand scorer's job.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits in a fixed order, used when building a full deck.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All thirteen ranks in a fixed order, used when building a full deck.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];
}

/// A single playing card. Plain value type, copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    /// The card's base blackjack value: numeric rank for 2-10, 10 for face
    /// cards, 11 for an Ace.
    pub fn value(&self) -> u8 {
        match self.rank {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank = match self.rank {
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
            Rank::Ace => "A",
        };
        let suit = match self.suit {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
        };
        write!(f, "{}{}", rank, suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_card_values() {
        assert_eq!(Card::new(Suit::Clubs, Rank::Two).value(), 2);
        assert_eq!(Card::new(Suit::Hearts, Rank::Nine).value(), 9);
        assert_eq!(Card::new(Suit::Spades, Rank::Ten).value(), 10);
    }

    #[test]
    fn test_face_cards_are_worth_ten() {
        assert_eq!(Card::new(Suit::Diamonds, Rank::Jack).value(), 10);
        assert_eq!(Card::new(Suit::Diamonds, Rank::Queen).value(), 10);
        assert_eq!(Card::new(Suit::Diamonds, Rank::King).value(), 10);
    }

    #[test]
    fn test_ace_base_value_is_eleven() {
        let ace = Card::new(Suit::Spades, Rank::Ace);
        assert_eq!(ace.value(), 11);
        assert!(ace.is_ace());
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Spades, Rank::Ace).to_string(), "A♠");
        assert_eq!(Card::new(Suit::Hearts, Rank::Ten).to_string(), "10♥");
    }

    #[test]
    fn test_serde_wire_format() {
        let card = Card::new(Suit::Hearts, Rank::Queen);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, r#"{"suit":"HEARTS","rank":"QUEEN"}"#);
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
