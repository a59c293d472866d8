//! Core blackjack engine: deck construction and dealing, hand scoring with
//! soft-ace resolution, the game state machine with dealer auto-play and
//! payout computation, and the player ledger that folds completed games into
//! cumulative stats. The network layer and persistent storage are external
//! collaborators reached through the traits in `store`.

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod player;
pub mod store;

pub mod prelude {
    pub use crate::card::{Card, Rank, Suit};
    pub use crate::deck::{CardSource, Deck, Shoe};
    pub use crate::error::{BlackjackError, Result};
    pub use crate::game::{Action, Game, Outcome};
    pub use crate::hand::{is_blackjack, score_of};
    pub use crate::player::Player;
    pub use crate::store::{GameStore, PlayerStore};
}

pub use prelude::*;
