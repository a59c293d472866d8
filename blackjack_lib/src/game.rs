//! The game engine: one `Game` aggregate, its outcome state machine, and the
//! hit/stand rules. A game is dealt, mutated in place by actions while it is
//! in progress, and frozen once it reaches a terminal outcome.

use crate::card::Card;
use crate::deck::CardSource;
use crate::error::BlackjackError;
use crate::hand::{is_blackjack, score_of};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome state machine. `InProgress` is the only non-terminal state;
/// every other variant freezes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    InProgress,
    PlayerBlackjack,
    PlayerBust,
    PlayerWin,
    DealerBust,
    DealerWin,
    Push,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Whether the outcome counts as a win for the player.
    pub fn is_player_win(&self) -> bool {
        matches!(
            self,
            Outcome::PlayerBlackjack | Outcome::PlayerWin | Outcome::DealerBust
        )
    }

    /// The bet-scaled payout policy: a game's `winnings` is
    /// `bet * bet_multiplier()`. Blackjack pays 3:2, ordinary wins even
    /// money, losses forfeit the bet, a push returns it.
    pub fn bet_multiplier(&self) -> f64 {
        match self {
            Outcome::InProgress => 0.0,
            Outcome::PlayerBlackjack => 1.5,
            Outcome::PlayerBust => -1.0,
            Outcome::PlayerWin => 1.0,
            Outcome::DealerBust => 1.0,
            Outcome::DealerWin => -1.0,
            Outcome::Push => 0.0,
        }
    }

    /// The fixed amount the player ledger accrues per completed game,
    /// independent of the stake. Diverges from `bet_multiplier` on purpose;
    /// see DESIGN.md.
    pub fn ledger_award(&self) -> f64 {
        match self {
            Outcome::PlayerBlackjack => 1.5,
            Outcome::PlayerWin | Outcome::DealerBust => 1.0,
            _ => 0.0,
        }
    }
}

/// A player's move in an in-progress game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Hit,
    Stand,
}

/// The aggregate root for one play session. Scores are derived from the card
/// lists and recomputed after every card dealt, never cached across a
/// mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    id: String,
    player_id: u64,
    player_name: String,
    player_cards: Vec<Card>,
    dealer_cards: Vec<Card>,
    player_score: u8,
    dealer_score: u8,
    status: Outcome,
    bet: f64,
    winnings: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Game {
    /// Creates a game and deals the opening hands: one card to the player,
    /// one to the dealer, one to the player, one to the dealer. An opening
    /// two-card 21 is a natural blackjack and ends the game immediately.
    ///
    /// Fails with `InvalidInput` on a non-positive bet or an empty player
    /// name.
    pub fn deal(
        player_id: u64,
        player_name: &str,
        bet: f64,
        cards: &mut impl CardSource,
    ) -> Result<Game, BlackjackError> {
        if bet.is_nan() || bet <= 0.0 {
            return Err(BlackjackError::InvalidInput(
                "bet must be a positive amount".to_string(),
            ));
        }
        if player_name.trim().is_empty() {
            return Err(BlackjackError::InvalidInput(
                "player name is required".to_string(),
            ));
        }

        let now = Utc::now();
        let mut game = Game {
            id: Uuid::new_v4().to_string(),
            player_id,
            player_name: player_name.to_string(),
            player_cards: Vec::new(),
            dealer_cards: Vec::new(),
            player_score: 0,
            dealer_score: 0,
            status: Outcome::InProgress,
            bet,
            winnings: 0.0,
            created_at: now,
            updated_at: now,
        };

        // Strict alternation, player first.
        game.player_cards.push(cards.next_card());
        game.dealer_cards.push(cards.next_card());
        game.player_cards.push(cards.next_card());
        game.dealer_cards.push(cards.next_card());
        game.player_score = score_of(&game.player_cards);
        game.dealer_score = score_of(&game.dealer_cards);

        if is_blackjack(&game.player_cards) {
            game.finish(Outcome::PlayerBlackjack);
        }

        Ok(game)
    }

    /// Applies a HIT or STAND to an in-progress game, drawing any cards it
    /// needs from `cards`. Fails with `InvalidState` on a terminal game,
    /// leaving it unmodified.
    pub fn apply(&mut self, action: Action, cards: &mut impl CardSource) -> Result<(), BlackjackError> {
        if self.status != Outcome::InProgress {
            return Err(BlackjackError::InvalidState(
                "game is not in progress".to_string(),
            ));
        }

        match action {
            Action::Hit => {
                self.player_cards.push(cards.next_card());
                self.player_score = score_of(&self.player_cards);
                self.updated_at = Utc::now();
                if self.player_score > 21 {
                    self.finish(Outcome::PlayerBust);
                }
            }
            Action::Stand => {
                // Dealer auto-play: draw until 17 or more, then stand. A
                // dealer total of exactly 17 never draws further.
                while self.dealer_score < 17 {
                    self.dealer_cards.push(cards.next_card());
                    self.dealer_score = score_of(&self.dealer_cards);
                }
                self.finish(self.resolve_stand());
            }
        }

        Ok(())
    }

    /// The outcome of a finished round: dealer bust beats everything, then
    /// the higher score wins, equal scores push. A 21 the player reached by
    /// hitting resolves here as an ordinary score, not a blackjack.
    fn resolve_stand(&self) -> Outcome {
        if self.dealer_score > 21 {
            Outcome::DealerBust
        } else if self.player_score > self.dealer_score {
            Outcome::PlayerWin
        } else if self.dealer_score > self.player_score {
            Outcome::DealerWin
        } else {
            Outcome::Push
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.status = outcome;
        self.winnings = self.bet * outcome.bet_multiplier();
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn player_id(&self) -> u64 {
        self.player_id
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn player_cards(&self) -> &[Card] {
        &self.player_cards
    }

    pub fn dealer_cards(&self) -> &[Card] {
        &self.dealer_cards
    }

    pub fn player_score(&self) -> u8 {
        self.player_score
    }

    pub fn dealer_score(&self) -> u8 {
        self.dealer_score
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn winnings(&self) -> f64 {
        self.winnings
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
