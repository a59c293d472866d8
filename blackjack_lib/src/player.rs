//! The player ledger: aggregate stats folded from completed games, and the
//! ordering that drives the ranking.

use crate::error::BlackjackError;
use crate::game::Game;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The id an unsaved player carries until a store assigns one.
pub const UNSAVED_PLAYER_ID: u64 = 0;

/// A player's cumulative record across completed games. Counters only ever
/// grow; `win_rate` is always recomputed from them, never set independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    id: u64,
    name: String,
    games_played: u32,
    games_won: u32,
    total_winnings: f64,
    win_rate: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Player {
    /// A fresh player with zeroed counters, created lazily on first game.
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Player {
            id: UNSAVED_PLAYER_ID,
            name: name.to_string(),
            games_played: 0,
            games_won: 0,
            total_winnings: 0.0,
            win_rate: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Folds one completed game into the stats: every game bumps
    /// `games_played`; a win for the player also bumps `games_won` and
    /// accrues the outcome's fixed award (1.5 for a blackjack, 1.0 for an
    /// ordinary win) to `total_winnings`.
    ///
    /// Panics if the game is still in progress; asking the ledger to fold an
    /// unfinished game is a caller bug, not a recoverable condition.
    pub fn record_outcome(&mut self, game: &Game) {
        assert!(
            game.status().is_terminal(),
            "cannot record an in-progress game"
        );

        self.games_played += 1;
        if game.status().is_player_win() {
            self.games_won += 1;
            self.total_winnings += game.status().ledger_award();
        }
        self.win_rate = Self::round2(f64::from(self.games_won) / f64::from(self.games_played) * 100.0);
        self.updated_at = Utc::now();
    }

    /// Replaces the player's name. Fails with `InvalidInput` on an empty
    /// name.
    pub fn rename(&mut self, new_name: &str) -> Result<(), BlackjackError> {
        if new_name.trim().is_empty() {
            return Err(BlackjackError::InvalidInput(
                "player name is required".to_string(),
            ));
        }
        self.name = new_name.to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The ranking order: descending win rate, ties broken by descending
    /// total winnings.
    pub fn ranking_cmp(a: &Player, b: &Player) -> Ordering {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then(b.total_winnings.total_cmp(&a.total_winnings))
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Used by stores when persisting a previously unsaved player.
    pub fn assign_id(&mut self, id: u64) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn games_won(&self) -> u32 {
        self.games_won
    }

    pub fn total_winnings(&self) -> f64 {
        self.total_winnings
    }

    pub fn win_rate(&self) -> f64 {
        self.win_rate
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
