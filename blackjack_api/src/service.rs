//! The game and player services: they drive the core engine per request and
//! feed completed games into the player ledger. Each operation attempts at
//! most one write per store, so state is never silently re-derived after a
//! partial failure.

use blackjack_lib::deck::{Deck, Shoe};
use blackjack_lib::error::{BlackjackError, Result};
use blackjack_lib::game::{Action, Game};
use blackjack_lib::player::Player;
use blackjack_lib::store::{GameStore, PlayerStore};
use std::sync::Arc;
use tracing::{error, info};

/// Ledger-facing operations over the player store.
pub struct PlayerService<P: PlayerStore> {
    store: P,
}

impl<P: PlayerStore> PlayerService<P> {
    pub fn new(store: P) -> Self {
        PlayerService { store }
    }

    /// Returns the player matching `name` exactly, creating a zeroed one on
    /// first sight.
    pub fn find_or_create(&self, name: &str) -> Result<Player> {
        if name.trim().is_empty() {
            return Err(BlackjackError::InvalidInput(
                "player name is required".to_string(),
            ));
        }
        if let Some(player) = self.store.find_by_name(name)? {
            return Ok(player);
        }
        info!("creating new player: {}", name);
        self.store.save(Player::new(name))
    }

    pub fn update_name(&self, id: u64, new_name: &str) -> Result<Player> {
        info!("updating name of player {} to {}", id, new_name);
        let mut player = self
            .store
            .find_by_id(id)?
            .ok_or(BlackjackError::PlayerNotFound(id))?;
        player.rename(new_name)?;
        self.store.save(player)
    }

    /// Folds a completed game into the owning player's stats. In-progress
    /// games are skipped, so the ledger's terminality precondition can only
    /// be violated by a bug, never by this path.
    pub fn record_game(&self, game: &Game) -> Result<()> {
        if !game.status().is_terminal() {
            return Ok(());
        }
        let id = game.player_id();
        let mut player = self
            .store
            .find_by_id(id)?
            .ok_or(BlackjackError::PlayerNotFound(id))?;
        player.record_outcome(game);
        info!(
            "recorded {:?} for player {}: {} games, {}% win rate",
            game.status(),
            player.name(),
            player.games_played(),
            player.win_rate()
        );
        self.store.save(player)?;
        Ok(())
    }

    /// All players, best ranked first.
    pub fn ranking(&self) -> Result<Vec<Player>> {
        self.store.all_ranked()
    }
}

/// Per-game operations: create, fetch, play, delete.
pub struct GameService<G: GameStore, P: PlayerStore> {
    store: G,
    players: Arc<PlayerService<P>>,
}

impl<G: GameStore, P: PlayerStore> GameService<G, P> {
    pub fn new(store: G, players: Arc<PlayerService<P>>) -> Self {
        GameService { store, players }
    }

    /// Creates a game for the named player (creating the player if needed),
    /// deals the opening hands from a freshly shuffled deck, and persists the
    /// result.
    pub fn create_game(&self, player_name: &str, bet: f64) -> Result<Game> {
        info!("creating new game for player: {}", player_name);
        let player = self.players.find_or_create(player_name)?;
        let mut deck = Deck::shuffled(&mut rand::thread_rng());
        let game = Game::deal(player.id(), player.name(), bet, &mut deck)?;
        let game = self.store.save(game)?;
        if game.status().is_terminal() {
            // A natural blackjack ends the game at the deal.
            self.players.record_game(&game)?;
        }
        Ok(game)
    }

    pub fn get_game(&self, id: &str) -> Result<Game> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| BlackjackError::GameNotFound(id.to_string()))
    }

    /// Applies one HIT or STAND to the game, persists it, and feeds the
    /// outcome to the ledger if the game just finished.
    pub fn play(&self, id: &str, action: Action) -> Result<Game> {
        let mut game = self.get_game(id)?;
        let mut shoe = Shoe::new(rand::thread_rng());
        if let Err(e) = game.apply(action, &mut shoe) {
            error!("rejected {:?} on game {}: {}", action, id, e);
            return Err(e);
        }
        let game = self.store.save(game)?;
        self.players.record_game(&game)?;
        Ok(game)
    }

    pub fn delete_game(&self, id: &str) -> Result<()> {
        info!("deleting game: {}", id);
        if self.store.delete_by_id(id)? {
            Ok(())
        } else {
            Err(BlackjackError::GameNotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryGameStore, InMemoryPlayerStore};
    use blackjack_lib::game::Outcome;

    fn services() -> (
        GameService<InMemoryGameStore, InMemoryPlayerStore>,
        Arc<PlayerService<InMemoryPlayerStore>>,
    ) {
        let players = Arc::new(PlayerService::new(InMemoryPlayerStore::new()));
        let games = GameService::new(InMemoryGameStore::new(), players.clone());
        (games, players)
    }

    #[test]
    fn test_create_game_deals_two_cards_each() {
        let (games, players) = services();
        let game = games.create_game("Joan", 10.0).unwrap();
        assert_eq!(game.player_cards().len(), 2);
        assert_eq!(game.dealer_cards().len(), 2);
        assert_eq!(game.bet(), 10.0);
        // The player was created lazily.
        let player = players.find_or_create("Joan").unwrap();
        assert_eq!(player.id(), game.player_id());
    }

    #[test]
    fn test_create_game_rejects_bad_input() {
        let (games, _) = services();
        assert!(matches!(
            games.create_game("", 10.0),
            Err(BlackjackError::InvalidInput(_))
        ));
        assert!(matches!(
            games.create_game("Joan", -1.0),
            Err(BlackjackError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_get_game_not_found() {
        let (games, _) = services();
        assert!(matches!(
            games.get_game("missing"),
            Err(BlackjackError::GameNotFound(_))
        ));
    }

    #[test]
    fn test_play_on_finished_game_is_invalid_state() {
        let (games, _) = services();
        let game = games.create_game("Joan", 10.0).unwrap();
        // Standing always terminates the game; the deal may already have
        // ended it with a natural blackjack.
        let finished = if game.status() == Outcome::InProgress {
            games.play(game.id(), Action::Stand).unwrap()
        } else {
            game
        };
        assert!(finished.status().is_terminal());
        assert!(matches!(
            games.play(finished.id(), Action::Hit),
            Err(BlackjackError::InvalidState(_))
        ));
    }

    #[test]
    fn test_finished_game_reaches_the_ledger() {
        let (games, players) = services();
        let game = games.create_game("Joan", 10.0).unwrap();
        if game.status() == Outcome::InProgress {
            games.play(game.id(), Action::Stand).unwrap();
        }
        let ranking = players.ranking().unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].games_played(), 1);
        assert!(ranking[0].games_won() <= ranking[0].games_played());
    }

    #[test]
    fn test_two_games_same_name_share_one_player() {
        let (games, players) = services();
        let a = games.create_game("Joan", 10.0).unwrap();
        let b = games.create_game("Joan", 20.0).unwrap();
        assert_eq!(a.player_id(), b.player_id());
        assert_eq!(players.ranking().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_game() {
        let (games, _) = services();
        let game = games.create_game("Joan", 10.0).unwrap();
        games.delete_game(game.id()).unwrap();
        assert!(matches!(
            games.get_game(game.id()),
            Err(BlackjackError::GameNotFound(_))
        ));
        assert!(matches!(
            games.delete_game(game.id()),
            Err(BlackjackError::GameNotFound(_))
        ));
    }

    #[test]
    fn test_update_name() {
        let (games, players) = services();
        let game = games.create_game("Joan", 10.0).unwrap();
        let renamed = players.update_name(game.player_id(), "Meritxell").unwrap();
        assert_eq!(renamed.name(), "Meritxell");
        assert!(matches!(
            players.update_name(9999, "x"),
            Err(BlackjackError::PlayerNotFound(_))
        ));
        assert!(matches!(
            players.update_name(game.player_id(), "  "),
            Err(BlackjackError::InvalidInput(_))
        ));
    }
}
