//! In-memory adapters for the core's storage ports. They stand in for the
//! durable repositories the original system keeps in a database; a single
//! mutex per store serializes individual load/save/delete calls. Serializing
//! a full read-modify-write action per game or player id remains the
//! caller's responsibility, as the core requires of its collaborators.

use blackjack_lib::error::{BlackjackError, Result};
use blackjack_lib::game::Game;
use blackjack_lib::player::{Player, UNSAVED_PLAYER_ID};
use blackjack_lib::store::{GameStore, PlayerStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Games keyed by their UUID string.
#[derive(Default)]
pub struct InMemoryGameStore {
    games: Mutex<HashMap<String, Game>>,
}

impl InMemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryGameStore {
    fn save(&self, game: Game) -> Result<Game> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| BlackjackError::Storage("game store lock poisoned".to_string()))?;
        games.insert(game.id().to_string(), game.clone());
        Ok(game)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Game>> {
        let games = self
            .games
            .lock()
            .map_err(|_| BlackjackError::Storage("game store lock poisoned".to_string()))?;
        Ok(games.get(id).cloned())
    }

    fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut games = self
            .games
            .lock()
            .map_err(|_| BlackjackError::Storage("game store lock poisoned".to_string()))?;
        Ok(games.remove(id).is_some())
    }
}

/// Players keyed by a sequence-assigned numeric id, like the original's
/// auto-incremented column.
pub struct InMemoryPlayerStore {
    players: Mutex<HashMap<u64, Player>>,
    next_id: AtomicU64,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        InMemoryPlayerStore {
            players: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryPlayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerStore for InMemoryPlayerStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Player>> {
        let players = self
            .players
            .lock()
            .map_err(|_| BlackjackError::Storage("player store lock poisoned".to_string()))?;
        Ok(players.values().find(|p| p.name() == name).cloned())
    }

    fn find_by_id(&self, id: u64) -> Result<Option<Player>> {
        let players = self
            .players
            .lock()
            .map_err(|_| BlackjackError::Storage("player store lock poisoned".to_string()))?;
        Ok(players.get(&id).cloned())
    }

    fn save(&self, mut player: Player) -> Result<Player> {
        if player.id() == UNSAVED_PLAYER_ID {
            player.assign_id(self.next_id.fetch_add(1, Ordering::Relaxed));
        }
        let mut players = self
            .players
            .lock()
            .map_err(|_| BlackjackError::Storage("player store lock poisoned".to_string()))?;
        players.insert(player.id(), player.clone());
        Ok(player)
    }

    fn all_ranked(&self) -> Result<Vec<Player>> {
        let players = self
            .players
            .lock()
            .map_err(|_| BlackjackError::Storage("player store lock poisoned".to_string()))?;
        let mut ranked: Vec<Player> = players.values().cloned().collect();
        ranked.sort_by(Player::ranking_cmp);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack_lib::card::{Card, Rank, Suit};
    use blackjack_lib::deck::Deck;

    fn sample_game() -> Game {
        let mut deck = Deck::stacked(vec![
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Clubs, Rank::Three),
            Card::new(Suit::Clubs, Rank::Four),
            Card::new(Suit::Clubs, Rank::Five),
        ]);
        Game::deal(1, "Joan", 10.0, &mut deck).unwrap()
    }

    #[test]
    fn test_game_store_save_find_delete() {
        let store = InMemoryGameStore::new();
        let game = store.save(sample_game()).unwrap();
        let found = store.find_by_id(game.id()).unwrap().unwrap();
        assert_eq!(found.id(), game.id());
        assert!(store.delete_by_id(game.id()).unwrap());
        assert!(store.find_by_id(game.id()).unwrap().is_none());
        assert!(!store.delete_by_id(game.id()).unwrap());
    }

    #[test]
    fn test_player_store_assigns_sequential_ids() {
        let store = InMemoryPlayerStore::new();
        let a = store.save(Player::new("a")).unwrap();
        let b = store.save(Player::new("b")).unwrap();
        assert_ne!(a.id(), UNSAVED_PLAYER_ID);
        assert_ne!(a.id(), b.id());
        // Re-saving keeps the assigned id.
        let a_again = store.save(a.clone()).unwrap();
        assert_eq!(a_again.id(), a.id());
    }

    #[test]
    fn test_player_store_find_by_name_is_exact() {
        let store = InMemoryPlayerStore::new();
        store.save(Player::new("Joan")).unwrap();
        assert!(store.find_by_name("Joan").unwrap().is_some());
        assert!(store.find_by_name("joan").unwrap().is_none());
        assert!(store.find_by_name("Joa").unwrap().is_none());
    }

    #[test]
    fn test_all_ranked_is_ordered() {
        let store = InMemoryPlayerStore::new();
        store.save(Player::new("a")).unwrap();
        store.save(Player::new("b")).unwrap();
        store.save(Player::new("c")).unwrap();
        let ranked = store.all_ranked().unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(ranked
            .windows(2)
            .all(|w| Player::ranking_cmp(&w[0], &w[1]) != std::cmp::Ordering::Greater));
    }
}
