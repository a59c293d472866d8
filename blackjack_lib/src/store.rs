//! The abstract storage operations the core consumes from its collaborators.
//! The engine and ledger never depend on how these are implemented; the
//! service layer supplies adapters (in-memory here, a database elsewhere).
//!
//! Callers must serialize concurrent mutations per game id and per player id
//! themselves; the core assumes exclusive access for the duration of one
//! operation.

use crate::error::Result;
use crate::game::Game;
use crate::player::Player;

/// Durable (from the core's point of view) game records.
pub trait GameStore {
    /// Persists the game, returning the stored value.
    fn save(&self, game: Game) -> Result<Game>;

    /// Looks a game up by id.
    fn find_by_id(&self, id: &str) -> Result<Option<Game>>;

    /// Deletes a game by id, returning whether it existed.
    fn delete_by_id(&self, id: &str) -> Result<bool>;
}

/// Player records and the ranked listing.
pub trait PlayerStore {
    /// Exact-name lookup.
    fn find_by_name(&self, name: &str) -> Result<Option<Player>>;

    fn find_by_id(&self, id: u64) -> Result<Option<Player>>;

    /// Persists the player, assigning an id if it does not have one yet, and
    /// returns the stored value.
    fn save(&self, player: Player) -> Result<Player>;

    /// All players ordered by descending win rate, then descending total
    /// winnings.
    fn all_ranked(&self) -> Result<Vec<Player>>;
}
