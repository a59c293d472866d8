//! REST service for single-player blackjack: in-memory storage adapters, the
//! game/player services orchestrating the core engine, and the actix-web
//! route handlers.

pub mod logger;
pub mod routes;
pub mod service;
pub mod store;

pub mod prelude {
    pub use crate::routes::{configure, ApiError, AppGameService, AppPlayerService};
    pub use crate::service::{GameService, PlayerService};
    pub use crate::store::{InMemoryGameStore, InMemoryPlayerStore};
}
