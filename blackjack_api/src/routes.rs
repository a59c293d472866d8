//! The HTTP surface: request DTOs, route handlers, and the mapping from the
//! core's error taxonomy onto status codes and a JSON error body.

use crate::service::{GameService, PlayerService};
use crate::store::{InMemoryGameStore, InMemoryPlayerStore};
use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{delete, error, get, post, put, web, HttpResponse};
use blackjack_lib::error::BlackjackError;
use blackjack_lib::game::Action;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The concrete service types the handlers are wired against.
pub type AppGameService = GameService<InMemoryGameStore, InMemoryPlayerStore>;
pub type AppPlayerService = PlayerService<InMemoryPlayerStore>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub player_name: String,
    #[serde(default = "default_bet")]
    pub bet: f64,
}

fn default_bet() -> f64 {
    10.0
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    pub action: Action,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    pub name: String,
}

/// A user-facing error carrying the core's taxonomy across the HTTP
/// boundary.
#[derive(Debug)]
pub struct ApiError(BlackjackError);

impl From<BlackjackError> for ApiError {
    fn from(err: BlackjackError) -> Self {
        ApiError(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The error body shape of the original service.
#[derive(Debug, Serialize)]
struct ErrorBody {
    timestamp: DateTime<Utc>,
    status: u16,
    error: String,
    message: String,
}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            BlackjackError::GameNotFound(_) | BlackjackError::PlayerNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            BlackjackError::InvalidState(_) | BlackjackError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            BlackjackError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let status = self.status_code();
        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("error").to_string(),
            message: self.to_string(),
        };
        HttpResponse::build(status).json(body)
    }
}

/// A handler that creates a new game for the named player with the given
/// bet. Returns 201 with the dealt game.
#[post("/game/new")]
async fn create_game(
    request: web::Json<CreateGameRequest>,
    games: web::Data<AppGameService>,
) -> Result<HttpResponse, ApiError> {
    let game = games.create_game(&request.player_name, request.bet)?;
    Ok(HttpResponse::Created().json(game))
}

/// A handler that returns the details of one game.
#[get("/game/{id}")]
async fn get_game(
    id: web::Path<String>,
    games: web::Data<AppGameService>,
) -> Result<HttpResponse, ApiError> {
    let game = games.get_game(&id)?;
    Ok(HttpResponse::Ok().json(game))
}

/// A handler that applies a HIT or STAND to an in-progress game.
#[post("/game/{id}/play")]
async fn play_game(
    id: web::Path<String>,
    request: web::Json<PlayRequest>,
    games: web::Data<AppGameService>,
) -> Result<HttpResponse, ApiError> {
    let game = games.play(&id, request.action)?;
    Ok(HttpResponse::Ok().json(game))
}

/// A handler that deletes a game. Returns 204 on success.
#[delete("/game/{id}/delete")]
async fn delete_game(
    id: web::Path<String>,
    games: web::Data<AppGameService>,
) -> Result<HttpResponse, ApiError> {
    games.delete_game(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// A handler that returns all players ordered by win rate, then total
/// winnings.
#[get("/ranking")]
async fn get_ranking(players: web::Data<AppPlayerService>) -> Result<HttpResponse, ApiError> {
    let ranking = players.ranking()?;
    Ok(HttpResponse::Ok().json(ranking))
}

/// A handler that renames a player.
#[put("/player/{player_id}")]
async fn update_player_name(
    player_id: web::Path<u64>,
    request: web::Json<UpdatePlayerRequest>,
    players: web::Data<AppPlayerService>,
) -> Result<HttpResponse, ApiError> {
    let player = players.update_name(*player_id, &request.name)?;
    Ok(HttpResponse::Ok().json(player))
}

/// Maps body extraction failures (malformed JSON, an unrecognized action)
/// onto the same error body the other validations produce.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(BlackjackError::InvalidInput(err.to_string())).into()
    })
}

/// Registers every route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(create_game)
        .service(get_game)
        .service(play_game)
        .service(delete_game)
        .service(get_ranking)
        .service(update_player_name);
}
