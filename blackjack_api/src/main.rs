use actix_web::{web, App, HttpServer};
use blackjack_api::logger;
use blackjack_api::routes::configure;
use blackjack_api::service::{GameService, PlayerService};
use blackjack_api::store::{InMemoryGameStore, InMemoryPlayerStore};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Single-player blackjack REST service.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let players = Arc::new(PlayerService::new(InMemoryPlayerStore::new()));
    let games = web::Data::new(GameService::new(InMemoryGameStore::new(), players.clone()));
    let players = web::Data::from(players);

    info!("listening at {}:{}...", args.host, args.port);

    HttpServer::new(move || {
        App::new()
            .app_data(games.clone())
            .app_data(players.clone())
            .configure(configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await
}
