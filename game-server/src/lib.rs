use chrono::Utc;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use warp::Filter;

use crate::game_manager::GameManager;
use crate::identity::{PlayerQuery, player_key};
use crate::websocket::SessionRegistry;
use game_types::Statistics;

pub mod config;
pub mod game_manager;
pub mod identity;
pub mod render;
pub mod session;
pub mod websocket;

#[derive(Serialize)]
struct PlayerStatsResponse {
    player: String,
    statistics: Statistics,
    next_rotation_seconds: i64,
}

pub fn create_routes(
    registry: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
    idle_timeout: Duration,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // Clone for filters
    let registry_filter = warp::any().map({
        let registry = registry.clone();
        move || registry.clone()
    });

    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    // WebSocket endpoint
    let play = warp::path("play")
        .and(warp::ws())
        .and(warp::query::<PlayerQuery>())
        .and(warp::addr::remote())
        .and(registry_filter)
        .and(game_manager_filter.clone())
        .map(
            move |ws: warp::ws::Ws,
                  query: PlayerQuery,
                  remote: Option<SocketAddr>,
                  registry,
                  game_mgr| {
                let key = player_key(query.user.as_deref(), remote);
                ws.on_upgrade(move |socket| {
                    websocket::handle_connection(socket, key, registry, game_mgr, idle_timeout)
                })
            },
        );

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // Player stats endpoint
    let stats = warp::path("stats")
        .and(warp::get())
        .and(warp::query::<PlayerQuery>())
        .and(warp::addr::remote())
        .and(game_manager_filter)
        .and_then(handle_stats_request);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    play.or(health)
        .or(stats)
        .with(cors)
        .with(warp::log("wordle"))
}

async fn handle_stats_request(
    query: PlayerQuery,
    remote: Option<SocketAddr>,
    game_manager: Arc<GameManager>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let player = player_key(query.user.as_deref(), remote);

    match game_manager.statistics(&player).await {
        Ok(statistics) => {
            let next_rotation_seconds = game_manager.time_until_next(Utc::now()).num_seconds();
            Ok(warp::reply::with_status(
                warp::reply::json(&PlayerStatsResponse {
                    player,
                    statistics,
                    next_rotation_seconds,
                }),
                warp::http::StatusCode::OK,
            ))
        }
        Err(err) => {
            tracing::error!("Failed to load statistics for {}: {:#}", player, err);
            Ok(warp::reply::with_status(
                warp::reply::json(&serde_json::json!({
                    "error": "Failed to load statistics"
                })),
                warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}
