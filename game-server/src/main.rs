use std::sync::Arc;
use tokio::signal;
use tracing::info;

use game_core::WordValidator;
use game_persistence::{connection::connect_and_migrate, repositories::GameRepository};
use game_server::{
    config::Config, create_routes, game_manager::GameManager, websocket::SessionRegistry,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Wordle server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Loading words from directory: {}", config.words_directory);
    let word_validator = match WordValidator::from_directory(&config.words_directory) {
        Ok(validator) => validator,
        Err(e) => {
            tracing::error!(
                "Failed to load words from directory '{}': {}",
                config.words_directory,
                e
            );
            tracing::error!(
                "Set WORDS_DIRECTORY to a directory containing answers.txt and allowed.txt."
            );
            std::process::exit(1);
        }
    };

    // Initialize database connection and run migrations
    let db = match connect_and_migrate(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };

    let game_manager = Arc::new(GameManager::new(
        GameRepository::new(db),
        word_validator,
        config.rotation(),
        config.feedback_policy,
    ));
    let registry = Arc::new(SessionRegistry::new());

    let routes = create_routes(registry, game_manager, config.idle_timeout());

    let ip = match config.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            tracing::error!("Invalid HOST '{}': {}", config.host, e);
            std::process::exit(1);
        }
    };

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown((ip, config.port), async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
                .expect("Failed to install SIGINT handler");
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
