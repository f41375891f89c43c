use anyhow::Context;
use chrono::Utc;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};
use warp::ws::{Message, WebSocket};

use crate::game_manager::GameManager;
use crate::render;
use crate::session::{Session, SessionReply};

pub mod connection;


use connection::ConnectionId;
pub use connection::SessionRegistry;

pub async fn handle_connection(
    websocket: WebSocket,
    player_key: String,
    registry: Arc<SessionRegistry>,
    game_manager: Arc<GameManager>,
    idle_timeout: Duration,
) {
    let connection_id = ConnectionId::new();
    info!("New WebSocket connection {} for {}", connection_id, player_key);

    let (mut ws_sender, mut ws_receiver) = websocket.split();

    if let Err(e) = registry.claim(&player_key, connection_id).await {
        warn!("Rejected connection {} for {}: {}", connection_id, player_key, e);
        let _ = ws_sender.send(Message::text(render::warning(&e))).await;
        let _ = ws_sender.close().await;
        return;
    }

    if let Err(e) = run_session(
        &mut ws_sender,
        &mut ws_receiver,
        &player_key,
        game_manager,
        idle_timeout,
    )
    .await
    {
        error!("Session {} for {} failed: {:#}", connection_id, player_key, e);
    }

    let _ = ws_sender.close().await;
    match registry.release(&player_key, connection_id).await {
        Some(live) => info!(
            "Connection {} disconnected, session lasted {:?}",
            connection_id,
            live.connected_at.elapsed()
        ),
        None => info!("Connection {} disconnected", connection_id),
    }
}

async fn run_session(
    ws_sender: &mut SplitSink<WebSocket, Message>,
    ws_receiver: &mut SplitStream<WebSocket>,
    player_key: &str,
    game_manager: Arc<GameManager>,
    idle_timeout: Duration,
) -> anyhow::Result<()> {
    let (mut session, reply) = Session::begin(game_manager, player_key.to_string(), Utc::now()).await?;
    if send_reply(ws_sender, reply).await? {
        return Ok(());
    }

    loop {
        let next = match timeout(idle_timeout, ws_receiver.next()).await {
            Ok(next) => next,
            Err(_) => {
                info!("Closing idle session for {}", player_key);
                return Ok(());
            }
        };

        let msg = match next {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                warn!("WebSocket error for {}: {}", player_key, e);
                return Ok(());
            }
            None => return Ok(()),
        };

        if msg.is_close() {
            return Ok(());
        }

        // Only text frames carry guesses
        let Ok(line) = msg.to_str() else {
            continue;
        };

        let reply = session.handle_line(line, Utc::now()).await?;
        if send_reply(ws_sender, reply).await? {
            return Ok(());
        }
    }
}

/// Sends every frame and reports whether the session asked to close.
async fn send_reply(
    ws_sender: &mut SplitSink<WebSocket, Message>,
    reply: SessionReply,
) -> anyhow::Result<bool> {
    for frame in reply.frames {
        ws_sender
            .send(Message::text(frame))
            .await
            .context("failed to send frame")?;
    }
    Ok(reply.closed)
}
