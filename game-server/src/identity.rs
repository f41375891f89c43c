use serde::Deserialize;
use std::net::SocketAddr;

pub const ANONYMOUS_USER: &str = "anonymous";
pub const UNKNOWN_ADDRESS: &str = "unknown";

#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    pub user: Option<String>,
}

/// Identity a player's games are filed under: `"<user>|<ip>"`.
pub fn player_key(user: Option<&str>, remote: Option<SocketAddr>) -> String {
    let user = user
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS_USER);

    let address = remote
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

    format!("{}|{}", user, address)
}
