use std::collections::HashMap;
use std::fmt;
use std::time::Instant;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct LiveSession {
    pub connection_id: ConnectionId,
    pub connected_at: Instant,
}

/// Tracks which player keys currently have a session open.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, LiveSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `connection_id` as the session for `player_key`, unless another one is live.
    pub async fn claim(&self, player_key: &str, connection_id: ConnectionId) -> Result<(), String> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(player_key) {
            return Err("Player already connected".to_string());
        }

        sessions.insert(
            player_key.to_string(),
            LiveSession {
                connection_id,
                connected_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Release the claim, but only if `connection_id` still holds it.
    pub async fn release(
        &self,
        player_key: &str,
        connection_id: ConnectionId,
    ) -> Option<LiveSession> {
        let mut sessions = self.sessions.write().await;
        if sessions
            .get(player_key)
            .is_some_and(|live| live.connection_id == connection_id)
        {
            sessions.remove(player_key)
        } else {
            None
        }
    }

    pub async fn get(&self, player_key: &str) -> Option<LiveSession> {
        let sessions = self.sessions.read().await;
        sessions.get(player_key).cloned()
    }

    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_claim_and_release() {
        let registry = SessionRegistry::new();
        let conn_id = ConnectionId::new();

        registry.claim("alice|127.0.0.1", conn_id).await.unwrap();
        assert_eq!(registry.session_count().await, 1);
        assert_eq!(
            registry.get("alice|127.0.0.1").await.map(|s| s.connection_id),
            Some(conn_id)
        );

        tokio::time::sleep(Duration::from_millis(5)).await;
        let released = registry.release("alice|127.0.0.1", conn_id).await.unwrap();
        assert_eq!(released.connection_id, conn_id);
        assert!(released.connected_at.elapsed() >= Duration::from_millis(5));
        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_second_session_for_same_player_rejected() {
        let registry = SessionRegistry::new();
        let conn_id1 = ConnectionId::new();
        let conn_id2 = ConnectionId::new();

        registry.claim("alice|127.0.0.1", conn_id1).await.unwrap();

        let result = registry.claim("alice|127.0.0.1", conn_id2).await;
        assert_eq!(result.unwrap_err(), "Player already connected");

        // Different address is a different player
        registry.claim("alice|10.0.0.1", conn_id2).await.unwrap();
        assert_eq!(registry.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_release_by_other_connection_is_ignored() {
        let registry = SessionRegistry::new();
        let owner = ConnectionId::new();
        let rejected = ConnectionId::new();

        registry.claim("bob|unknown", owner).await.unwrap();
        assert!(registry.claim("bob|unknown", rejected).await.is_err());

        // The rejected connection cleaning up must not free the owner's slot
        assert!(registry.release("bob|unknown", rejected).await.is_none());
        assert_eq!(
            registry.get("bob|unknown").await.map(|s| s.connection_id),
            Some(owner)
        );

        registry.release("bob|unknown", owner).await;
        assert!(registry.claim("bob|unknown", rejected).await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_claims_admit_one() {
        let registry = Arc::new(SessionRegistry::new());
        let mut handles = Vec::new();

        for _ in 0..50 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(1)).await;
                registry.claim("carol|unknown", ConnectionId::new()).await.is_ok()
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
        assert_eq!(registry.session_count().await, 1);
    }
}
