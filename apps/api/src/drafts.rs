//! Draft store: holds the latest resume record per user between generation
//! (or manual editing) and PDF download. Entries expire after a TTL.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::models::resume::{ContentSource, ResumeRecord};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub record: ResumeRecord,
    pub source: ContentSource,
    pub created_at: DateTime<Utc>,
}

impl Draft {
    pub fn new(record: ResumeRecord, source: ContentSource) -> Self {
        Self {
            record,
            source,
            created_at: Utc::now(),
        }
    }
}

/// Clones share one Redis connection, opened on first use and reconnected
/// by the `ConnectionManager` after failures.
#[derive(Clone)]
pub struct DraftStore {
    client: redis::Client,
    conn: Arc<OnceCell<ConnectionManager>>,
    ttl_secs: u64,
}

impl DraftStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self {
            client,
            conn: Arc::new(OnceCell::new()),
            ttl_secs,
        }
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let conn = ConnectionManager::new(self.client.clone()).await?;
                info!("Redis draft store connected");
                Ok::<_, redis::RedisError>(conn)
            })
            .await
            .context("Failed to connect to Redis")?;
        Ok(conn.clone())
    }

    /// Replaces the user's draft and resets its expiry.
    pub async fn save(&self, user_key: &str, draft: &Draft) -> Result<()> {
        let payload = serde_json::to_string(draft).context("Failed to serialize draft")?;
        let mut conn = self.connection().await?;

        conn.set_ex::<_, _, ()>(draft_key(user_key), payload, self.ttl_secs)
            .await
            .with_context(|| format!("Failed to store draft for {user_key}"))?;

        debug!("Stored draft for {user_key} (ttl={}s)", self.ttl_secs);
        Ok(())
    }

    pub async fn load(&self, user_key: &str) -> Result<Option<Draft>> {
        let mut conn = self.connection().await?;

        let payload: Option<String> = conn
            .get(draft_key(user_key))
            .await
            .with_context(|| format!("Failed to load draft for {user_key}"))?;

        payload
            .map(|p| serde_json::from_str(&p).context("Stored draft is not valid JSON"))
            .transpose()
    }
}

fn draft_key(user_key: &str) -> String {
    format!("draft:{user_key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_lazy_connection() {
        let client = redis::Client::open("redis://127.0.0.1").unwrap();
        let store = DraftStore::new(client, 60);
        let clone = store.clone();

        assert!(store.conn.get().is_none(), "no connection before first use");
        assert!(Arc::ptr_eq(&store.conn, &clone.conn));
    }

    #[test]
    fn test_draft_key_is_namespaced() {
        assert_eq!(draft_key("jane@example_com"), "draft:jane@example_com");
    }

    #[test]
    fn test_draft_survives_json_storage() {
        let record = ResumeRecord {
            name: "Jane Doe".to_string(),
            summary: "S".to_string(),
            skills: vec!["Python".to_string()],
            suggestions: Some(vec!["Add links".to_string()]),
            ..Default::default()
        };
        let draft = Draft::new(record.clone(), ContentSource::Generated);

        let stored = serde_json::to_string(&draft).unwrap();
        let loaded: Draft = serde_json::from_str(&stored).unwrap();

        assert_eq!(loaded.record, record);
        assert_eq!(loaded.source, ContentSource::Generated);
        assert_eq!(loaded.created_at, draft.created_at);
    }
}
