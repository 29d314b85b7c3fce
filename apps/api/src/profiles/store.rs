//! Profile Store: key-value persistence of profiles, one JSON document per user key.
//!
//! `set` overwrites unconditionally; concurrent writers resolve last-write-wins.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::debug;

use crate::models::profile::Profile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored profile for '{key}' is not a valid profile document: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Profile could not be serialized: {0}")]
    Serialize(serde_json::Error),
}

/// Carried in `AppState` as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, user_key: &str) -> Result<Option<Profile>, StoreError>;
    async fn set(&self, user_key: &str, profile: &Profile) -> Result<(), StoreError>;
}

/// PostgreSQL-backed store over the `profiles` table (JSONB documents).
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get(&self, user_key: &str) -> Result<Option<Profile>, StoreError> {
        let data: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM profiles WHERE user_key = $1")
                .bind(user_key)
                .fetch_optional(&self.pool)
                .await?;

        data.map(|value| {
            serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
                key: user_key.to_string(),
                source,
            })
        })
        .transpose()
    }

    async fn set(&self, user_key: &str, profile: &Profile) -> Result<(), StoreError> {
        let data = serde_json::to_value(profile).map_err(StoreError::Serialize)?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_key, data, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_key)
            DO UPDATE SET data = EXCLUDED.data, updated_at = NOW()
            "#,
        )
        .bind(user_key)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        debug!("Stored profile {user_key}");
        Ok(())
    }
}
