//! Subscriber persistence.
//!
//! One SQLite table, `users(user_id INTEGER PRIMARY KEY, username TEXT)`.
//! Registration is insert-if-absent: the first username written for an id is
//! the one that stays.

use std::{path::Path, str::FromStr};

use async_trait::async_trait;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    FromRow,
};

use crate::{
    domain::{Subscriber, UserId},
    errors::Error,
    Result,
};

/// Durable set of broadcast recipients.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Insert `user_id` unless it is already registered. Never updates.
    async fn register(&self, user_id: UserId, username: Option<&str>) -> Result<()>;

    /// Every registered id, in no particular order.
    async fn list_identities(&self) -> Result<Vec<UserId>>;

    async fn get(&self, user_id: UserId) -> Result<Option<Subscriber>>;
}

#[derive(FromRow)]
struct UserRow {
    user_id: i64,
    username: Option<String>,
}

impl From<UserRow> for Subscriber {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: UserId(row.user_id),
            username: row.username,
        }
    }
}

/// [`SubscriberStore`] over a process-wide SQLite pool.
#[derive(Clone, Debug)]
pub struct SqliteSubscriberStore {
    pool: SqlitePool,
}

impl SqliteSubscriberStore {
    /// Open (creating if missing) the database at `path` and ensure the schema.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .map_err(|e| Error::Store(format!("invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| Error::Store(format!("failed to open {}: {e}", path.display())))?;

        let store = Self { pool };
        store.init_schema().await?;
        tracing::info!(path = %path.display(), "subscriber store ready");
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Close the pool. Further calls fail with [`Error::Store`].
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SubscriberStore for SqliteSubscriberStore {
    async fn register(&self, user_id: UserId, username: Option<&str>) -> Result<()> {
        let res = sqlx::query("INSERT OR IGNORE INTO users (user_id, username) VALUES (?, ?)")
            .bind(user_id.0)
            .bind(username)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() > 0 {
            tracing::info!(user_id = user_id.0, "registered new subscriber");
        }
        Ok(())
    }

    async fn list_identities(&self) -> Result<Vec<UserId>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT user_id FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(UserId).collect())
    }

    async fn get(&self, user_id: UserId) -> Result<Option<Subscriber>> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT user_id, username FROM users WHERE user_id = ?")
                .bind(user_id.0)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Subscriber::from))
    }
}
