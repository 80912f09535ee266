//! SQLite storage layer for accounts, follow edges, and tweets.
//!
//! All functions are async and run their statements on tokio's blocking pool
//! through [`Store::call`]. Every statement is parameterized; caller-supplied
//! values never become part of SQL text.

pub mod feed;
pub mod graph;
pub mod post;
pub mod user;

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS user (
        user_id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        gender TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS follower (
        follower_id INTEGER PRIMARY KEY AUTOINCREMENT,
        follower_user_id INTEGER NOT NULL REFERENCES user(user_id),
        following_user_id INTEGER NOT NULL REFERENCES user(user_id),
        UNIQUE (follower_user_id, following_user_id)
    );
    CREATE INDEX IF NOT EXISTS idx_follower_followee ON follower(following_user_id);

    CREATE TABLE IF NOT EXISTS tweet (
        tweet_id INTEGER PRIMARY KEY AUTOINCREMENT,
        tweet TEXT NOT NULL,
        user_id INTEGER NOT NULL REFERENCES user(user_id),
        date_time INTEGER NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_tweet_author_time ON tweet(user_id, date_time);
";

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Username already claimed")]
    DuplicateUsername,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage task failed: {0}")]
    Task(String),
}

/// Shared handle to the relational store.
///
/// Cloning is cheap; all clones share one connection. The handle is opened
/// once at startup and injected wherever store access is needed.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open (or create) the database file and apply the schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    /// Open a private in-memory database (tests, ephemeral runs).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    pub async fn call<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock();
            f(&guard)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }

    /// Close the underlying connection.
    ///
    /// Only the last handle actually closes; earlier calls just drop their clone.
    pub fn close(self) -> Result<(), StoreError> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => mutex
                .into_inner()
                .close()
                .map_err(|(_, e)| StoreError::Sqlite(e)),
            Err(_) => Ok(()),
        }
    }
}

/// True if the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let store = Store::open_in_memory().unwrap();
        store
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let store = Store::open_in_memory().unwrap();
        let result = store
            .call(|conn| {
                conn.execute(
                    "INSERT INTO tweet (tweet, user_id, date_time) VALUES (?1, ?2, ?3)",
                    rusqlite::params!["orphan", 999_i64, 0_i64],
                )?;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(StoreError::Sqlite(_))));
    }

    #[tokio::test]
    async fn test_close_last_handle() {
        let store = Store::open_in_memory().unwrap();
        let clone = store.clone();
        assert!(clone.close().is_ok());
        assert!(store.close().is_ok());
    }

    #[tokio::test]
    async fn test_open_file_persists() {
        let path = std::env::temp_dir().join(format!(
            "flock-test-{}-{:016x}.db",
            std::process::id(),
            rand::random::<u64>()
        ));

        let store = Store::open(&path).unwrap();
        store
            .call(|conn| {
                conn.execute(
                    "INSERT INTO user (name, username, password, gender) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params!["Ada", "ada", "x", "female"],
                )?;
                Ok(())
            })
            .await
            .unwrap();
        store.close().unwrap();

        let reopened = Store::open(&path).unwrap();
        let count: i64 = reopened
            .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM user", [], |row| row.get(0))?))
            .await
            .unwrap();
        assert_eq!(count, 1);
        reopened.close().unwrap();
        let _ = std::fs::remove_file(&path);
    }
}
