//! Account lookups and creation.
//!
//! Table: `user(user_id, name, username, password, gender)`.
//! `username` carries a UNIQUE constraint; it is the only authority on
//! whether a username is taken.

use super::{is_unique_violation, Store, StoreError};
use crate::models::{Account, NewAccount};
use rusqlite::{params, OptionalExtension, Row};

const ACCOUNT_COLUMNS: &str = "user_id, username, password, name, gender";

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        user_id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        display_name: row.get(3)?,
        gender: row.get(4)?,
    })
}

/// Get an account by username (case-sensitive exact match).
pub async fn find_by_username(
    store: &Store,
    username: &str,
) -> Result<Option<Account>, StoreError> {
    let username = username.to_string();
    store
        .call(move |conn| {
            let account = conn
                .query_row(
                    &format!("SELECT {} FROM user WHERE username = ?1", ACCOUNT_COLUMNS),
                    params![username],
                    account_from_row,
                )
                .optional()?;
            Ok(account)
        })
        .await
}

/// Get an account by ID.
pub async fn find_by_id(store: &Store, user_id: i64) -> Result<Option<Account>, StoreError> {
    store
        .call(move |conn| {
            let account = conn
                .query_row(
                    &format!("SELECT {} FROM user WHERE user_id = ?1", ACCOUNT_COLUMNS),
                    params![user_id],
                    account_from_row,
                )
                .optional()?;
            Ok(account)
        })
        .await
}

/// Check whether a username is registered.
pub async fn exists(store: &Store, username: &str) -> Result<bool, StoreError> {
    Ok(find_by_username(store, username).await?.is_some())
}

/// Insert a new account and return it with its store-assigned ID.
///
/// Returns [`StoreError::DuplicateUsername`] when the username is already claimed,
/// including when a concurrent registration won the race.
pub async fn create(store: &Store, account: NewAccount) -> Result<Account, StoreError> {
    store
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO user (name, username, password, gender) VALUES (?1, ?2, ?3, ?4)",
                params![
                    account.display_name,
                    account.username,
                    account.password_hash,
                    account.gender
                ],
            );

            match inserted {
                Ok(_) => Ok(Account {
                    user_id: conn.last_insert_rowid(),
                    username: account.username,
                    password_hash: account.password_hash,
                    display_name: account.display_name,
                    gender: account.gender,
                }),
                Err(e) if is_unique_violation(&e) => Err(StoreError::DuplicateUsername),
                Err(e) => Err(e.into()),
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: "digest".to_string(),
            display_name: format!("{} display", username),
            gender: "other".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = Store::open_in_memory().unwrap();

        let created = create(&store, new_account("alice")).await.unwrap();
        assert!(created.user_id > 0);

        let found = find_by_username(&store, "alice").await.unwrap().unwrap();
        assert_eq!(found.user_id, created.user_id);
        assert_eq!(found.display_name, "alice display");
        assert_eq!(found.password_hash, "digest");

        let by_id = find_by_id(&store, created.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let store = Store::open_in_memory().unwrap();
        assert!(find_by_username(&store, "ghost").await.unwrap().is_none());
        assert!(find_by_id(&store, 42).await.unwrap().is_none());
        assert!(!exists(&store, "ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let store = Store::open_in_memory().unwrap();
        create(&store, new_account("Alice")).await.unwrap();

        assert!(exists(&store, "Alice").await.unwrap());
        assert!(!exists(&store, "alice").await.unwrap());
        assert!(!exists(&store, "ALICE").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_by_store() {
        let store = Store::open_in_memory().unwrap();
        create(&store, new_account("alice")).await.unwrap();

        let result = create(&store, new_account("alice")).await;
        assert!(matches!(result, Err(StoreError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_concurrent_registrations_single_winner() {
        let store = Store::open_in_memory().unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                create(&store, new_account("racer")).await
            }));
        }

        let mut won = 0;
        let mut duplicate = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => won += 1,
                Err(StoreError::DuplicateUsername) => duplicate += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(won, 1);
        assert_eq!(duplicate, 7);
    }

    #[tokio::test]
    async fn test_username_is_data_not_sql() {
        let store = Store::open_in_memory().unwrap();
        let hostile = "x'; DROP TABLE user; --";
        create(&store, new_account(hostile)).await.unwrap();

        let found = find_by_username(&store, hostile).await.unwrap().unwrap();
        assert_eq!(found.username, hostile);
        assert!(find_by_username(&store, "x").await.unwrap().is_none());
    }
}
