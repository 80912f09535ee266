//! Follower/following edge queries.
//!
//! Table: `follower(follower_id, follower_user_id, following_user_id)`.
//! A row means `follower_user_id` follows `following_user_id`.

use super::{Store, StoreError};
use crate::models::{FollowEdge, Profile};
use rusqlite::params;
use std::collections::BTreeSet;

/// IDs of every account `user_id` follows.
pub async fn following_of(store: &Store, user_id: i64) -> Result<BTreeSet<i64>, StoreError> {
    store
        .call(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT following_user_id FROM follower WHERE follower_user_id = ?1",
            )?;
            let ids = stmt
                .query_map(params![user_id], |row| row.get(0))?
                .collect::<Result<BTreeSet<i64>, _>>()?;
            Ok(ids)
        })
        .await
}

/// IDs of every account following `user_id`.
pub async fn followers_of(store: &Store, user_id: i64) -> Result<BTreeSet<i64>, StoreError> {
    store
        .call(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT follower_user_id FROM follower WHERE following_user_id = ?1",
            )?;
            let ids = stmt
                .query_map(params![user_id], |row| row.get(0))?
                .collect::<Result<BTreeSet<i64>, _>>()?;
            Ok(ids)
        })
        .await
}

/// Display names of the accounts `user_id` follows, ordered by account ID.
pub async fn following_profiles(store: &Store, user_id: i64) -> Result<Vec<Profile>, StoreError> {
    store
        .call(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT user.name FROM user
                 INNER JOIN follower ON user.user_id = follower.following_user_id
                 WHERE follower.follower_user_id = ?1
                 ORDER BY user.user_id",
            )?;
            let profiles = stmt
                .query_map(params![user_id], |row| Ok(Profile { name: row.get(0)? }))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(profiles)
        })
        .await
}

/// Display names of the accounts following `user_id`, ordered by account ID.
pub async fn follower_profiles(store: &Store, user_id: i64) -> Result<Vec<Profile>, StoreError> {
    store
        .call(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT user.name FROM user
                 INNER JOIN follower ON user.user_id = follower.follower_user_id
                 WHERE follower.following_user_id = ?1
                 ORDER BY user.user_id",
            )?;
            let profiles = stmt
                .query_map(params![user_id], |row| Ok(Profile { name: row.get(0)? }))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(profiles)
        })
        .await
}

/// Record a follow edge. Re-adding an existing edge is a no-op.
///
/// Returns true if a new edge was inserted.
pub async fn follow(store: &Store, edge: FollowEdge) -> Result<bool, StoreError> {
    store
        .call(move |conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO follower (follower_user_id, following_user_id)
                 VALUES (?1, ?2)",
                params![edge.follower_id, edge.followee_id],
            )?;
            Ok(inserted > 0)
        })
        .await
}
