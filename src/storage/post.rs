//! Tweet storage operations.
//!
//! Table: `tweet(tweet_id, tweet, user_id, date_time)`; `date_time` is Unix seconds.

use super::{Store, StoreError};
use crate::models::Post;
use rusqlite::params;

/// Store a tweet authored by `author_id`.
pub async fn create_post(
    store: &Store,
    author_id: i64,
    body: &str,
    posted_at: i64,
) -> Result<Post, StoreError> {
    let body = body.to_string();
    store
        .call(move |conn| {
            conn.execute(
                "INSERT INTO tweet (tweet, user_id, date_time) VALUES (?1, ?2, ?3)",
                params![body, author_id, posted_at],
            )?;
            Ok(Post {
                post_id: conn.last_insert_rowid(),
                author_id,
                body,
                posted_at,
            })
        })
        .await
}

/// List a single account's tweets, newest first.
pub async fn posts_by(store: &Store, author_id: i64) -> Result<Vec<Post>, StoreError> {
    store
        .call(move |conn| {
            let mut stmt = conn.prepare_cached(
                "SELECT tweet_id, user_id, tweet, date_time FROM tweet
                 WHERE user_id = ?1
                 ORDER BY date_time DESC, tweet_id DESC",
            )?;
            let posts = stmt
                .query_map(params![author_id], |row| {
                    Ok(Post {
                        post_id: row.get(0)?,
                        author_id: row.get(1)?,
                        body: row.get(2)?,
                        posted_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(posts)
        })
        .await
}
