//! Feed assembly: the newest tweets of the accounts a user follows.
//!
//! Ordering is `date_time` descending; equal timestamps fall back to
//! `tweet_id` descending so later inserts come first.

use super::{Store, StoreError};
use crate::models::FeedEntry;
use rusqlite::params;

/// Latest tweets from the accounts `user_id` follows, at most `limit` entries.
///
/// The followee set is resolved inside the statement; the only bound values
/// are `user_id` and `limit`. Returns an empty feed when the user follows nobody.
pub async fn latest_feed(
    store: &Store,
    user_id: i64,
    limit: usize,
) -> Result<Vec<FeedEntry>, StoreError> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);

    store
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT tweet.user_id, user.username, tweet.tweet, tweet.date_time
                 FROM tweet
                 INNER JOIN user ON user.user_id = tweet.user_id
                 WHERE tweet.user_id IN (
                     SELECT following_user_id FROM follower WHERE follower_user_id = ?1
                 )
                 ORDER BY tweet.date_time DESC, tweet.tweet_id DESC
                 LIMIT ?2",
            )?;
            let entries = stmt
                .query_map(params![user_id, limit], |row| {
                    Ok(FeedEntry {
                        author_id: row.get(0)?,
                        username: row.get(1)?,
                        body: row.get(2)?,
                        posted_at: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(entries)
        })
        .await
}
