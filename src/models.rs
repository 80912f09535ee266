//! Request and response models for the API.
//!
//! All models use serde for serialization/deserialization.
//! Storage models mirror rows of the `user`, `follower`, and `tweet` tables.

use serde::{Deserialize, Serialize};

/// Maximum number of entries returned by the feed.
pub const FEED_LIMIT: usize = 4;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum tweet length, in characters.
pub const MAX_TWEET_LEN: usize = 280;

/// Current time as Unix seconds.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// ============================================================================
// Storage Models
// ============================================================================

/// A registered account as stored in the `user` table.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub user_id: i64,
    pub username: String,
    /// PHC-format digest. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    pub display_name: String,
    pub gender: String,
}

/// Fields needed to insert a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub gender: String,
}

/// Directed follow relation: `follower_id` follows `followee_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowEdge {
    pub follower_id: i64,
    pub followee_id: i64,
}

/// An authored tweet.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    #[serde(rename = "tweetId")]
    pub post_id: i64,
    #[serde(skip)]
    pub author_id: i64,
    #[serde(rename = "tweet")]
    pub body: String,
    /// Unix seconds.
    #[serde(rename = "dateTime")]
    pub posted_at: i64,
}

/// One feed line: a followed account's tweet.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    #[serde(skip)]
    pub author_id: i64,
    pub username: String,
    #[serde(rename = "tweet")]
    pub body: String,
    #[serde(rename = "dateTime")]
    pub posted_at: i64,
}

/// Display name of an account in a following/followers listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
}

// ============================================================================
// Auth Models
// ============================================================================

/// Identity carried inside a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaim {
    pub username: String,
}

/// Request to register a new account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub gender: String,
}

/// Request to log in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing the session token.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "jwtToken")]
    pub jwt_token: String,
}

// ============================================================================
// Tweet Models
// ============================================================================

/// Request to publish a tweet.
#[derive(Debug, Deserialize)]
pub struct CreateTweetRequest {
    pub tweet: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_never_serializes_password_hash() {
        let account = Account {
            user_id: 1,
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            display_name: "Alice".to_string(),
            gender: "female".to_string(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"username\":\"alice\""));
    }

    #[test]
    fn test_feed_entry_wire_names() {
        let entry = FeedEntry {
            author_id: 7,
            username: "bob".to_string(),
            body: "hello".to_string(),
            posted_at: 1_700_000_000,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["username"], "bob");
        assert_eq!(value["tweet"], "hello");
        assert_eq!(value["dateTime"], 1_700_000_000_i64);
        assert!(value.get("author_id").is_none());
    }

    #[test]
    fn test_login_response_wire_name() {
        let value = serde_json::to_value(LoginResponse {
            jwt_token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(value["jwtToken"], "abc");
    }

    #[test]
    fn test_register_request_deserialize() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"username":"alice","password":"secret1","name":"Alice","gender":"female"}"#,
        )
        .unwrap();
        assert_eq!(req.username, "alice");
        assert_eq!(req.name, "Alice");
    }
}
