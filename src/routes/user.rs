//! Endpoints for the authenticated user (all require AuthSession).

use crate::auth::middleware::{AppState, AuthSession};
use crate::error::{AppError, ValidationError};
use crate::models::{unix_now, CreateTweetRequest, MessageResponse, FEED_LIMIT, MAX_TWEET_LEN};
use crate::storage;
use axum::{extract::State, response::IntoResponse, Json};

/// GET /user/tweets/feed: Latest tweets of followed accounts
pub async fn feed(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let entries =
        storage::feed::latest_feed(&state.store, session.account.user_id, FEED_LIMIT).await?;
    Ok(Json(entries))
}

/// GET /user/following: Display names of followed accounts
pub async fn following(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let profiles =
        storage::graph::following_profiles(&state.store, session.account.user_id).await?;
    Ok(Json(profiles))
}

/// GET /user/followers: Display names of followers
pub async fn followers(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let profiles = storage::graph::follower_profiles(&state.store, session.account.user_id).await?;
    Ok(Json(profiles))
}

/// GET /user/tweets: The caller's own tweets, newest first
pub async fn list_tweets(
    session: AuthSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let posts = storage::post::posts_by(&state.store, session.account.user_id).await?;
    Ok(Json(posts))
}

/// POST /user/tweets: Publish a tweet
pub async fn create_tweet(
    session: AuthSession,
    State(state): State<AppState>,
    Json(req): Json<CreateTweetRequest>,
) -> Result<impl IntoResponse, AppError> {
    let body = req.tweet.trim();
    if body.is_empty() {
        return Err(ValidationError::InvalidPost("tweet cannot be empty".to_string()).into());
    }
    if body.chars().count() > MAX_TWEET_LEN {
        return Err(ValidationError::InvalidPost(format!(
            "tweet exceeds {} characters",
            MAX_TWEET_LEN
        ))
        .into());
    }

    let post = storage::post::create_post(&state.store, session.account.user_id, body, unix_now())
        .await?;

    tracing::info!(
        action = "tweet_created",
        user_id = session.account.user_id,
        tweet_id = post.post_id,
        "Tweet created"
    );

    Ok(Json(MessageResponse::ok("Created a Tweet")))
}
