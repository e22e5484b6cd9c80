//! Handlers for the per-movie activity aggregation endpoint.
//!
//! GET aggregates ratings and comments across all users and, when the
//! caller presents a valid token, folds in their own rating and watch
//! date. POST records a rating/watch-date/comment tuple for the
//! authenticated caller.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use boxd_core::activity::validate_comment;
use boxd_core::types::{MovieId, WatchDate};
use boxd_db::models::movie_comment::MovieComment;
use boxd_db::repositories::{MovieCommentRepo, UserMovieRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;

/// Query parameters for the aggregation read.
#[derive(Debug, Deserialize)]
pub struct MovieMetaParams {
    pub id: Option<MovieId>,
}

/// Aggregated activity for one movie, plus the caller's own record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieMeta {
    /// Mean of recorded ratings, or null when the movie has none.
    pub average_rating: Option<f64>,
    pub comments: Vec<MovieComment>,
    pub user_rating: Option<i32>,
    pub user_watched_at: Option<WatchDate>,
}

/// GET /api/movie-meta?id={movieId}
///
/// Anonymous callers get the aggregate view with null user fields; an
/// invalid token is treated the same as no token.
pub async fn get_movie_meta(
    OptionalAuthUser(caller): OptionalAuthUser,
    State(state): State<AppState>,
    Query(params): Query<MovieMetaParams>,
) -> AppResult<Json<MovieMeta>> {
    let movie_id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Missing movie id".into()))?;

    let average_rating = UserMovieRepo::average_rating(&state.pool, movie_id).await?;
    let comments = MovieCommentRepo::list_by_movie(&state.pool, movie_id).await?;

    let (user_rating, user_watched_at) = match caller {
        Some(user_id) => match UserMovieRepo::find(&state.pool, &user_id, movie_id).await? {
            Some(row) => (row.rating, row.watched_at),
            None => (None, None),
        },
        None => (None, None),
    };

    Ok(Json(MovieMeta {
        average_rating,
        comments,
        user_rating,
        user_watched_at,
    }))
}

/// Body for recording activity. The user id comes from the bearer
/// token, never from the body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitActivity {
    pub movie_id: Option<MovieId>,
    pub rating: Option<i32>,
    pub watched_at: Option<WatchDate>,
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitAck {
    pub success: bool,
}

/// POST /api/movie-meta
///
/// Requires a valid bearer token; anonymous writes are rejected with
/// 401. `movieId` plus at least one of `rating`/`watchedAt` is
/// required; a comment is optional and independent.
pub async fn post_movie_meta(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitActivity>,
) -> AppResult<Json<SubmitAck>> {
    let movie_id = input
        .movie_id
        .ok_or_else(|| AppError::BadRequest("Missing movie id".into()))?;

    if input.rating.is_none() && input.watched_at.is_none() {
        return Err(AppError::BadRequest(
            "At least one of rating or watchedAt is required".into(),
        ));
    }

    // Clients send the comment field unconditionally; a blank value
    // means "no comment", not an invalid one.
    let comment = input.comment.as_deref().filter(|c| !c.trim().is_empty());

    if let Some(comment) = comment {
        validate_comment(comment).map_err(AppError::BadRequest)?;
    }

    // The comment append and the rating replace commit or fail together;
    // the replace itself is a single upsert, so a concurrent reader never
    // observes the row missing mid-write.
    let mut tx = state.pool.begin().await?;

    if let Some(comment) = comment {
        MovieCommentRepo::insert(&mut *tx, &auth.user_id, movie_id, comment).await?;
    }

    UserMovieRepo::replace(
        &mut *tx,
        &auth.user_id,
        movie_id,
        input.rating,
        input.watched_at,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = %auth.user_id,
        movie_id,
        rating = ?input.rating,
        "Activity recorded"
    );

    Ok(Json(SubmitAck { success: true }))
}
