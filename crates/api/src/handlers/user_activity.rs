//! Handler for the per-user activity history endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use boxd_core::error::CoreError;
use boxd_core::types::UserId;
use boxd_db::models::movie_comment::MovieComment;
use boxd_db::models::user_movie::UserMovie;
use boxd_db::repositories::{MovieCommentRepo, UserMovieRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserActivityParams {
    pub id: Option<UserId>,
}

/// Everything one user has done: ratings/watch dates and comments.
#[derive(Debug, Serialize)]
pub struct UserActivity {
    pub ratings: Vec<UserMovie>,
    pub comments: Vec<MovieComment>,
}

/// GET /api/user
///
/// Token-gated: activity is only readable by its owner. The optional
/// `id` query parameter is accepted for compatibility with older
/// clients but must match the token subject.
pub async fn get_user_activity(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UserActivityParams>,
) -> AppResult<Json<UserActivity>> {
    if let Some(requested) = &params.id {
        if *requested != auth.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Activity is only readable by its owner".into(),
            )));
        }
    }

    let ratings = UserMovieRepo::list_by_user(&state.pool, &auth.user_id).await?;
    let comments = MovieCommentRepo::list_by_user(&state.pool, &auth.user_id).await?;

    Ok(Json(UserActivity { ratings, comments }))
}
