//! Read-through proxy handlers for the movie catalog.
//!
//! The browser talks to these same-origin routes; the server forwards
//! to the external metadata provider and relays its JSON unchanged.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use boxd_core::error::CoreError;
use boxd_core::types::MovieId;

use crate::catalog::CatalogMovie;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MovieLookupParams {
    pub id: Option<MovieId>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u32>,
}

/// GET /api/movie?id={movieId}
pub async fn get_movie(
    State(state): State<AppState>,
    Query(params): Query<MovieLookupParams>,
) -> AppResult<Json<CatalogMovie>> {
    let id = params
        .id
        .ok_or_else(|| AppError::BadRequest("Missing movie id".into()))?;

    let movie = state
        .catalog
        .movie(id)
        .await
        .map_err(|err| map_lookup_error(err, id))?;

    Ok(Json(movie))
}

/// GET /api/list?page={page}
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<CatalogMovie>>> {
    let page = params.page.unwrap_or(1);
    let movies = state.catalog.list(page).await?;
    Ok(Json(movies))
}

/// A provider 404 means the movie id does not exist; everything else is
/// an upstream failure.
fn map_lookup_error(err: reqwest::Error, id: MovieId) -> AppError {
    if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
        return AppError::Core(CoreError::NotFound { entity: "Movie", id });
    }
    AppError::Upstream(err)
}
