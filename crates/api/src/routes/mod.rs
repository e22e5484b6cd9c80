pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, movie_meta, user_activity, webhooks};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET  /movie-meta     aggregate ratings/comments (?id, optional bearer)
/// POST /movie-meta     record rating/watch-date/comment (bearer required)
/// GET  /user           caller's activity history (bearer required, ?id optional)
/// POST /webhooks       identity-provider events (signature headers required)
/// GET  /movie          catalog detail proxy (?id)
/// GET  /list           catalog page proxy (?page)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movie-meta",
            get(movie_meta::get_movie_meta).post(movie_meta::post_movie_meta),
        )
        .route("/user", get(user_activity::get_user_activity))
        .route("/webhooks", post(webhooks::receive_webhook))
        .route("/movie", get(catalog::get_movie))
        .route("/list", get(catalog::list_movies))
}
