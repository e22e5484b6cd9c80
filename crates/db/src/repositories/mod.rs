//! Query layer over the boxd schema.

mod movie_comment_repo;
mod user_movie_repo;
mod user_repo;

pub use movie_comment_repo::MovieCommentRepo;
pub use user_movie_repo::UserMovieRepo;
pub use user_repo::UserRepo;
