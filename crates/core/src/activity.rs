//! Constants and validation for user activity (ratings, watch dates, comments).

/// Maximum length of a movie comment in characters (matches the
/// `VARCHAR(1000)` storage bound).
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Validate comment text before insertion.
///
/// Rejects empty/whitespace-only comments and comments longer than
/// [`MAX_COMMENT_LENGTH`] characters. Ratings are deliberately not
/// range-checked here; storage accepts any integer and display-side
/// clamping is the view layer's concern.
pub fn validate_comment(comment: &str) -> Result<(), String> {
    if comment.trim().is_empty() {
        return Err("Comment must not be empty".to_string());
    }
    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(format!(
            "Comment must be at most {MAX_COMMENT_LENGTH} characters"
        ));
    }
    Ok(())
}
