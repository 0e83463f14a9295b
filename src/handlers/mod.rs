pub mod comment_handlers;
pub mod feed_handlers;
pub mod follow_handlers;
pub mod group_handlers;
pub mod post_handlers;
pub mod user_handlers;

use crate::error::AppError;

pub async fn health_handler() -> &'static str {
    "OK"
}

/// Post and comment text must be at least two characters after trimming.
/// The rejected input is echoed back in the error message path via a 400
/// so the client can redisplay the form.
pub(crate) fn validate_text(raw: &str, what: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() > 1 {
        Ok(trimmed.to_string())
    } else {
        Err(AppError::Validation(format!(
            "{what} text must be at least 2 characters"
        )))
    }
}
