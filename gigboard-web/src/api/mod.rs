//! HTTP handlers for gigboard-web

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use health::health_routes;

use crate::error::AppError;
use crate::render::Flash;
use axum::http::Uri;

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("route {}", uri.path()))
}

/// Error banner for a submission that was rejected or could not be saved
///
/// Names the record when the form carried a name, e.g.
/// "An error occurred. Venue The Hop could not be listed."
pub(crate) fn failure_flash(noun: &str, name: &str, action: &str) -> Flash {
    let name = name.trim();
    if name.is_empty() {
        Flash::Error(format!("An error occurred. {} could not be {}.", noun, action))
    } else {
        Flash::Error(format!(
            "An error occurred. {} {} could not be {}.",
            noun, name, action
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_flash_names_record() {
        assert_eq!(
            failure_flash("Venue", "The Hop", "listed").message(),
            "An error occurred. Venue The Hop could not be listed."
        );
        assert_eq!(
            failure_flash("Show", "", "listed").message(),
            "An error occurred. Show could not be listed."
        );
    }
}
