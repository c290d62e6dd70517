use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user id is stored in the session, the caller never logged in or logged out.
    #[error("No user in session")]
    UserNotInSession,

    /// The session refers to a user that no longer exists.
    #[error("User {0} from session not found in database")]
    UserNotInDatabase(i32),

    /// Username unknown or password mismatch.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The user is authenticated but their role does not allow the operation.
    ///
    /// # Fields
    /// - ID of the user who was denied
    /// - Description of the denied operation, logged only
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` / `InvalidCredentials` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
///
/// Details are logged at debug level while the client-facing message stays generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid username or password".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Insufficient permissions".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
