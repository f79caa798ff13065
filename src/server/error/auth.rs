use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token was supplied on a route that requires one.
    #[error("Access token required")]
    MissingToken,

    /// The access token's `exp` claim is in the past.
    #[error("Token expired")]
    TokenExpired,

    /// The access token failed signature or structure validation.
    #[error("Invalid token")]
    InvalidToken,

    /// The token's subject no longer exists or has been deactivated.
    #[error("User not found or inactive")]
    UserInactive,

    /// The authenticated user lacks the required role.
    ///
    /// # Fields
    /// - ID of the user that was denied
    #[error("User {0} lacks required permissions")]
    AccessDenied(String),

    /// Unknown email or wrong password at login.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The account exists but has been deactivated.
    #[error("Account is deactivated")]
    AccountDeactivated,

    /// The refresh token failed signature validation.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// The refresh token is unknown to the store or past its expiry.
    #[error("Refresh token expired or invalid")]
    RefreshTokenExpired,

    /// Change-password was called with the wrong current password.
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// The operation needs a signed-in user.
    ///
    /// # Fields
    /// - Message shown to the client
    #[error("{0}")]
    AuthenticationRequired(String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `AccessDenied` → 403 Forbidden with "Insufficient permissions"
/// - `AccountDeactivated` → 403 Forbidden
/// - Everything else → 401 Unauthorized with the error's message
///
/// Denials are logged at debug level with the user ID for diagnostics.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::AccessDenied(ref user_id) => {
                tracing::debug!("Access denied for user {}", user_id);
                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto::new("Insufficient permissions")),
                )
                    .into_response()
            }
            Self::AccountDeactivated => {
                (StatusCode::FORBIDDEN, Json(ErrorDto::new(self.to_string()))).into_response()
            }
            err => (StatusCode::UNAUTHORIZED, Json(ErrorDto::new(err.to_string()))).into_response(),
        }
    }
}
