use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::auth::AuthUser,
    service::auth::{token::TokenKeys, AuthService},
};

pub enum Permission {
    Admin,
}

/// Resolves the caller from the `Authorization: Bearer` header.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenKeys,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenKeys, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Requires a valid access token for an active user holding every permission.
    ///
    /// # Returns
    /// - `Ok(AuthUser)` - The authenticated caller
    /// - `Err(AuthError::MissingToken)` - No bearer token present
    /// - `Err(AuthError::TokenExpired | InvalidToken | UserInactive)` - Token rejected
    /// - `Err(AuthError::AccessDenied)` - A permission is not held
    pub async fn require(&self, permissions: &[Permission]) -> Result<AuthUser, AppError> {
        let Some(token) = bearer_token(self.headers) else {
            return Err(AuthError::MissingToken.into());
        };

        let user = AuthService::new(self.db, self.tokens)
            .authenticate(token)
            .await?;

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !user.is_admin() {
                        return Err(AuthError::AccessDenied(user.id).into());
                    }
                }
            }
        }

        Ok(user)
    }

    /// Identifies the caller when a usable token is present.
    ///
    /// Token errors are ignored and yield `None`.
    pub async fn optional(&self) -> Option<AuthUser> {
        let token = bearer_token(self.headers)?;

        AuthService::new(self.db, self.tokens)
            .authenticate(token)
            .await
            .ok()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
