//! Authenticated principals and issued credentials.

use crate::{
    model::{
        auth::{AuthPayloadDto, TokenPairDto},
        user::Role,
    },
    server::model::user::User,
};

/// The caller identified by a verified access token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
        }
    }
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

impl AuthSession {
    pub fn into_dto(self) -> AuthPayloadDto {
        AuthPayloadDto {
            user: self.user.into_dto(),
            tokens: self.tokens.into_dto(),
        }
    }
}
