use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::Duration;

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{AuthGuard, Permission},
    model::user::User,
    service::auth::token::TokenKeys,
};
use test_utils::{builder::TestBuilder, factory};

mod optional;
mod require;

fn keys() -> TokenKeys {
    TokenKeys::new(
        "access-secret",
        "refresh-secret",
        Duration::minutes(15),
        Duration::days(7),
    )
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token)) {
        headers.insert(AUTHORIZATION, value);
    }
    headers
}

fn access_token(keys: &TokenKeys, user: entity::user::Model) -> String {
    keys.issue_access(&User::from_entity(user).unwrap()).unwrap()
}
