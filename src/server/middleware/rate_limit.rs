//! Per-IP token buckets for routes that invite abuse.
//!
//! Buckets are keyed with `SmartIpKeyExtractor`, which reads the same proxy
//! headers as [`ClientIp`](super::client_ip::ClientIp) and falls back to the
//! peer address, so the server must be served with connect info.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    Json, Router,
};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorError,
    GovernorLayer,
};

use crate::{
    model::api::ErrorDto,
    server::{
        config::{AppEnv, Config},
        state::AppState,
    },
};

/// Sustained rate and burst of one bucket, with the error shown once it is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quota {
    /// Time to earn back one request.
    pub period: Duration,
    pub burst: u32,
    pub message: &'static str,
}

impl Quota {
    /// `requests` per `window`, all available at once.
    pub const fn per(requests: u32, window: Duration, message: &'static str) -> Self {
        Self {
            period: Duration::from_millis(window.as_millis() as u64 / requests as u64),
            burst: requests,
            message,
        }
    }
}

/// Every `/api` route, outside development.
pub const API: Quota = Quota::per(
    100,
    Duration::from_secs(15 * 60),
    "Too many requests, please try again later",
);
/// Register, login, token refresh and password reset endpoints.
pub const AUTH: Quota = Quota::per(
    10,
    Duration::from_secs(15 * 60),
    "Too many authentication attempts, please try again later",
);
/// Casting votes.
pub const VOTE: Quota = Quota::per(30, Duration::from_secs(60), "Too many votes, please slow down");
/// Creating polls.
pub const CREATE_POLL: Quota = Quota::per(
    20,
    Duration::from_secs(60 * 60),
    "Too many polls created, please try again later",
);

/// Which limiters the router installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RateLimits {
    /// Auth, vote and poll creation buckets.
    pub routes: bool,
    /// The [`API`] bucket shared by all `/api` routes.
    pub api: bool,
}

impl RateLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            routes: config.rate_limit_enabled,
            api: config.rate_limit_enabled && config.app_env == AppEnv::Production,
        }
    }

    pub const fn disabled() -> Self {
        Self {
            routes: false,
            api: false,
        }
    }
}

/// Wraps every route of `router` in a bucket with the given quota.
pub fn limit(router: Router<AppState>, quota: Quota) -> Router<AppState> {
    let config = GovernorConfigBuilder::default()
        .period(quota.period)
        .burst_size(quota.burst)
        .key_extractor(SmartIpKeyExtractor)
        .finish();

    match config {
        Some(config) => router.layer(
            GovernorLayer::new(config).error_handler(move |err| rejection(quota.message, err)),
        ),
        None => {
            tracing::warn!("Invalid rate limit quota {:?}, route left unlimited", quota);
            router
        }
    }
}

/// Renders a limiter rejection in the API's error body.
fn rejection(message: &'static str, err: GovernorError) -> Response<Body> {
    match err {
        GovernorError::TooManyRequests { wait_time, .. } => {
            let mut response =
                (StatusCode::TOO_MANY_REQUESTS, Json(ErrorDto::new(message))).into_response();
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(wait_time));
            response
        }
        GovernorError::UnableToExtractKey => {
            tracing::warn!("Rate limiter could not determine the client IP");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto::new("Internal server error")),
            )
                .into_response()
        }
        GovernorError::Other { code, msg, .. } => (
            code,
            Json(ErrorDto::new(msg.unwrap_or_else(|| message.to_string()))),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn quotas_spread_window_over_burst() {
        assert_eq!(API.period, Duration::from_secs(9));
        assert_eq!(API.burst, 100);
        assert_eq!(AUTH.period, Duration::from_secs(90));
        assert_eq!(AUTH.burst, 10);
        assert_eq!(VOTE.period, Duration::from_secs(2));
        assert_eq!(CREATE_POLL.period, Duration::from_secs(180));
    }

    #[tokio::test]
    async fn renders_rejection_as_error_body() {
        let response = rejection(
            VOTE.message,
            GovernorError::TooManyRequests {
                wait_time: 2,
                headers: None,
            },
        );

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "2");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Too many votes, please slow down");
    }
}
