use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::{
    model::api::ErrorDto,
    server::{
        controller::{self, admin, auth, health, poll, socket, user, vote},
        middleware::rate_limit::{self, Quota, RateLimits},
        state::AppState,
    },
};

/// Builds every route of the API.
///
/// `limits.routes` throttles register/login/refresh/password reset, voting and
/// poll creation per client IP; `limits.api` adds one shared bucket over all
/// `/api` routes.
pub fn router(limits: RateLimits) -> Router<AppState> {
    let limited = |routes: Router<AppState>, quota: Quota| {
        if limits.routes {
            rate_limit::limit(routes, quota)
        } else {
            routes
        }
    };

    let auth_limited = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password));

    let vote_limited = Router::new().route("/api/polls/{id}/vote", post(vote::cast_vote));

    let create_limited = Router::new().route("/api/polls", post(poll::create_poll));

    let api = Router::new()
        .route("/api/health", get(health::health))
        .route("/api/openapi.json", get(controller::openapi))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/logout-all", post(auth::logout_all))
        .route("/api/auth/change-password", post(auth::change_password))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/polls/{id}",
            get(poll::get_poll)
                .put(poll::update_poll)
                .delete(poll::delete_poll),
        )
        .route("/api/polls/share/{share_url}", get(poll::get_poll_by_share_url))
        .route("/api/polls/{id}/results", get(poll::get_results))
        .route("/api/polls/{id}/close", post(poll::close_poll))
        .route("/api/polls/{id}/report", post(poll::report_poll))
        .route("/api/polls/{id}/votes", get(vote::get_poll_votes))
        .route(
            "/api/polls/{poll_id}/votes/{vote_id}",
            delete(vote::delete_vote),
        )
        .route(
            "/api/user/profile",
            get(user::get_profile).put(user::update_profile),
        )
        .route("/api/user/polls", get(user::get_user_polls))
        .route("/api/user/account", delete(user::delete_account))
        .route("/api/admin/analytics", get(admin::get_analytics))
        .route("/api/admin/reports", get(admin::get_reports))
        .route("/api/admin/reports/{id}", put(admin::update_report))
        .route("/api/admin/polls/{id}", delete(admin::delete_poll))
        .route("/api/admin/users", get(admin::get_users))
        .route("/api/admin/users/{id}", put(admin::update_user))
        .merge(limited(auth_limited, rate_limit::AUTH))
        .merge(limited(vote_limited, rate_limit::VOTE))
        .merge(limited(create_limited, rate_limit::CREATE_POLL));

    let api = if limits.api {
        rate_limit::limit(api, rate_limit::API)
    } else {
        api
    };

    Router::new()
        .route("/", get(health::banner))
        .route("/socket", get(socket::upgrade))
        .merge(api)
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());

    (
        StatusCode::NOT_FOUND,
        Json(ErrorDto::new(format!("Route {} not found", path))),
    )
}
