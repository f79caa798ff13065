//! HTTP request handlers.
//!
//! Controllers authenticate the caller, convert DTOs to domain parameters, call
//! a service and wrap the result in the `{ success, message?, data? }` envelope.

pub mod admin;
pub mod auth;
pub mod health;
pub mod poll;
pub mod socket;
pub mod user;
pub mod vote;

use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "PollStraw API", description = "Real-time polling platform"),
    paths(
        health::banner,
        health::health,
        auth::register,
        auth::login,
        auth::refresh,
        auth::logout,
        auth::logout_all,
        auth::change_password,
        auth::forgot_password,
        auth::reset_password,
        auth::me,
        poll::create_poll,
        poll::get_poll,
        poll::get_poll_by_share_url,
        poll::get_results,
        poll::update_poll,
        poll::delete_poll,
        poll::close_poll,
        poll::report_poll,
        vote::cast_vote,
        vote::get_poll_votes,
        vote::delete_vote,
        user::get_profile,
        user::update_profile,
        user::get_user_polls,
        user::delete_account,
        admin::get_analytics,
        admin::get_reports,
        admin::update_report,
        admin::delete_poll,
        admin::get_users,
        admin::update_user,
        socket::upgrade,
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Service status"),
        (name = "auth", description = "Accounts and tokens"),
        (name = "poll", description = "Poll management and results"),
        (name = "vote", description = "Voting and vote moderation"),
        (name = "user", description = "The caller's own account"),
        (name = "admin", description = "Administration"),
        (name = "realtime", description = "Live poll updates over WebSocket"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// GET /api/openapi.json - The OpenAPI document
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
