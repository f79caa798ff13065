use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageQueryDto},
        poll::PaginatedPollsDto,
        user::{ProfilePayloadDto, UpdateProfileDto, UserPayloadDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::{pagination::PageRequest, user::UpdateProfileParams},
        service::{poll::PollService, user::UserService},
        state::AppState,
        util::json::JsonBody,
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// GET /api/user/profile - Get the caller's profile with activity counts
#[utoipa::path(
    get,
    path = "/api/user/profile",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Profile with poll and vote counts", body = ApiResponse<ProfilePayloadDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let profile = UserService::new(&state.db).get_profile(&user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(ProfilePayloadDto {
            user: profile.into_profile_dto(),
        })),
    ))
}

/// PUT /api/user/profile - Change the caller's display name
#[utoipa::path(
    put,
    path = "/api/user/profile",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated successfully", body = ApiResponse<UserPayloadDto>),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<UpdateProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = UpdateProfileParams::from_dto(payload)?;
    let updated = UserService::new(&state.db)
        .update_profile(&user.id, params)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Profile updated successfully",
            UserPayloadDto {
                user: updated.into_dto(),
            },
        )),
    ))
}

/// GET /api/user/polls - List polls created by the caller, newest first
#[utoipa::path(
    get,
    path = "/api/user/polls",
    tag = USER_TAG,
    params(PageQueryDto),
    responses(
        (status = 200, description = "Page of the caller's polls", body = ApiResponse<PaginatedPollsDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_user_polls(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let request =
        PageRequest::from_query(query.page.as_deref(), query.limit.as_deref(), 10, 50);
    let page = PollService::new(&state.db, &state.cache)
        .get_user_polls(&user.id, request)
        .await?;

    let pagination = page.pagination_dto();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(PaginatedPollsDto {
            polls: page.items.into_iter().map(|p| p.into_dto(None)).collect(),
            pagination,
        })),
    ))
}

/// DELETE /api/user/account - Deactivate the caller's account
///
/// Polls and votes are kept. Every refresh token is revoked.
#[utoipa::path(
    delete,
    path = "/api/user/account",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Account deleted successfully"),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db).delete_account(&user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Account deleted successfully")),
    ))
}
