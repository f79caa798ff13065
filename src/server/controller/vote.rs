use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto, PageQueryDto},
        vote::{CastVoteDto, CastVoteResultDto, PaginatedVotesDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            client_ip::ClientIp,
        },
        model::{pagination::PageRequest, vote::CastVoteParams},
        service::vote::VoteService,
        state::AppState,
        util::json::JsonBody,
    },
};

/// Tag for grouping vote endpoints in OpenAPI documentation
pub static VOTE_TAG: &str = "vote";

/// Cast a vote.
///
/// The caller is identified by every identity it presents: bearer token,
/// client IP, and the optional session and device IDs in the body. The new
/// results are pushed to everyone in the poll's room.
///
/// # Returns
/// - `201 Created` - The stored vote and fresh results
/// - `400 Bad Request` - Poll closed or expired, invalid option, or duplicate vote
/// - `401 Unauthorized` - Poll requires a signed-in voter
/// - `404 Not Found` - Poll not found
#[utoipa::path(
    post,
    path = "/api/polls/{id}/vote",
    tag = VOTE_TAG,
    params(
        ("id" = String, Path, description = "Poll ID")
    ),
    request_body = CastVoteDto,
    responses(
        (status = 201, description = "Vote cast successfully", body = ApiResponse<CastVoteResultDto>),
        (status = 400, description = "Vote rejected", body = ErrorDto),
        (status = 401, description = "Authentication required to vote", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
)]
pub async fn cast_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(poll_id): Path<String>,
    ClientIp(ip): ClientIp,
    JsonBody(payload): JsonBody<CastVoteDto>,
) -> Result<impl IntoResponse, AppError> {
    let voter = AuthGuard::new(&state.db, &state.tokens, &headers)
        .optional()
        .await;

    let params = CastVoteParams {
        poll_id,
        option_id: payload.option_id,
        user_id: voter.map(|user| user.id),
        ip_address: Some(ip),
        session_id: payload.session_id,
        device_id: payload.device_id,
    };

    let outcome = VoteService::new(&state.db, &state.cache)
        .cast_vote(params)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Vote cast successfully",
            outcome.into_dto(),
        )),
    ))
}

/// List a poll's votes, newest first.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/polls/{id}/votes",
    tag = VOTE_TAG,
    params(
        ("id" = String, Path, description = "Poll ID"),
        PageQueryDto
    ),
    responses(
        (status = 200, description = "Page of votes", body = ApiResponse<PaginatedVotesDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_poll_votes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(poll_id): Path<String>,
    Query(query): Query<PageQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let request =
        PageRequest::from_query(query.page.as_deref(), query.limit.as_deref(), 50, 100);
    let page = VoteService::new(&state.db, &state.cache)
        .get_poll_votes(&poll_id, request)
        .await?;

    let pagination = page.pagination_dto();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(PaginatedVotesDto {
            votes: page.items.into_iter().map(|v| v.into_dto()).collect(),
            pagination,
        })),
    ))
}

/// Remove a vote and roll back its counters.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/polls/{poll_id}/votes/{vote_id}",
    tag = VOTE_TAG,
    params(
        ("poll_id" = String, Path, description = "Poll ID"),
        ("vote_id" = String, Path, description = "Vote ID")
    ),
    responses(
        (status = 200, description = "Vote deleted successfully"),
        (status = 400, description = "Vote does not belong to this poll", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Vote not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((poll_id, vote_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    VoteService::new(&state.db, &state.cache)
        .delete_vote(&vote_id, &poll_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Vote deleted successfully")),
    ))
}
