use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        admin::ReportPayloadDto,
        api::{ApiResponse, ErrorDto},
        poll::{
            CreatePollDto, PollPayloadDto, ReportPollDto, ResultsPayloadDto, UpdatePollDto,
        },
    },
    server::{
        error::AppError,
        middleware::{auth::AuthGuard, client_ip::ClientIp},
        model::poll::{CreatePollParams, UpdatePollParams},
        service::poll::{PollService, PollView},
        state::AppState,
        util::json::JsonBody,
    },
};

/// Tag for grouping poll endpoints in OpenAPI documentation
pub static POLL_TAG: &str = "poll";

fn poll_payload(view: PollView) -> PollPayloadDto {
    PollPayloadDto {
        poll: view.poll.into_dto(view.has_voted),
    }
}

/// Create a poll.
///
/// Anonymous callers may create polls; a valid bearer token makes the caller
/// the poll's creator.
///
/// # Returns
/// - `201 Created` - The new poll with its share URL
/// - `400 Bad Request` - Validation failed
#[utoipa::path(
    post,
    path = "/api/polls",
    tag = POLL_TAG,
    request_body = CreatePollDto,
    responses(
        (status = 201, description = "Poll created successfully", body = ApiResponse<PollPayloadDto>),
        (status = 400, description = "Validation failed", body = ErrorDto)
    ),
)]
pub async fn create_poll(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<CreatePollDto>,
) -> Result<impl IntoResponse, AppError> {
    let creator = AuthGuard::new(&state.db, &state.tokens, &headers)
        .optional()
        .await;

    let params = CreatePollParams::from_dto(payload, creator.map(|user| user.id))?;

    let poll = PollService::new(&state.db, &state.cache)
        .create(params)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Poll created successfully",
            PollPayloadDto {
                poll: poll.into_dto(None),
            },
        )),
    ))
}

/// Get a poll by ID or share URL.
///
/// Counts as a view. `hasVoted` tells whether the caller's IP already voted.
#[utoipa::path(
    get,
    path = "/api/polls/{id}",
    tag = POLL_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    responses(
        (status = 200, description = "The poll", body = ApiResponse<PollPayloadDto>),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
)]
pub async fn get_poll(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ClientIp(ip): ClientIp,
) -> Result<impl IntoResponse, AppError> {
    let view = PollService::new(&state.db, &state.cache)
        .get_by_id(&id, Some(&ip))
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(poll_payload(view)))))
}

/// Get a poll by its share URL.
#[utoipa::path(
    get,
    path = "/api/polls/share/{share_url}",
    tag = POLL_TAG,
    params(
        ("share_url" = String, Path, description = "Eight character share code")
    ),
    responses(
        (status = 200, description = "The poll", body = ApiResponse<PollPayloadDto>),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
)]
pub async fn get_poll_by_share_url(
    State(state): State<AppState>,
    Path(share_url): Path<String>,
    ClientIp(ip): ClientIp,
) -> Result<impl IntoResponse, AppError> {
    let view = PollService::new(&state.db, &state.cache)
        .get_by_share_url(&share_url, Some(&ip))
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(poll_payload(view)))))
}

/// Get current results, cached for a few seconds.
#[utoipa::path(
    get,
    path = "/api/polls/{id}/results",
    tag = POLL_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    responses(
        (status = 200, description = "Results with percentages", body = ApiResponse<ResultsPayloadDto>),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
)]
pub async fn get_results(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = PollService::new(&state.db, &state.cache);
    let poll = service.resolve_identifier(&id).await?;
    let results = service.get_results(&poll.id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(ResultsPayloadDto {
            results: results.into_dto(None),
        })),
    ))
}

/// Update a poll's text and settings.
///
/// # Access Control
/// - Creator only, and only while the poll has no votes
#[utoipa::path(
    put,
    path = "/api/polls/{id}",
    tag = POLL_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    request_body = UpdatePollDto,
    responses(
        (status = 200, description = "Poll updated successfully", body = ApiResponse<PollPayloadDto>),
        (status = 400, description = "Validation failed or poll has votes", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_poll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdatePollDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let params = UpdatePollParams::from_dto(payload)?;

    let poll = PollService::new(&state.db, &state.cache)
        .update(&id, &user.id, params)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Poll updated successfully",
            PollPayloadDto {
                poll: poll.into_dto(None),
            },
        )),
    ))
}

/// Delete a poll with its options, votes and reports.
///
/// # Access Control
/// - Creator or admin
#[utoipa::path(
    delete,
    path = "/api/polls/{id}",
    tag = POLL_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    responses(
        (status = 200, description = "Poll deleted successfully"),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_poll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    PollService::new(&state.db, &state.cache)
        .delete(&id, &user.id, user.is_admin())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Poll deleted successfully")),
    ))
}

/// Close a poll to further votes and notify live viewers.
///
/// # Access Control
/// - Creator only
#[utoipa::path(
    post,
    path = "/api/polls/{id}/close",
    tag = POLL_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    responses(
        (status = 200, description = "Poll closed successfully", body = ApiResponse<PollPayloadDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not the creator", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn close_poll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let poll = PollService::new(&state.db, &state.cache)
        .close(&id, &user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Poll closed successfully",
            PollPayloadDto {
                poll: poll.into_dto(None),
            },
        )),
    ))
}

/// Report a poll for moderation.
#[utoipa::path(
    post,
    path = "/api/polls/{id}/report",
    tag = POLL_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    request_body = ReportPollDto,
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<ReportPayloadDto>),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
)]
pub async fn report_poll(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ClientIp(ip): ClientIp,
    JsonBody(payload): JsonBody<ReportPollDto>,
) -> Result<impl IntoResponse, AppError> {
    let report = PollService::new(&state.db, &state.cache)
        .report(&id, payload, Some(ip))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Report submitted",
            ReportPayloadDto {
                report: report.into_dto(),
            },
        )),
    ))
}
