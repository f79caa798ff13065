use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        admin::{
            AdminUserPayloadDto, AnalyticsDto, PaginatedReportsDto, PaginatedUsersDto,
            ReportPayloadDto, ReportsQueryDto, UpdateReportDto, UpdateUserDto, UsersQueryDto,
        },
        api::{ApiResponse, ErrorDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{pagination::PageRequest, user::UpdateUserParams},
        service::admin::AdminService,
        state::AppState,
        util::json::JsonBody,
    },
};

/// Tag for grouping admin endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Dashboard figures.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/analytics",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Totals, today's counts, recent and top polls", body = ApiResponse<AnalyticsDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let analytics = AdminService::new(&state.db, &state.cache)
        .analytics()
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::data(analytics.into_dto()))))
}

/// List moderation reports, newest first.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/reports",
    tag = ADMIN_TAG,
    params(ReportsQueryDto),
    responses(
        (status = 200, description = "Page of reports", body = ApiResponse<PaginatedReportsDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_reports(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ReportsQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let request =
        PageRequest::from_query(query.page.as_deref(), query.limit.as_deref(), 20, 100);
    let page = AdminService::new(&state.db, &state.cache)
        .get_reports(query.status, request)
        .await?;

    let pagination = page.pagination_dto();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(PaginatedReportsDto {
            reports: page.items.into_iter().map(|r| r.into_dto()).collect(),
            pagination,
        })),
    ))
}

/// Change a report's moderation status.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    put,
    path = "/api/admin/reports/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = String, Path, description = "Report ID")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated successfully", body = ApiResponse<ReportPayloadDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Report not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_report(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateReportDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let report = AdminService::new(&state.db, &state.cache)
        .update_report_status(&id, payload.status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Report updated successfully",
            ReportPayloadDto {
                report: report.into_dto(),
            },
        )),
    ))
}

/// Delete any poll.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    delete,
    path = "/api/admin/polls/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = String, Path, description = "Poll ID or share URL")
    ),
    responses(
        (status = 200, description = "Poll deleted successfully"),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Poll not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn delete_poll(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    AdminService::new(&state.db, &state.cache)
        .delete_poll(&id, &admin.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Poll deleted successfully")),
    ))
}

/// List accounts with poll and vote counts.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = ADMIN_TAG,
    params(UsersQueryDto),
    responses(
        (status = 200, description = "Page of users", body = ApiResponse<PaginatedUsersDto>),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn get_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UsersQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let request =
        PageRequest::from_query(query.page.as_deref(), query.limit.as_deref(), 20, 100);
    let search = query.search.as_deref().filter(|s| !s.trim().is_empty());
    let page = AdminService::new(&state.db, &state.cache)
        .get_users(search, request)
        .await?;

    let pagination = page.pagination_dto();
    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(PaginatedUsersDto {
            users: page.items.into_iter().map(|u| u.into_admin_dto()).collect(),
            pagination,
        })),
    ))
}

/// Change another user's role or active flag.
///
/// # Access Control
/// - `Admin`, never on their own role or to deactivate themselves
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = ADMIN_TAG,
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<AdminUserPayloadDto>),
        (status = 400, description = "Cannot modify your own account", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let admin = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Permission::Admin])
        .await?;

    let user = AdminService::new(&state.db, &state.cache)
        .update_user(&admin.id, &id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "User updated successfully",
            AdminUserPayloadDto {
                user: user.into_admin_dto(),
            },
        )),
    ))
}
