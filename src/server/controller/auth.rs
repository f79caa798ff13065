use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        auth::{
            AuthPayloadDto, ChangePasswordDto, ForgotPasswordDto, LoginDto, LogoutDto,
            RefreshTokenDto, RegisterDto, ResetPasswordDto, TokensPayloadDto,
        },
        user::UserPayloadDto,
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::user::RegisterParams,
        service::auth::AuthService, state::AppState, util::json::JsonBody,
    },
};

/// Tag for grouping auth endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Create an account and sign in.
///
/// # Returns
/// - `201 Created` - Account created, user and token pair returned
/// - `400 Bad Request` - Invalid email, short password or bad name
/// - `409 Conflict` - Email already registered
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Registration successful", body = ApiResponse<AuthPayloadDto>),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 409, description = "Email already registered", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = RegisterParams::from_dto(payload)?;

    let session = AuthService::new(&state.db, &state.tokens)
        .register(params)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Registration successful",
            session.into_dto(),
        )),
    ))
}

/// Sign in with email and password.
///
/// # Returns
/// - `200 OK` - User and token pair
/// - `401 Unauthorized` - Invalid email or password
/// - `403 Forbidden` - Account is deactivated
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthPayloadDto>),
        (status = 401, description = "Invalid email or password", body = ErrorDto),
        (status = 403, description = "Account is deactivated", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let session = AuthService::new(&state.db, &state.tokens)
        .login(&payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message("Login successful", session.into_dto())),
    ))
}

/// Exchange a refresh token for a new token pair.
///
/// The presented refresh token is revoked.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenDto,
    responses(
        (status = 200, description = "Tokens refreshed", body = ApiResponse<TokensPayloadDto>),
        (status = 401, description = "Refresh token invalid or expired", body = ErrorDto)
    ),
)]
pub async fn refresh(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RefreshTokenDto>,
) -> Result<impl IntoResponse, AppError> {
    let tokens = AuthService::new(&state.db, &state.tokens)
        .refresh(&payload.refresh_token)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::with_message(
            "Tokens refreshed",
            TokensPayloadDto {
                tokens: tokens.into_dto(),
            },
        )),
    ))
}

/// Revoke one refresh token. Succeeds whether or not the token exists.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    request_body = LogoutDto,
    responses(
        (status = 200, description = "Logout successful")
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LogoutDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.tokens)
        .logout(payload.refresh_token.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::message("Logout successful"))))
}

/// Revoke every refresh token of the caller.
#[utoipa::path(
    post,
    path = "/api/auth/logout-all",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out from all devices"),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn logout_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.tokens)
        .logout_all(&user.id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Logged out from all devices")),
    ))
}

/// Change the caller's password and sign out every session.
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed successfully"),
        (status = 400, description = "Validation failed", body = ErrorDto),
        (status = 401, description = "Current password is incorrect", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    JsonBody(payload): JsonBody<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    AuthService::new(&state.db, &state.tokens)
        .change_password(&user.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Password changed successfully")),
    ))
}

/// Start a password reset.
///
/// Always answers with the same message so account existence is not revealed.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset link issued if the account exists")
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.tokens)
        .forgot_password(&payload.email, &state.config.frontend_url)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message(
            "If an account exists with this email, a password reset link has been sent.",
        )),
    ))
}

/// Complete a password reset with the emailed token.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset"),
        (status = 400, description = "Invalid or expired reset token", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthService::new(&state.db, &state.tokens)
        .reset_password(&payload.token, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message(
            "Password reset successfully. Please login with your new password.",
        )),
    ))
}

/// Get the signed-in user.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserPayloadDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer" = [])),
)]
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = AuthService::new(&state.db, &state.tokens).me(&user.id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::data(UserPayloadDto {
            user: user.into_dto(),
        })),
    ))
}
