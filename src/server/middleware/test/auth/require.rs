use super::*;

/// Tests a request without an Authorization header.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let headers = HeaderMap::new();

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
    Ok(())
}

/// Tests a header that is not a bearer credential.
///
/// Expected: Err(AuthError::MissingToken)
#[tokio::test]
async fn rejects_non_bearer_scheme() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingToken))
    ));
    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_forged_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let user = factory::create_user(db).await?;

    let forger = TokenKeys::new(
        "other-secret",
        "refresh-secret",
        Duration::minutes(15),
        Duration::days(7),
    );
    let headers = bearer(&access_token(&forger, user));

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken))
    ));
    Ok(())
}

/// Tests an expired access token.
///
/// Expected: Err(AuthError::TokenExpired)
#[tokio::test]
async fn rejects_expired_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let user = factory::create_user(db).await?;

    let stale = TokenKeys::new(
        "access-secret",
        "refresh-secret",
        Duration::minutes(-5),
        Duration::days(7),
    );
    let headers = bearer(&access_token(&stale, user));

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::TokenExpired))
    ));
    Ok(())
}

/// Tests a valid token whose user was deactivated after issue.
///
/// Expected: Err(AuthError::UserInactive)
#[tokio::test]
async fn rejects_deactivated_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let user = factory::user::UserFactory::new(db)
        .active(false)
        .build()
        .await?;
    let headers = bearer(&access_token(&keys, user));

    let result = AuthGuard::new(db, &keys, &headers).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserInactive))
    ));
    Ok(())
}

/// Tests a regular user against the admin permission.
///
/// Expected: Err(AuthError::AccessDenied) carrying the user id
#[tokio::test]
async fn denies_admin_permission_to_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let user = factory::create_user(db).await?;
    let user_id = user.id.clone();
    let headers = bearer(&access_token(&keys, user));

    let result = AuthGuard::new(db, &keys, &headers)
        .require(&[Permission::Admin])
        .await;

    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied(denied))) => assert_eq!(denied, user_id),
        other => panic!("expected AccessDenied, got {:?}", other),
    }
    Ok(())
}

/// Tests an admin with a valid token.
///
/// Expected: Ok(AuthUser) with the admin role
#[tokio::test]
async fn grants_admin_permission() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let admin = factory::create_admin(db).await?;
    let admin_id = admin.id.clone();
    let headers = bearer(&access_token(&keys, admin));

    let user = AuthGuard::new(db, &keys, &headers)
        .require(&[Permission::Admin])
        .await?;

    assert_eq!(user.id, admin_id);
    assert!(user.is_admin());
    Ok(())
}
