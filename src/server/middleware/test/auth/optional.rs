use super::*;

/// Tests that a bad token on an optional route is treated as anonymous.
///
/// Expected: None
#[tokio::test]
async fn ignores_invalid_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let headers = bearer("not-a-jwt");

    assert!(AuthGuard::new(db, &keys, &headers).optional().await.is_none());
    Ok(())
}

/// Tests an optional route with a valid token.
///
/// Expected: Some(AuthUser)
#[tokio::test]
async fn identifies_caller() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let keys = keys();
    let user = factory::create_user(db).await?;
    let email = user.email.clone();
    let headers = bearer(&access_token(&keys, user));

    let caller = AuthGuard::new(db, &keys, &headers).optional().await;

    assert_eq!(caller.map(|c| c.email), Some(email));
    Ok(())
}
