use super::*;

/// Tests storing and revoking a refresh token.
///
/// Expected: token found after create, gone after delete_by_token
#[tokio::test]
async fn creates_and_revokes_token() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = RefreshTokenRepository::new(db);
    repo.create(&user.id, "refresh-1", Utc::now() + Duration::days(7))
        .await?;

    let stored = repo.find_by_token("refresh-1").await?.unwrap();
    assert_eq!(stored.user_id, user.id);

    assert_eq!(repo.delete_by_token("refresh-1").await?, 1);
    assert!(repo.find_by_token("refresh-1").await?.is_none());

    Ok(())
}

/// Tests revoking every token of a user.
///
/// Expected: only the user's tokens are removed
#[tokio::test]
async fn deletes_all_tokens_of_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let expires = Utc::now() + Duration::days(7);
    factory::token::create_refresh_token(db, &user.id, "a", expires).await?;
    factory::token::create_refresh_token(db, &user.id, "b", expires).await?;
    factory::token::create_refresh_token(db, &other.id, "c", expires).await?;

    let repo = RefreshTokenRepository::new(db);
    assert_eq!(repo.delete_by_user(&user.id).await?, 2);
    assert!(repo.find_by_token("c").await?.is_some());

    Ok(())
}

/// Tests purging expired refresh tokens.
///
/// Expected: Ok(1) and the unexpired token survives
#[tokio::test]
async fn deletes_expired_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    factory::token::create_refresh_token(db, &user.id, "old", now - Duration::hours(1)).await?;
    factory::token::create_refresh_token(db, &user.id, "new", now + Duration::hours(1)).await?;

    let repo = RefreshTokenRepository::new(db);
    assert_eq!(repo.delete_expired(now).await?, 1);
    assert!(repo.find_by_token("new").await?.is_some());

    Ok(())
}
