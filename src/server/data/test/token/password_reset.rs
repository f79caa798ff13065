use super::*;

/// Tests marking a reset token as used.
///
/// Expected: used == true after mark_used
#[tokio::test]
async fn marks_token_used() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = PasswordResetTokenRepository::new(db);
    let token = repo
        .create(&user, "reset-1", Utc::now() + Duration::hours(1))
        .await?;
    assert!(!token.used);
    assert_eq!(token.email, user.email);

    repo.mark_used(&token.id).await?;

    let token = repo.find_by_token("reset-1").await?.unwrap();
    assert!(token.used);

    Ok(())
}

/// Tests purging expired and used reset tokens.
///
/// Expected: Ok(2) and only the fresh unused token remains
#[tokio::test]
async fn deletes_stale_tokens() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let now = Utc::now();
    factory::token::create_reset_token(db, &user, "expired", now - Duration::minutes(1)).await?;
    let used = factory::token::create_reset_token(db, &user, "used", now + Duration::hours(1)).await?;
    factory::token::create_reset_token(db, &user, "fresh", now + Duration::hours(1)).await?;

    let repo = PasswordResetTokenRepository::new(db);
    repo.mark_used(&used.id).await?;

    assert_eq!(repo.delete_stale(now).await?, 2);
    assert!(repo.find_by_token("fresh").await?.is_some());
    assert!(repo.find_by_token("expired").await?.is_none());

    Ok(())
}
