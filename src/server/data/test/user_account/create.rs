use super::*;

/// Tests creating a user.
///
/// Expected: Ok with an active user holding the given role
#[tokio::test]
async fn creates_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create("alice@example.com", "hash", Some("Alice".to_string()), Role::User)
        .await?;

    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.role, "USER");
    assert!(user.is_active);

    Ok(())
}

/// Tests that email lookup ignores the caller's casing.
///
/// Expected: Some for mixed-case input
#[tokio::test]
async fn finds_by_email_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create("bob@example.com", "hash", None, Role::User)
        .await?;

    let found = repo.find_by_email("Bob@Example.COM").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));

    Ok(())
}

/// Tests that the email column is unique.
///
/// Expected: Err on duplicate email
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    repo.create("dup@example.com", "hash", None, Role::User)
        .await?;
    let result = repo
        .create("dup@example.com", "hash", None, Role::User)
        .await;

    assert!(result.is_err());

    Ok(())
}
