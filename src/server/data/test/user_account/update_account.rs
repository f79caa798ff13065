use super::*;

/// Tests an admin changing role and deactivating a user.
///
/// Expected: Ok with role ADMIN and is_active false
#[tokio::test]
async fn updates_role_and_active_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_account(
            user,
            UpdateUserParams {
                role: Some(Role::Admin),
                is_active: Some(false),
            },
        )
        .await?;

    assert_eq!(updated.role, "ADMIN");
    assert!(!updated.is_active);

    Ok(())
}

/// Tests that an empty update leaves the account unchanged.
///
/// Expected: Ok with original role and active flag
#[tokio::test]
async fn keeps_fields_when_not_provided() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update_account(user.clone(), UpdateUserParams::default())
        .await?;

    assert_eq!(updated.role, user.role);
    assert_eq!(updated.is_active, user.is_active);

    Ok(())
}
