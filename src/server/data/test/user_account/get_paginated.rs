use super::*;

/// Tests filtering users by a search term across email and name.
///
/// Expected: Ok with only matching users
#[tokio::test]
async fn filters_by_search_term() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .email("carol@example.com")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("someone@example.com")
        .name(Some("Carolyn"))
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .email("dave@example.com")
        .name(Some("Dave"))
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let (users, total) = repo
        .get_paginated(Some("carol"), PageRequest::new(None, None, 20, 100))
        .await?;

    assert_eq!(total, 2);
    assert_eq!(users.len(), 2);

    let (_, total) = repo
        .get_paginated(None, PageRequest::new(None, None, 20, 100))
        .await?;
    assert_eq!(total, 3);

    Ok(())
}
