use super::*;

/// Tests paginating a creator's polls newest first.
///
/// Verifies that only the creator's polls are returned, in descending creation
/// order, each carrying its own options.
///
/// Expected: Ok with 2 polls on page 1 of 3 total
#[tokio::test]
async fn returns_creator_polls_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let now = Utc::now();

    for (i, title) in ["Oldest", "Middle", "Newest"].iter().enumerate() {
        factory::poll::PollFactory::new(db)
            .title(*title)
            .creator_id(&user.id)
            .created_at(now + Duration::minutes(i as i64))
            .build()
            .await?;
    }
    factory::poll::PollFactory::new(db)
        .creator_id(&other.id)
        .build()
        .await?;

    let repo = PollRepository::new(db);
    let (polls, total) = repo
        .get_by_creator_paginated(&user.id, PageRequest::new(Some(1), Some(2), 10, 50))
        .await?;

    assert_eq!(total, 3);
    assert_eq!(polls.len(), 2);
    assert_eq!(polls[0].0.title, "Newest");
    assert_eq!(polls[1].0.title, "Middle");
    for (poll, options) in &polls {
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|o| o.poll_id == poll.id));
    }

    Ok(())
}

/// Tests a page beyond the last page.
///
/// Expected: Ok with empty page and correct total
#[tokio::test]
async fn returns_empty_page_past_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, _, _) = factory::helpers::create_poll_with_creator(db).await?;

    let repo = PollRepository::new(db);
    let (polls, total) = repo
        .get_by_creator_paginated(&user.id, PageRequest::new(Some(5), Some(10), 10, 50))
        .await?;

    assert_eq!(total, 1);
    assert!(polls.is_empty());

    Ok(())
}
