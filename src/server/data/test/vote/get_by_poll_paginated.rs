use super::*;

/// Tests paginating a poll's votes.
///
/// Expected: Ok with votes for the poll only and the poll's total
#[tokio::test]
async fn returns_votes_for_poll() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, options) = factory::create_poll(db).await?;
    let (other_poll, other_options) = factory::create_poll(db).await?;
    for _ in 0..3 {
        factory::create_vote(db, &poll.id, &options[0].id).await?;
    }
    factory::create_vote(db, &other_poll.id, &other_options[0].id).await?;

    let repo = VoteRepository::new(db);
    let (votes, total) = repo
        .get_by_poll_paginated(&poll.id, PageRequest::new(Some(1), Some(2), 50, 100))
        .await?;

    assert_eq!(total, 3);
    assert_eq!(votes.len(), 2);
    assert!(votes.iter().all(|v| v.poll_id == poll.id));

    Ok(())
}

/// Tests counting votes since a cutoff and per user.
///
/// Expected: counts reflect only matching rows
#[tokio::test]
async fn counts_votes() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, poll, options) = factory::helpers::create_poll_with_creator(db).await?;
    factory::vote::VoteFactory::new(db, &poll.id, &options[0].id)
        .user_id(&user.id)
        .build()
        .await?;
    factory::create_vote(db, &poll.id, &options[1].id).await?;

    let repo = VoteRepository::new(db);
    assert_eq!(repo.count_all().await?, 2);
    assert_eq!(repo.count_by_user(&user.id).await?, 1);
    assert_eq!(repo.count_since(Utc::now() - Duration::hours(1)).await?, 2);
    assert_eq!(repo.count_since(Utc::now() + Duration::hours(1)).await?, 0);

    Ok(())
}
