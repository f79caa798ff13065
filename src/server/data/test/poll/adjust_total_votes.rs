use super::*;

/// Tests incrementing and decrementing the poll vote total.
///
/// Expected: total moves by the given delta each call
#[tokio::test]
async fn adjusts_total_by_delta() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::create_poll(db).await?;
    let repo = PollRepository::new(db);

    repo.adjust_total_votes(&poll.id, 1).await?;
    repo.adjust_total_votes(&poll.id, 1).await?;
    repo.adjust_total_votes(&poll.id, -1).await?;

    let poll = repo.find_by_id(&poll.id).await?.unwrap();
    assert_eq!(poll.total_votes, 1);

    Ok(())
}

/// Tests the view counter increment.
///
/// Expected: view_count == 2 after two increments
#[tokio::test]
async fn increments_view_count() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::create_poll(db).await?;
    let repo = PollRepository::new(db);

    repo.increment_view_count(&poll.id).await?;
    repo.increment_view_count(&poll.id).await?;

    let poll = repo.find_by_id(&poll.id).await?.unwrap();
    assert_eq!(poll.view_count, 2);

    Ok(())
}
