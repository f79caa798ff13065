use super::*;

/// Tests selecting active polls whose deadline has passed.
///
/// Verifies that future deadlines, polls without a deadline and already
/// closed polls are excluded.
///
/// Expected: Ok with only the expired active poll
#[tokio::test]
async fn returns_only_expired_active_polls() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let (expired, _) = factory::poll::PollFactory::new(db)
        .deadline(now - Duration::minutes(5))
        .build()
        .await?;
    factory::poll::PollFactory::new(db)
        .deadline(now + Duration::hours(1))
        .build()
        .await?;
    factory::poll::PollFactory::new(db)
        .deadline(now - Duration::hours(1))
        .active(false)
        .build()
        .await?;
    factory::create_poll(db).await?;

    let repo = PollRepository::new(db);
    let polls = repo.find_expired_active(now).await?;

    assert_eq!(polls.len(), 1);
    assert_eq!(polls[0].id, expired.id);

    Ok(())
}
