use super::*;

/// Tests adjusting option and poll counters together, as a vote deletion does.
///
/// Expected: counters return to zero after +1 / -1
#[tokio::test]
async fn adjusts_option_and_poll_counters() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, options) = factory::create_poll(db).await?;
    factory::create_vote(db, &poll.id, &options[0].id).await?;

    let option_repo = PollOptionRepository::new(db);
    let poll_repo = PollRepository::new(db);

    option_repo.adjust_vote_count(&options[0].id, -1).await?;
    poll_repo.adjust_total_votes(&poll.id, -1).await?;

    let (poll, options) = poll_repo.get_with_options(&poll.id).await?.unwrap();
    assert_eq!(poll.total_votes, 0);
    assert_eq!(options[0].vote_count, 0);
    assert_eq!(options[1].vote_count, 0);

    Ok(())
}
