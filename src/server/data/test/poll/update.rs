use super::*;

/// Tests a partial update of poll settings.
///
/// Verifies that provided fields change and omitted fields keep their values.
///
/// Expected: Ok with only the provided fields changed
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::poll::PollFactory::new(db)
        .title("Original")
        .build()
        .await?;

    let repo = PollRepository::new(db);
    let updated = repo
        .update(
            poll.clone(),
            UpdatePollParams {
                title: Some("Renamed".to_string()),
                show_results: Some(ResultVisibility::AfterVote),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.show_results, "AFTER_VOTE");
    assert_eq!(updated.allow_multiple, poll.allow_multiple);
    assert_eq!(updated.ip_restriction, poll.ip_restriction);
    assert_eq!(updated.share_url, poll.share_url);

    Ok(())
}

/// Tests closing a poll.
///
/// Expected: is_active == false
#[tokio::test]
async fn sets_active_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::create_poll(db).await?;
    let repo = PollRepository::new(db);

    repo.set_active(&poll.id, false).await?;

    let poll = repo.find_by_id(&poll.id).await?.unwrap();
    assert!(!poll.is_active);

    Ok(())
}
