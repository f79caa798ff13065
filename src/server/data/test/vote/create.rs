use super::*;

/// Tests inserting a vote with every identity field.
///
/// Expected: Ok with the identities stored as given
#[tokio::test]
async fn creates_vote_with_identities() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, poll, options) = factory::helpers::create_poll_with_creator(db).await?;

    let repo = VoteRepository::new(db);
    let vote = repo
        .create(&CastVoteParams {
            poll_id: poll.id.clone(),
            option_id: options[1].id.clone(),
            user_id: Some(user.id.clone()),
            ip_address: Some("10.0.0.1".to_string()),
            session_id: Some("sess-1".to_string()),
            device_id: Some("dev-1".to_string()),
        })
        .await?;

    assert_eq!(vote.poll_id, poll.id);
    assert_eq!(vote.option_id, options[1].id);
    assert_eq!(vote.user_id, Some(user.id));
    assert_eq!(vote.ip_address.as_deref(), Some("10.0.0.1"));
    assert_eq!(vote.session_id.as_deref(), Some("sess-1"));
    assert_eq!(vote.device_id.as_deref(), Some("dev-1"));

    let found = repo.find_by_id(&vote.id).await?;
    assert_eq!(found, Some(vote));

    Ok(())
}
