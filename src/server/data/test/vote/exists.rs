use super::*;

/// Tests poll-wide duplicate detection for users.
///
/// Expected: true for the voter in any option scope of the poll, false for others
#[tokio::test]
async fn detects_user_vote_in_poll_scope() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (user, poll, options) = factory::helpers::create_poll_with_creator(db).await?;
    let other = factory::create_user(db).await?;
    factory::vote::VoteFactory::new(db, &poll.id, &options[0].id)
        .user_id(&user.id)
        .build()
        .await?;

    let repo = VoteRepository::new(db);
    assert!(repo.exists_for_user(&poll.id, None, &user.id).await?);
    assert!(!repo.exists_for_user(&poll.id, None, &other.id).await?);

    assert!(
        repo.exists_for_user(&poll.id, Some(&options[0].id), &user.id)
            .await?
    );
    assert!(
        !repo
            .exists_for_user(&poll.id, Some(&options[1].id), &user.id)
            .await?
    );

    Ok(())
}

/// Tests duplicate detection by IP address.
///
/// Expected: true only for the stored address within the same poll
#[tokio::test]
async fn detects_ip_vote() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, options) = factory::create_poll(db).await?;
    let (other_poll, _) = factory::create_poll(db).await?;
    factory::vote::VoteFactory::new(db, &poll.id, &options[0].id)
        .ip_address("192.168.1.10")
        .build()
        .await?;

    let repo = VoteRepository::new(db);
    assert!(repo.exists_for_ip(&poll.id, None, "192.168.1.10").await?);
    assert!(!repo.exists_for_ip(&poll.id, None, "192.168.1.11").await?);
    assert!(
        !repo
            .exists_for_ip(&other_poll.id, None, "192.168.1.10")
            .await?
    );

    Ok(())
}
