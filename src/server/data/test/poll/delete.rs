use super::*;

/// Tests that deleting a poll removes its options, votes and reports.
///
/// Expected: Ok(1) and no dependent rows remain
#[tokio::test]
async fn deletes_poll_and_dependents() -> Result<(), DbErr> {
    use sea_orm::{EntityTrait, PaginatorTrait};

    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, options) = factory::create_poll(db).await?;
    factory::create_vote(db, &poll.id, &options[0].id).await?;
    factory::create_report(db, &poll.id).await?;

    let repo = PollRepository::new(db);
    let deleted = repo.delete(&poll.id).await?;

    assert_eq!(deleted, 1);
    assert!(repo.find_by_id(&poll.id).await?.is_none());
    assert_eq!(entity::prelude::PollOption::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Vote::find().count(db).await?, 0);
    assert_eq!(entity::prelude::Report::find().count(db).await?, 0);

    Ok(())
}

/// Tests deleting a poll that does not exist.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_for_missing_poll() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db);
    assert_eq!(repo.delete("missing").await?, 0);

    Ok(())
}
