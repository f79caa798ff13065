use super::*;

fn params(options: &[&str]) -> CreatePollParams {
    CreatePollParams {
        title: "Lunch?".to_string(),
        description: Some("Pick one".to_string()),
        options: options
            .iter()
            .map(|text| NewPollOption {
                text: text.to_string(),
                emoji: None,
            })
            .collect(),
        settings: PollSettings::default(),
        creator_id: None,
    }
}

/// Tests creating a poll with its options.
///
/// Verifies that the poll row is inserted with zeroed counters and that options
/// receive positions matching their submission order.
///
/// Expected: Ok with poll and ordered options
#[tokio::test]
async fn creates_poll_with_ordered_options() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db);
    let (poll, options) = repo
        .create(&params(&["Pizza", "Sushi", "Tacos"]), "abcd1234")
        .await?;

    assert_eq!(poll.title, "Lunch?");
    assert_eq!(poll.share_url, "abcd1234");
    assert_eq!(poll.total_votes, 0);
    assert!(poll.is_active);
    assert_eq!(poll.show_results, "ALWAYS");
    assert_eq!(options.len(), 3);
    assert_eq!(options[0].text, "Pizza");
    assert_eq!(options[2].position, 2);
    assert!(options.iter().all(|o| o.vote_count == 0));

    let (_, stored) = repo.get_with_options(&poll.id).await?.unwrap();
    let texts: Vec<_> = stored.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(texts, vec!["Pizza", "Sushi", "Tacos"]);

    Ok(())
}

/// Tests that a duplicate share URL is rejected by the unique constraint.
///
/// Expected: Err on second insert, share_url_exists returns true
#[tokio::test]
async fn rejects_duplicate_share_url() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PollRepository::new(db);
    repo.create(&params(&["A", "B"]), "dupe0001").await?;

    assert!(repo.share_url_exists("dupe0001").await?);
    assert!(!repo.share_url_exists("other001").await?);

    let result = repo.create(&params(&["A", "B"]), "dupe0001").await;
    assert!(result.is_err());

    Ok(())
}

/// Tests looking a poll up by its share URL.
///
/// Expected: Some for the stored share URL, None for an unknown one
#[tokio::test]
async fn finds_by_share_url() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::poll::PollFactory::new(db)
        .share_url("share001")
        .build()
        .await?;

    let repo = PollRepository::new(db);
    let found = repo.find_by_share_url("share001").await?;
    assert_eq!(found.map(|p| p.id), Some(poll.id));
    assert!(repo.find_by_share_url("missing1").await?.is_none());

    Ok(())
}
