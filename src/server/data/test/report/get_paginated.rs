use super::*;

/// Tests listing reports filtered by status.
///
/// Expected: Ok with only PENDING reports, each joined with its poll
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::create_poll(db).await?;
    factory::create_report(db, &poll.id).await?;
    factory::create_report(db, &poll.id).await?;
    factory::report::ReportFactory::new(db, &poll.id)
        .status("DISMISSED")
        .build()
        .await?;

    let repo = ReportRepository::new(db);
    let (reports, total) = repo
        .get_paginated(
            Some(ReportStatus::Pending),
            PageRequest::new(None, None, 20, 100),
        )
        .await?;

    assert_eq!(total, 2);
    assert_eq!(reports.len(), 2);
    for (report, reported) in &reports {
        assert_eq!(report.status, "PENDING");
        assert_eq!(reported.as_ref().map(|p| p.id.as_str()), Some(poll.id.as_str()));
    }

    let (_, total) = repo
        .get_paginated(None, PageRequest::new(None, None, 20, 100))
        .await?;
    assert_eq!(total, 3);

    Ok(())
}
