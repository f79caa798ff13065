use super::*;

/// Tests resolving a report.
///
/// Expected: Ok(Some) with the new status and the reported poll attached
#[tokio::test]
async fn updates_status_and_returns_poll() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::create_poll(db).await?;
    let report = factory::create_report(db, &poll.id).await?;

    let repo = ReportRepository::new(db);
    let (updated, reported) = repo
        .update_status(&report.id, ReportStatus::Resolved)
        .await?
        .unwrap();

    assert_eq!(updated.status, "RESOLVED");
    assert_eq!(reported.map(|p| p.id), Some(poll.id));
    assert_eq!(repo.count_pending().await?, 0);

    Ok(())
}

/// Tests updating a missing report.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_report() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ReportRepository::new(db);
    let result = repo.update_status("missing", ReportStatus::Dismissed).await?;

    assert!(result.is_none());

    Ok(())
}
