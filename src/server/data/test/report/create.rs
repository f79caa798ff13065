use super::*;

/// Tests filing a report.
///
/// Expected: Ok with status PENDING and the reporter's IP recorded
#[tokio::test]
async fn creates_pending_report() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_poll_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (poll, _) = factory::create_poll(db).await?;

    let repo = ReportRepository::new(db);
    let report = repo
        .create(CreateReportParams {
            poll_id: poll.id.clone(),
            reason: ReportReason::Inappropriate,
            details: Some("rude".to_string()),
            reporter_ip: Some("10.1.1.1".to_string()),
        })
        .await?;

    assert_eq!(report.poll_id, poll.id);
    assert_eq!(report.reason, "INAPPROPRIATE");
    assert_eq!(report.status, "PENDING");
    assert_eq!(report.reporter_ip.as_deref(), Some("10.1.1.1"));
    assert_eq!(repo.count_pending().await?, 1);

    Ok(())
}
