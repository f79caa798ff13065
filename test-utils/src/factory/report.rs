//! Report factory for creating moderation reports.

use crate::factory::helpers::new_uuid;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ReportFactory<'a> {
    db: &'a DatabaseConnection,
    poll_id: String,
    reason: String,
    status: String,
    details: Option<String>,
}

impl<'a> ReportFactory<'a> {
    /// Defaults to a `SPAM` report in `PENDING` status.
    pub fn new(db: &'a DatabaseConnection, poll_id: &str) -> Self {
        Self {
            db,
            poll_id: poll_id.to_string(),
            reason: "SPAM".to_string(),
            status: "PENDING".to_string(),
            details: None,
        }
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub async fn build(self) -> Result<entity::report::Model, DbErr> {
        let now = Utc::now();
        entity::report::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            poll_id: ActiveValue::Set(self.poll_id),
            reason: ActiveValue::Set(self.reason),
            details: ActiveValue::Set(self.details),
            status: ActiveValue::Set(self.status),
            reporter_ip: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

pub async fn create_report(
    db: &DatabaseConnection,
    poll_id: &str,
) -> Result<entity::report::Model, DbErr> {
    ReportFactory::new(db, poll_id).build().await
}
