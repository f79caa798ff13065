use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::admin::ReportStatus,
    server::model::{pagination::PageRequest, report::CreateReportParams},
};

pub type ReportWithPoll = (entity::report::Model, Option<entity::poll::Model>);

pub struct ReportRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReportRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Files a new report in `PENDING` status.
    pub async fn create(&self, params: CreateReportParams) -> Result<entity::report::Model, DbErr> {
        let now = Utc::now();
        entity::report::ActiveModel {
            id: ActiveValue::Set(uuid::Uuid::new_v4().to_string()),
            poll_id: ActiveValue::Set(params.poll_id),
            reason: ActiveValue::Set(params.reason.as_str().to_string()),
            details: ActiveValue::Set(params.details),
            status: ActiveValue::Set(ReportStatus::Pending.as_str().to_string()),
            reporter_ip: ActiveValue::Set(params.reporter_ip),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }

    /// Sets the report status and returns the report with its poll.
    ///
    /// # Returns
    /// - `Ok(None)` - No report with that ID
    pub async fn update_status(
        &self,
        id: &str,
        status: ReportStatus,
    ) -> Result<Option<ReportWithPoll>, DbErr> {
        let Some(report) = entity::prelude::Report::find_by_id(id.to_string())
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::report::ActiveModel = report.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());
        let report = active.update(self.db).await?;

        let poll = entity::prelude::Poll::find_by_id(report.poll_id.clone())
            .one(self.db)
            .await?;

        Ok(Some((report, poll)))
    }

    /// Gets reports, newest first, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        status: Option<ReportStatus>,
        request: PageRequest,
    ) -> Result<(Vec<ReportWithPoll>, u64), DbErr> {
        let mut query = entity::prelude::Report::find();
        if let Some(status) = status {
            query = query.filter(entity::report::Column::Status.eq(status.as_str()));
        }

        let total = query.clone().count(self.db).await?;

        let reports = query
            .find_also_related(entity::prelude::Poll)
            .order_by_desc(entity::report::Column::CreatedAt)
            .offset(request.offset())
            .limit(request.limit)
            .all(self.db)
            .await?;

        Ok((reports, total))
    }

    pub async fn count_pending(&self) -> Result<u64, DbErr> {
        entity::prelude::Report::find()
            .filter(entity::report::Column::Status.eq(ReportStatus::Pending.as_str()))
            .count(self.db)
            .await
    }
}
