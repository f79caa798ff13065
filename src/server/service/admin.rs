//! Administrative service for moderation and dashboard figures.
//!
//! Every method here assumes the caller already passed the admin guard.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::admin::ReportStatus,
    server::{
        cache::CacheHandle,
        data::{
            poll::PollRepository, report::ReportRepository, user::UserRepository,
            vote::VoteRepository,
        },
        error::AppError,
        model::{
            analytics::{Analytics, Overview, Today},
            pagination::{Page, PageRequest},
            report::{PollSummary, Report},
            user::{UpdateUserParams, UserWithCounts},
        },
        service::{
            poll::PollService,
            user::{user_not_found, with_counts},
        },
    },
};

const RECENT_POLLS: u64 = 10;
const TOP_POLLS: u64 = 5;

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a CacheHandle,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a CacheHandle) -> Self {
        Self { db, cache }
    }

    /// Builds the dashboard: totals, today's activity and notable polls.
    ///
    /// "Today" starts at midnight UTC.
    pub async fn analytics(&self) -> Result<Analytics, AppError> {
        let poll_repo = PollRepository::new(self.db);
        let vote_repo = VoteRepository::new(self.db);
        let user_repo = UserRepository::new(self.db);

        let overview = Overview {
            total_polls: poll_repo.count_all().await?,
            total_votes: vote_repo.count_all().await?,
            total_users: user_repo.count_all().await?,
            active_polls: poll_repo.count_active().await?,
            pending_reports: ReportRepository::new(self.db).count_pending().await?,
        };

        let midnight = start_of_day(Utc::now());
        let today = Today {
            polls: poll_repo.count_created_since(midnight).await?,
            votes: vote_repo.count_since(midnight).await?,
            users: user_repo.count_since(midnight).await?,
        };

        let recent_polls = poll_repo
            .get_recent(RECENT_POLLS)
            .await?
            .into_iter()
            .map(PollSummary::from_entity)
            .collect();
        let top_polls = poll_repo
            .get_top_by_votes(TOP_POLLS)
            .await?
            .into_iter()
            .map(PollSummary::from_entity)
            .collect();

        Ok(Analytics {
            overview,
            today,
            recent_polls,
            top_polls,
        })
    }

    /// Lists reports newest first, optionally filtered by status.
    pub async fn get_reports(
        &self,
        status: Option<ReportStatus>,
        request: PageRequest,
    ) -> Result<Page<Report>, AppError> {
        let (reports, total) = ReportRepository::new(self.db)
            .get_paginated(status, request)
            .await?;

        let reports = reports
            .into_iter()
            .map(|(report, poll)| Report::from_entity(report, poll))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(reports, total, request))
    }

    /// Moves a report to a new moderation status.
    ///
    /// # Returns
    /// - `Ok(Report)` - The updated report with its poll
    /// - `Err(AppError::NotFound)` - No report with that ID
    pub async fn update_report_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> Result<Report, AppError> {
        let (report, poll) = ReportRepository::new(self.db)
            .update_status(report_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

        tracing::info!("Report {} marked {}", report_id, status.as_str());
        Ok(Report::from_entity(report, poll)?)
    }

    /// Deletes any poll regardless of its creator.
    pub async fn delete_poll(&self, poll_id: &str, admin_id: &str) -> Result<(), AppError> {
        PollService::new(self.db, self.cache)
            .delete(poll_id, admin_id, true)
            .await
    }

    /// Lists accounts with their poll and vote counts.
    ///
    /// `search` matches a substring of the email or name.
    pub async fn get_users(
        &self,
        search: Option<&str>,
        request: PageRequest,
    ) -> Result<Page<UserWithCounts>, AppError> {
        let (users, total) = UserRepository::new(self.db)
            .get_paginated(search, request)
            .await?;

        let mut items = Vec::with_capacity(users.len());
        for user in users {
            items.push(with_counts(self.db, user).await?);
        }

        Ok(Page::new(items, total, request))
    }

    /// Changes another user's role or active flag.
    ///
    /// # Returns
    /// - `Ok(UserWithCounts)` - The updated account
    /// - `Err(AppError::BadRequest)` - An admin tried to deactivate or re-role themselves
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn update_user(
        &self,
        admin_id: &str,
        user_id: &str,
        params: UpdateUserParams,
    ) -> Result<UserWithCounts, AppError> {
        let touches_self = admin_id == user_id
            && (params.is_active == Some(false) || params.role.is_some());
        if touches_self {
            return Err(AppError::BadRequest(
                "Cannot modify your own account".to_string(),
            ));
        }

        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(user_not_found)?;
        let user = user_repo.update_account(user, params).await?;

        tracing::info!("Admin {} updated user {}", admin_id, user_id);
        with_counts(self.db, user).await
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
        .unwrap_or(now)
}
