use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, SqlErr, TransactionTrait};

use crate::{
    model::{
        poll::ReportPollDto,
        socket::{PollRoomDto, ServerEvent},
    },
    server::{
        cache::{keys, CacheHandle},
        data::{
            poll::{PollRepository, PollWithOptions},
            report::ReportRepository,
        },
        error::AppError,
        model::{
            pagination::{Page, PageRequest},
            poll::{CreatePollParams, Poll, UpdatePollParams},
            report::{CreateReportParams, Report},
            vote::IdentityKind,
        },
        util::share_url::generate_share_url,
    },
};

/// Attempts at finding an unused share URL before giving up.
const SHARE_URL_ATTEMPTS: usize = 5;

/// A poll as seen by one viewer.
#[derive(Debug, Clone)]
pub struct PollView {
    pub poll: Poll,
    /// Whether the viewer's IP carries a vote marker for the poll; `None` when unknown.
    pub has_voted: Option<bool>,
}

pub struct PollService<'a> {
    db: &'a DatabaseConnection,
    cache: &'a CacheHandle,
}

impl<'a> PollService<'a> {
    pub fn new(db: &'a DatabaseConnection, cache: &'a CacheHandle) -> Self {
        Self { db, cache }
    }

    /// Creates a poll with its options under a freshly generated share URL.
    ///
    /// The share URL is regenerated when it already exists, or when the insert
    /// loses a race on the unique column, up to five times.
    pub async fn create(&self, params: CreatePollParams) -> Result<Poll, AppError> {
        for attempt in 1..=SHARE_URL_ATTEMPTS {
            let share_url = generate_share_url();

            if PollRepository::new(self.db)
                .share_url_exists(&share_url)
                .await?
            {
                tracing::debug!("Share URL collision on attempt {}", attempt);
                continue;
            }

            match self.insert_poll(&params, &share_url).await {
                Ok((poll, options)) => {
                    tracing::info!("Created poll {} ({})", poll.id, poll.share_url);
                    return Ok(Poll::from_entity(poll, options)?);
                }
                Err(err) if is_unique_violation(&err) => {
                    tracing::debug!("Share URL race on attempt {}: {}", attempt, err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(AppError::InternalError(
            "Failed to generate a unique share URL".to_string(),
        ))
    }

    async fn insert_poll(
        &self,
        params: &CreatePollParams,
        share_url: &str,
    ) -> Result<PollWithOptions, DbErr> {
        let txn = self.db.begin().await?;
        let created = PollRepository::new(&txn).create(params, share_url).await?;
        txn.commit().await?;

        Ok(created)
    }

    /// Resolves a poll ID or share URL to the poll row.
    pub async fn resolve_identifier(
        &self,
        id_or_share_url: &str,
    ) -> Result<entity::poll::Model, AppError> {
        let repo = PollRepository::new(self.db);

        if let Some(poll) = repo.find_by_id(id_or_share_url).await? {
            return Ok(poll);
        }
        if let Some(poll) = repo.find_by_share_url(id_or_share_url).await? {
            return Ok(poll);
        }

        Err(poll_not_found())
    }

    /// Gets a poll by ID or share URL and records the view.
    pub async fn get_by_id(
        &self,
        id_or_share_url: &str,
        viewer_ip: Option<&str>,
    ) -> Result<PollView, AppError> {
        let poll = self.resolve_identifier(id_or_share_url).await?;
        self.view(&poll.id, viewer_ip).await
    }

    /// Gets a poll by share URL only and records the view.
    pub async fn get_by_share_url(
        &self,
        share_url: &str,
        viewer_ip: Option<&str>,
    ) -> Result<PollView, AppError> {
        let poll = PollRepository::new(self.db)
            .find_by_share_url(share_url)
            .await?
            .ok_or_else(poll_not_found)?;

        self.view(&poll.id, viewer_ip).await
    }

    async fn view(&self, poll_id: &str, viewer_ip: Option<&str>) -> Result<PollView, AppError> {
        let repo = PollRepository::new(self.db);
        repo.increment_view_count(poll_id).await?;

        let poll = self.load(poll_id).await?;

        let has_voted = match viewer_ip {
            Some(ip) => Some(
                self.cache
                    .has_voted(&keys::vote_scope(poll_id, None), IdentityKind::Ip, ip)
                    .await,
            ),
            None => None,
        };

        Ok(PollView { poll, has_voted })
    }

    /// Gets the polls created by a user, newest first.
    pub async fn get_user_polls(
        &self,
        user_id: &str,
        request: PageRequest,
    ) -> Result<Page<Poll>, AppError> {
        let (polls, total) = PollRepository::new(self.db)
            .get_by_creator_paginated(user_id, request)
            .await?;

        let polls = polls
            .into_iter()
            .map(|(poll, options)| Poll::from_entity(poll, options))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(polls, total, request))
    }

    /// Updates a poll's text and settings.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Caller is not the creator
    /// - `Err(AppError::BadRequest)` - The poll already has votes
    pub async fn update(
        &self,
        id_or_share_url: &str,
        user_id: &str,
        params: UpdatePollParams,
    ) -> Result<Poll, AppError> {
        let poll = self.resolve_identifier(id_or_share_url).await?;

        if poll.creator_id.as_deref() != Some(user_id) {
            return Err(AppError::Forbidden(
                "Not authorized to update this poll".to_string(),
            ));
        }
        if poll.total_votes > 0 {
            return Err(AppError::BadRequest(
                "Cannot modify poll with existing votes".to_string(),
            ));
        }

        let poll_id = poll.id.clone();
        PollRepository::new(self.db).update(poll, params).await?;
        self.cache.invalidate_results(&poll_id).await;

        self.load(&poll_id).await
    }

    /// Deletes a poll. Admins may delete any poll.
    pub async fn delete(
        &self,
        id_or_share_url: &str,
        user_id: &str,
        is_admin: bool,
    ) -> Result<(), AppError> {
        let poll = self.resolve_identifier(id_or_share_url).await?;

        if !is_admin && poll.creator_id.as_deref() != Some(user_id) {
            return Err(AppError::Forbidden(
                "Not authorized to delete this poll".to_string(),
            ));
        }

        PollRepository::new(self.db).delete(&poll.id).await?;
        self.cache.invalidate_results(&poll.id).await;

        tracing::info!("Deleted poll {} by {}", poll.id, user_id);
        Ok(())
    }

    /// Closes a poll to further votes and notifies live viewers.
    pub async fn close(&self, id_or_share_url: &str, user_id: &str) -> Result<Poll, AppError> {
        let poll = self.resolve_identifier(id_or_share_url).await?;

        if poll.creator_id.as_deref() != Some(user_id) {
            return Err(AppError::Forbidden(
                "Not authorized to close this poll".to_string(),
            ));
        }

        PollRepository::new(self.db)
            .set_active(&poll.id, false)
            .await?;
        self.after_close(&poll.id).await;

        self.load(&poll.id).await
    }

    /// Closes every active poll whose deadline passed before `now`.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of polls closed
    pub async fn close_expired(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let repo = PollRepository::new(self.db);
        let expired = repo.find_expired_active(now).await?;

        for poll in &expired {
            repo.set_active(&poll.id, false).await?;
            self.after_close(&poll.id).await;
        }

        Ok(expired.len())
    }

    async fn after_close(&self, poll_id: &str) {
        self.cache.invalidate_results(poll_id).await;
        self.cache
            .publish(&ServerEvent::PollClosed(PollRoomDto {
                poll_id: poll_id.to_string(),
            }))
            .await;
    }

    /// Current results, served from the short-lived cache when possible.
    pub async fn get_results(&self, poll_id: &str) -> Result<Poll, AppError> {
        if let Some(poll) = self.cache.get_results(poll_id).await {
            return Ok(poll);
        }

        let poll = self.load(poll_id).await?;
        self.cache.set_results(&poll).await;

        Ok(poll)
    }

    /// Files an abuse report against a poll.
    pub async fn report(
        &self,
        id_or_share_url: &str,
        dto: ReportPollDto,
        reporter_ip: Option<String>,
    ) -> Result<Report, AppError> {
        let poll = self.resolve_identifier(id_or_share_url).await?;
        let params = CreateReportParams::from_dto(poll.id.clone(), dto, reporter_ip)?;

        let report = ReportRepository::new(self.db).create(params).await?;
        tracing::info!("Poll {} reported as {}", poll.id, report.reason);

        Ok(Report::from_entity(report, None)?)
    }

    async fn load(&self, poll_id: &str) -> Result<Poll, AppError> {
        let (poll, options) = PollRepository::new(self.db)
            .get_with_options(poll_id)
            .await?
            .ok_or_else(poll_not_found)?;

        Ok(Poll::from_entity(poll, options)?)
    }
}

pub(crate) fn poll_not_found() -> AppError {
    AppError::NotFound("Poll not found".to_string())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
