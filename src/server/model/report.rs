//! Moderation report domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        admin::{PollSummaryDto, ReportDto, ReportStatus},
        poll::{ReportPollDto, ReportReason},
    },
    server::{
        error::{internal::InternalError, validation::ValidationError},
        util::validate,
    },
};

/// Short description of a poll for listings.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSummary {
    pub id: String,
    pub title: String,
    pub share_url: String,
    pub total_votes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl PollSummary {
    pub fn from_entity(entity: entity::poll::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            share_url: entity.share_url,
            total_votes: entity.total_votes,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PollSummaryDto {
        PollSummaryDto {
            id: self.id,
            title: self.title,
            share_url: self.share_url,
            total_votes: self.total_votes,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: String,
    pub poll_id: String,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Reported poll, when loaded alongside the report.
    pub poll: Option<PollSummary>,
}

impl Report {
    /// Converts a report row, optionally joined with its poll row.
    ///
    /// # Returns
    /// - `Err(InternalError::InvalidEnumValue)` - Stored reason or status is unknown
    pub fn from_entity(
        entity: entity::report::Model,
        poll: Option<entity::poll::Model>,
    ) -> Result<Self, InternalError> {
        let reason = ReportReason::parse(&entity.reason).ok_or(InternalError::InvalidEnumValue {
            column: "reports.reason",
            value: entity.reason.clone(),
        })?;
        let status = ReportStatus::parse(&entity.status).ok_or(InternalError::InvalidEnumValue {
            column: "reports.status",
            value: entity.status.clone(),
        })?;

        Ok(Self {
            id: entity.id,
            poll_id: entity.poll_id,
            reason,
            details: entity.details,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            poll: poll.map(PollSummary::from_entity),
        })
    }

    pub fn into_dto(self) -> ReportDto {
        ReportDto {
            id: self.id,
            poll_id: self.poll_id,
            reason: self.reason,
            details: self.details,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
            poll: self.poll.map(PollSummary::into_dto),
        }
    }
}

/// Parameters for filing a report against a poll.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateReportParams {
    pub poll_id: String,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub reporter_ip: Option<String>,
}

impl CreateReportParams {
    pub fn from_dto(
        poll_id: String,
        dto: ReportPollDto,
        reporter_ip: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        if let Some(details) = &dto.details {
            validate::max_length(&mut errors, "details", details, 1000);
        }
        errors.into_result()?;

        Ok(Self {
            poll_id,
            reason: dto.reason,
            details: dto.details,
            reporter_ip,
        })
    }
}
