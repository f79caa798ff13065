use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::model::{
    api::PaginationDto,
    poll::ReportReason,
    user::{Role, UserDto},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewDto {
    pub total_polls: u64,
    pub total_votes: u64,
    pub total_users: u64,
    pub active_polls: u64,
    pub pending_reports: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct TodayDto {
    pub polls: u64,
    pub votes: u64,
    pub users: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PollSummaryDto {
    pub id: String,
    pub title: String,
    pub share_url: String,
    pub total_votes: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDto {
    pub overview: OverviewDto,
    pub today: TodayDto,
    pub recent_polls: Vec<PollSummaryDto>,
    pub top_polls: Vec<PollSummaryDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Reviewed => "REVIEWED",
            Self::Resolved => "RESOLVED",
            Self::Dismissed => "DISMISSED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PENDING" => Some(Self::Pending),
            "REVIEWED" => Some(Self::Reviewed),
            "RESOLVED" => Some(Self::Resolved),
            "DISMISSED" => Some(Self::Dismissed),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportDto {
    pub id: String,
    pub poll_id: String,
    pub reason: ReportReason,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll: Option<PollSummaryDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ReportPayloadDto {
    pub report: ReportDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PaginatedReportsDto {
    pub reports: Vec<ReportDto>,
    pub pagination: PaginationDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct UpdateReportDto {
    pub status: ReportStatus,
}

/// A user row in the admin listing, with activity counts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub polls_count: u64,
    pub votes_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PaginatedUsersDto {
    pub users: Vec<AdminUserDto>,
    pub pagination: PaginationDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportsQueryDto {
    pub status: Option<ReportStatus>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UsersQueryDto {
    /// Substring of the email or name.
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct AdminUserPayloadDto {
    pub user: AdminUserDto,
}
