use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::api::PaginationDto;

/// When a poll's tallies are shown to voters.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultVisibility {
    Always,
    AfterVote,
    AfterDeadline,
    Never,
}

impl ResultVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "ALWAYS",
            Self::AfterVote => "AFTER_VOTE",
            Self::AfterDeadline => "AFTER_DEADLINE",
            Self::Never => "NEVER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ALWAYS" => Some(Self::Always),
            "AFTER_VOTE" => Some(Self::AfterVote),
            "AFTER_DEADLINE" => Some(Self::AfterDeadline),
            "NEVER" => Some(Self::Never),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreatePollOptionDto {
    pub text: String,
    pub emoji: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PollSettingsDto {
    pub allow_multiple: Option<bool>,
    pub require_auth: Option<bool>,
    pub show_results: Option<ResultVisibility>,
    pub deadline: Option<DateTime<Utc>>,
    pub ip_restriction: Option<bool>,
    pub captcha_required: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct CreatePollDto {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<CreatePollOptionDto>,
    pub settings: Option<PollSettingsDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
pub struct UpdatePollDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub settings: Option<PollSettingsDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionDto {
    pub id: String,
    pub text: String,
    pub emoji: Option<String>,
    pub vote_count: i32,
    pub percentage: u32,
}

/// A poll together with its current tallies.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PollDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<PollOptionDto>,
    pub total_votes: i32,
    pub view_count: i32,
    pub share_url: String,
    pub deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub show_results: ResultVisibility,
    pub allow_multiple: bool,
    pub require_auth: bool,
    pub ip_restriction: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_voted: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PollPayloadDto {
    pub poll: PollDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ResultsPayloadDto {
    pub results: PollDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PaginatedPollsDto {
    pub polls: Vec<PollDto>,
    pub pagination: PaginationDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportReason {
    Spam,
    Inappropriate,
    Fraud,
    Other,
}

impl ReportReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "SPAM",
            Self::Inappropriate => "INAPPROPRIATE",
            Self::Fraud => "FRAUD",
            Self::Other => "OTHER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "SPAM" => Some(Self::Spam),
            "INAPPROPRIATE" => Some(Self::Inappropriate),
            "FRAUD" => Some(Self::Fraud),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ReportPollDto {
    pub reason: ReportReason,
    pub details: Option<String>,
}
