use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{api::PaginationDto, poll::PollDto};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteDto {
    pub option_id: String,
    pub session_id: Option<String>,
    pub device_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteDto {
    pub id: String,
    pub poll_id: String,
    pub option_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct CastVoteResultDto {
    pub success: bool,
    pub vote: VoteDto,
    pub results: PollDto,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct VoterDto {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// A vote as listed to administrators.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecordDto {
    pub id: String,
    pub option_id: String,
    pub option_text: Option<String>,
    pub voter: Option<VoterDto>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct PaginatedVotesDto {
    pub votes: Vec<VoteRecordDto>,
    pub pagination: PaginationDto,
}
