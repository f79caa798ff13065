//! Vote domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::vote::{CastVoteResultDto, VoteDto, VoteRecordDto, VoterDto},
    server::model::poll::Poll,
};

/// Identity schemes whose duplicate votes are tracked by cache markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    Ip,
    Session,
    Device,
}

impl IdentityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Session => "session",
            Self::Device => "device",
        }
    }
}

/// A ballot request with every identity the caller presented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CastVoteParams {
    pub poll_id: String,
    pub option_id: String,
    pub user_id: Option<String>,
    pub ip_address: Option<String>,
    pub session_id: Option<String>,
    pub device_id: Option<String>,
}

/// Stored vote as returned to the voter.
#[derive(Debug, Clone, PartialEq)]
pub struct Vote {
    pub id: String,
    pub poll_id: String,
    pub option_id: String,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn from_entity(entity: entity::vote::Model) -> Self {
        Self {
            id: entity.id,
            poll_id: entity.poll_id,
            option_id: entity.option_id,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> VoteDto {
        VoteDto {
            id: self.id,
            poll_id: self.poll_id,
            option_id: self.option_id,
            created_at: self.created_at,
        }
    }
}

/// Outcome of a successful vote: the stored ballot and fresh results.
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub vote: Vote,
    pub results: Poll,
}

impl VoteOutcome {
    pub fn into_dto(self) -> CastVoteResultDto {
        CastVoteResultDto {
            success: true,
            vote: self.vote.into_dto(),
            results: self.results.into_dto(None),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Voter {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// A vote with its option text and voter, for admin listings.
#[derive(Debug, Clone, PartialEq)]
pub struct VoteRecord {
    pub id: String,
    pub option_id: String,
    pub option_text: Option<String>,
    pub voter: Option<Voter>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VoteRecord {
    /// Joins a vote row with its already loaded option and voter rows.
    pub fn from_entity(
        vote: entity::vote::Model,
        option: Option<&entity::poll_option::Model>,
        voter: Option<&entity::user::Model>,
    ) -> Self {
        Self {
            id: vote.id,
            option_id: vote.option_id,
            option_text: option.map(|o| o.text.clone()),
            voter: voter.map(|u| Voter {
                id: u.id.clone(),
                email: u.email.clone(),
                name: u.name.clone(),
            }),
            ip_address: vote.ip_address,
            created_at: vote.created_at,
        }
    }

    pub fn into_dto(self) -> VoteRecordDto {
        VoteRecordDto {
            id: self.id,
            option_id: self.option_id,
            option_text: self.option_text,
            voter: self.voter.map(|v| VoterDto {
                id: v.id,
                email: v.email,
                name: v.name,
            }),
            ip_address: self.ip_address,
            created_at: self.created_at,
        }
    }
}
