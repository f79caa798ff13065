//! Admin dashboard figures.

use crate::{
    model::admin::{AnalyticsDto, OverviewDto, TodayDto},
    server::model::report::PollSummary,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_polls: u64,
    pub total_votes: u64,
    pub total_users: u64,
    pub active_polls: u64,
    pub pending_reports: u64,
}

/// Counts since UTC midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct Today {
    pub polls: u64,
    pub votes: u64,
    pub users: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub overview: Overview,
    pub today: Today,
    pub recent_polls: Vec<PollSummary>,
    pub top_polls: Vec<PollSummary>,
}

impl Analytics {
    pub fn into_dto(self) -> AnalyticsDto {
        AnalyticsDto {
            overview: OverviewDto {
                total_polls: self.overview.total_polls,
                total_votes: self.overview.total_votes,
                total_users: self.overview.total_users,
                active_polls: self.overview.active_polls,
                pending_reports: self.overview.pending_reports,
            },
            today: TodayDto {
                polls: self.today.polls,
                votes: self.today.votes,
                users: self.today.users,
            },
            recent_polls: self
                .recent_polls
                .into_iter()
                .map(PollSummary::into_dto)
                .collect(),
            top_polls: self
                .top_polls
                .into_iter()
                .map(PollSummary::into_dto)
                .collect(),
        }
    }
}
