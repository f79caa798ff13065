use crate::server::{
    data::{poll::PollRepository, poll_option::PollOptionRepository, vote::VoteRepository},
    model::{pagination::PageRequest, vote::CastVoteParams},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod adjust_vote_count;
mod create;
mod exists;
mod get_by_poll_paginated;
