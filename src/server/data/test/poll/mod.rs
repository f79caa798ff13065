use crate::{
    model::poll::ResultVisibility,
    server::{
        data::poll::PollRepository,
        model::{
            pagination::PageRequest,
            poll::{CreatePollParams, NewPollOption, PollSettings, UpdatePollParams},
        },
    },
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod adjust_total_votes;
mod create;
mod delete;
mod find_expired_active;
mod get_by_creator_paginated;
mod update;
