use crate::{
    model::user::Role,
    server::{
        data::user::UserRepository,
        model::{pagination::PageRequest, user::UpdateUserParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod create;
mod get_paginated;
mod update_account;
