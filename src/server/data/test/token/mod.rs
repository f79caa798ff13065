use crate::server::data::{
    password_reset_token::PasswordResetTokenRepository, refresh_token::RefreshTokenRepository,
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod password_reset;
mod refresh;
