use crate::{
    model::{admin::ReportStatus, poll::ReportReason},
    server::{
        data::report::ReportRepository,
        model::{pagination::PageRequest, report::CreateReportParams},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod update_status;
