pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_users_table;
mod m20260105_000002_create_polls_table;
mod m20260105_000003_create_poll_options_table;
mod m20260105_000004_create_votes_table;
mod m20260105_000005_create_refresh_tokens_table;
mod m20260105_000006_create_password_reset_tokens_table;
mod m20260105_000007_create_reports_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_users_table::Migration),
            Box::new(m20260105_000002_create_polls_table::Migration),
            Box::new(m20260105_000003_create_poll_options_table::Migration),
            Box::new(m20260105_000004_create_votes_table::Migration),
            Box::new(m20260105_000005_create_refresh_tokens_table::Migration),
            Box::new(m20260105_000006_create_password_reset_tokens_table::Migration),
            Box::new(m20260105_000007_create_reports_table::Migration),
        ]
    }
}
