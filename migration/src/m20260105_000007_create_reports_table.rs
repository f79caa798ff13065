use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000002_create_polls_table::Polls;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reports::Table)
                    .if_not_exists()
                    .col(string(Reports::Id).primary_key())
                    .col(string(Reports::PollId))
                    .col(string(Reports::Reason))
                    .col(text_null(Reports::Details))
                    .col(string(Reports::Status).default("PENDING"))
                    .col(string_null(Reports::ReporterIp))
                    .col(
                        timestamp_with_time_zone(Reports::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Reports::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reports_poll_id")
                            .from(Reports::Table, Reports::PollId)
                            .to(Polls::Table, Polls::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reports {
    Table,
    Id,
    PollId,
    Reason,
    Details,
    Status,
    ReporterIp,
    CreatedAt,
    UpdatedAt,
}
