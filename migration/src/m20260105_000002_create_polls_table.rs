use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Polls::Table)
                    .if_not_exists()
                    .col(string(Polls::Id).primary_key())
                    .col(string(Polls::Title))
                    .col(text_null(Polls::Description))
                    .col(string_uniq(Polls::ShareUrl))
                    .col(string_null(Polls::CreatorId))
                    .col(boolean(Polls::AllowMultiple).default(false))
                    .col(boolean(Polls::RequireAuth).default(false))
                    .col(string(Polls::ShowResults).default("ALWAYS"))
                    .col(timestamp_with_time_zone_null(Polls::Deadline))
                    .col(boolean(Polls::IpRestriction).default(true))
                    .col(boolean(Polls::CaptchaRequired).default(false))
                    .col(boolean(Polls::IsActive).default(true))
                    .col(integer(Polls::TotalVotes).default(0))
                    .col(integer(Polls::ViewCount).default(0))
                    .col(
                        timestamp_with_time_zone(Polls::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Polls::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_polls_creator_id")
                            .from(Polls::Table, Polls::CreatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_polls_creator_id")
                    .table(Polls::Table)
                    .col(Polls::CreatorId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Polls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Polls {
    Table,
    Id,
    Title,
    Description,
    ShareUrl,
    CreatorId,
    AllowMultiple,
    RequireAuth,
    ShowResults,
    Deadline,
    IpRestriction,
    CaptchaRequired,
    IsActive,
    TotalVotes,
    ViewCount,
    CreatedAt,
    UpdatedAt,
}
