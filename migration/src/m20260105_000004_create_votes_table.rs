use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_users_table::Users, m20260105_000002_create_polls_table::Polls,
    m20260105_000003_create_poll_options_table::PollOptions,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(string(Votes::Id).primary_key())
                    .col(string(Votes::PollId))
                    .col(string(Votes::OptionId))
                    .col(string_null(Votes::UserId))
                    .col(string_null(Votes::IpAddress))
                    .col(string_null(Votes::SessionId))
                    .col(string_null(Votes::DeviceId))
                    .col(
                        timestamp_with_time_zone(Votes::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_poll_id")
                            .from(Votes::Table, Votes::PollId)
                            .to(Polls::Table, Polls::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_option_id")
                            .from(Votes::Table, Votes::OptionId)
                            .to(PollOptions::Table, PollOptions::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_user_id")
                            .from(Votes::Table, Votes::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Anonymous votes carry a NULL user_id, which unique indexes treat as distinct.
        manager
            .create_index(
                Index::create()
                    .name("idx_votes_poll_option_user")
                    .table(Votes::Table)
                    .col(Votes::PollId)
                    .col(Votes::OptionId)
                    .col(Votes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_votes_poll_ip")
                    .table(Votes::Table)
                    .col(Votes::PollId)
                    .col(Votes::IpAddress)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Votes {
    Table,
    Id,
    PollId,
    OptionId,
    UserId,
    IpAddress,
    SessionId,
    DeviceId,
    CreatedAt,
}
