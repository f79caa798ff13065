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
                    .table(PollOptions::Table)
                    .if_not_exists()
                    .col(string(PollOptions::Id).primary_key())
                    .col(string(PollOptions::PollId))
                    .col(string(PollOptions::Text))
                    .col(string_null(PollOptions::Emoji))
                    .col(integer(PollOptions::Position))
                    .col(integer(PollOptions::VoteCount).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_poll_options_poll_id")
                            .from(PollOptions::Table, PollOptions::PollId)
                            .to(Polls::Table, Polls::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_poll_options_poll_id")
                    .table(PollOptions::Table)
                    .col(PollOptions::PollId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PollOptions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PollOptions {
    Table,
    Id,
    PollId,
    Text,
    Emoji,
    Position,
    VoteCount,
}
