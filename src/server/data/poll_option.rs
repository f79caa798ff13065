use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct PollOptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PollOptionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_ids(
        &self,
        ids: Vec<String>,
    ) -> Result<Vec<entity::poll_option::Model>, DbErr> {
        entity::prelude::PollOption::find()
            .filter(entity::poll_option::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    /// Adds `delta` to the option's `vote_count` in a single UPDATE.
    pub async fn adjust_vote_count(&self, option_id: &str, delta: i32) -> Result<(), DbErr> {
        entity::prelude::PollOption::update_many()
            .col_expr(
                entity::poll_option::Column::VoteCount,
                Expr::col(entity::poll_option::Column::VoteCount).add(delta),
            )
            .filter(entity::poll_option::Column::Id.eq(option_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
