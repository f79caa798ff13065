use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::server::model::{pagination::PageRequest, vote::CastVoteParams};

pub struct VoteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VoteRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: &CastVoteParams) -> Result<entity::vote::Model, DbErr> {
        entity::vote::ActiveModel {
            id: ActiveValue::Set(uuid::Uuid::new_v4().to_string()),
            poll_id: ActiveValue::Set(params.poll_id.clone()),
            option_id: ActiveValue::Set(params.option_id.clone()),
            user_id: ActiveValue::Set(params.user_id.clone()),
            ip_address: ActiveValue::Set(params.ip_address.clone()),
            session_id: ActiveValue::Set(params.session_id.clone()),
            device_id: ActiveValue::Set(params.device_id.clone()),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    /// Whether the user already voted in the scope.
    ///
    /// `option_id` narrows the scope to one option for allow-multiple polls.
    pub async fn exists_for_user(
        &self,
        poll_id: &str,
        option_id: Option<&str>,
        user_id: &str,
    ) -> Result<bool, DbErr> {
        let count = scoped(poll_id, option_id)
            .filter(entity::vote::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether a vote from the IP address already exists in the scope.
    pub async fn exists_for_ip(
        &self,
        poll_id: &str,
        option_id: Option<&str>,
        ip_address: &str,
    ) -> Result<bool, DbErr> {
        let count = scoped(poll_id, option_id)
            .filter(entity::vote::Column::IpAddress.eq(ip_address))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::vote::Model>, DbErr> {
        entity::prelude::Vote::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Vote::delete_by_id(id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets a poll's votes, newest first.
    ///
    /// # Returns
    /// - `Ok((votes, total))` - Requested page and the poll's total vote rows
    pub async fn get_by_poll_paginated(
        &self,
        poll_id: &str,
        request: PageRequest,
    ) -> Result<(Vec<entity::vote::Model>, u64), DbErr> {
        let query =
            entity::prelude::Vote::find().filter(entity::vote::Column::PollId.eq(poll_id));

        let total = query.clone().count(self.db).await?;

        let votes = query
            .order_by_desc(entity::vote::Column::CreatedAt)
            .offset(request.offset())
            .limit(request.limit)
            .all(self.db)
            .await?;

        Ok((votes, total))
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Vote::find().count(self.db).await
    }

    pub async fn count_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        entity::prelude::Vote::find()
            .filter(entity::vote::Column::CreatedAt.gte(since))
            .count(self.db)
            .await
    }

    pub async fn count_by_user(&self, user_id: &str) -> Result<u64, DbErr> {
        entity::prelude::Vote::find()
            .filter(entity::vote::Column::UserId.eq(user_id))
            .count(self.db)
            .await
    }
}

fn scoped(poll_id: &str, option_id: Option<&str>) -> Select<entity::vote::Entity> {
    let query = entity::prelude::Vote::find().filter(entity::vote::Column::PollId.eq(poll_id));

    match option_id {
        Some(option_id) => query.filter(entity::vote::Column::OptionId.eq(option_id)),
        None => query,
    }
}
