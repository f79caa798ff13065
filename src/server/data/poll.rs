use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::collections::HashMap;

use crate::server::model::{
    pagination::PageRequest,
    poll::{CreatePollParams, UpdatePollParams},
};

pub type PollWithOptions = (entity::poll::Model, Vec<entity::poll_option::Model>);

pub struct PollRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PollRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a poll and its options, keeping option submission order as position.
    ///
    /// Run inside a transaction so a failing option insert leaves no partial poll.
    pub async fn create(
        &self,
        params: &CreatePollParams,
        share_url: &str,
    ) -> Result<PollWithOptions, DbErr> {
        let now = Utc::now();
        let settings = &params.settings;

        let poll = entity::poll::ActiveModel {
            id: ActiveValue::Set(uuid::Uuid::new_v4().to_string()),
            title: ActiveValue::Set(params.title.clone()),
            description: ActiveValue::Set(params.description.clone()),
            share_url: ActiveValue::Set(share_url.to_string()),
            creator_id: ActiveValue::Set(params.creator_id.clone()),
            allow_multiple: ActiveValue::Set(settings.allow_multiple),
            require_auth: ActiveValue::Set(settings.require_auth),
            show_results: ActiveValue::Set(settings.show_results.as_str().to_string()),
            deadline: ActiveValue::Set(settings.deadline),
            ip_restriction: ActiveValue::Set(settings.ip_restriction),
            captcha_required: ActiveValue::Set(settings.captcha_required),
            is_active: ActiveValue::Set(true),
            total_votes: ActiveValue::Set(0),
            view_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        let mut options = Vec::with_capacity(params.options.len());
        for (position, option) in params.options.iter().enumerate() {
            let option = entity::poll_option::ActiveModel {
                id: ActiveValue::Set(uuid::Uuid::new_v4().to_string()),
                poll_id: ActiveValue::Set(poll.id.clone()),
                text: ActiveValue::Set(option.text.clone()),
                emoji: ActiveValue::Set(option.emoji.clone()),
                position: ActiveValue::Set(position as i32),
                vote_count: ActiveValue::Set(0),
            }
            .insert(self.db)
            .await?;
            options.push(option);
        }

        Ok((poll, options))
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find_by_id(id.to_string())
            .one(self.db)
            .await
    }

    pub async fn find_by_share_url(
        &self,
        share_url: &str,
    ) -> Result<Option<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::ShareUrl.eq(share_url))
            .one(self.db)
            .await
    }

    pub async fn share_url_exists(&self, share_url: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Poll::find()
            .filter(entity::poll::Column::ShareUrl.eq(share_url))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets a poll with its options ordered by position.
    pub async fn get_with_options(&self, id: &str) -> Result<Option<PollWithOptions>, DbErr> {
        let Some(poll) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let options = entity::prelude::PollOption::find()
            .filter(entity::poll_option::Column::PollId.eq(id))
            .order_by_asc(entity::poll_option::Column::Position)
            .all(self.db)
            .await?;

        Ok(Some((poll, options)))
    }

    pub async fn increment_view_count(&self, id: &str) -> Result<(), DbErr> {
        entity::prelude::Poll::update_many()
            .col_expr(
                entity::poll::Column::ViewCount,
                Expr::col(entity::poll::Column::ViewCount).add(1),
            )
            .filter(entity::poll::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Adds `delta` to the poll's `total_votes` counter in a single UPDATE.
    pub async fn adjust_total_votes(&self, id: &str, delta: i32) -> Result<(), DbErr> {
        entity::prelude::Poll::update_many()
            .col_expr(
                entity::poll::Column::TotalVotes,
                Expr::col(entity::poll::Column::TotalVotes).add(delta),
            )
            .filter(entity::poll::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Applies the provided fields and returns the updated row.
    pub async fn update(
        &self,
        poll: entity::poll::Model,
        params: UpdatePollParams,
    ) -> Result<entity::poll::Model, DbErr> {
        let mut active: entity::poll::ActiveModel = poll.into();

        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(allow_multiple) = params.allow_multiple {
            active.allow_multiple = ActiveValue::Set(allow_multiple);
        }
        if let Some(require_auth) = params.require_auth {
            active.require_auth = ActiveValue::Set(require_auth);
        }
        if let Some(show_results) = params.show_results {
            active.show_results = ActiveValue::Set(show_results.as_str().to_string());
        }
        if let Some(deadline) = params.deadline {
            active.deadline = ActiveValue::Set(Some(deadline));
        }
        if let Some(ip_restriction) = params.ip_restriction {
            active.ip_restriction = ActiveValue::Set(ip_restriction);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        active.update(self.db).await
    }

    pub async fn set_active(&self, id: &str, is_active: bool) -> Result<(), DbErr> {
        entity::prelude::Poll::update_many()
            .col_expr(entity::poll::Column::IsActive, Expr::value(is_active))
            .col_expr(entity::poll::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::poll::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes a poll; options, votes and reports cascade.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of deleted rows (0 or 1)
    pub async fn delete(&self, id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::Poll::delete_by_id(id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Gets a creator's polls, newest first, with their options.
    ///
    /// # Returns
    /// - `Ok((polls, total))` - Requested page and the creator's total poll count
    pub async fn get_by_creator_paginated(
        &self,
        creator_id: &str,
        request: PageRequest,
    ) -> Result<(Vec<PollWithOptions>, u64), DbErr> {
        let query = entity::prelude::Poll::find()
            .filter(entity::poll::Column::CreatorId.eq(creator_id));

        let total = query.clone().count(self.db).await?;

        let polls = query
            .order_by_desc(entity::poll::Column::CreatedAt)
            .offset(request.offset())
            .limit(request.limit)
            .all(self.db)
            .await?;

        let poll_ids: Vec<String> = polls.iter().map(|p| p.id.clone()).collect();
        let options = entity::prelude::PollOption::find()
            .filter(entity::poll_option::Column::PollId.is_in(poll_ids))
            .order_by_asc(entity::poll_option::Column::Position)
            .all(self.db)
            .await?;

        let mut options_by_poll: HashMap<String, Vec<entity::poll_option::Model>> = HashMap::new();
        for option in options {
            options_by_poll
                .entry(option.poll_id.clone())
                .or_default()
                .push(option);
        }

        let polls = polls
            .into_iter()
            .map(|poll| {
                let options = options_by_poll.remove(&poll.id).unwrap_or_default();
                (poll, options)
            })
            .collect();

        Ok((polls, total))
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Poll::find().count(self.db).await
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::IsActive.eq(true))
            .count(self.db)
            .await
    }

    pub async fn count_created_since(&self, since: DateTime<Utc>) -> Result<u64, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::CreatedAt.gte(since))
            .count(self.db)
            .await
    }

    pub async fn count_by_creator(&self, creator_id: &str) -> Result<u64, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::CreatorId.eq(creator_id))
            .count(self.db)
            .await
    }

    pub async fn get_recent(&self, limit: u64) -> Result<Vec<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .order_by_desc(entity::poll::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn get_top_by_votes(&self, limit: u64) -> Result<Vec<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .order_by_desc(entity::poll::Column::TotalVotes)
            .order_by_desc(entity::poll::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Active polls whose deadline is before `now`.
    pub async fn find_expired_active(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::IsActive.eq(true))
            .filter(entity::poll::Column::Deadline.is_not_null())
            .filter(entity::poll::Column::Deadline.lt(now))
            .all(self.db)
            .await
    }
}
