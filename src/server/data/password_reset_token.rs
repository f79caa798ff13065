use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, QueryFilter,
};

pub struct PasswordResetTokenRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PasswordResetTokenRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user: &entity::user::Model,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<entity::password_reset_token::Model, DbErr> {
        entity::password_reset_token::ActiveModel {
            id: ActiveValue::Set(uuid::Uuid::new_v4().to_string()),
            token: ActiveValue::Set(token.to_string()),
            user_id: ActiveValue::Set(user.id.clone()),
            email: ActiveValue::Set(user.email.clone()),
            expires_at: ActiveValue::Set(expires_at),
            used: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<entity::password_reset_token::Model>, DbErr> {
        entity::prelude::PasswordResetToken::find()
            .filter(entity::password_reset_token::Column::Token.eq(token))
            .one(self.db)
            .await
    }

    pub async fn delete_by_user(&self, user_id: &str) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordResetToken::delete_many()
            .filter(entity::password_reset_token::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn mark_used(&self, id: &str) -> Result<(), DbErr> {
        entity::prelude::PasswordResetToken::update_many()
            .col_expr(entity::password_reset_token::Column::Used, Expr::value(true))
            .filter(entity::password_reset_token::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Deletes tokens that are expired or already used.
    pub async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::PasswordResetToken::delete_many()
            .filter(
                Condition::any()
                    .add(entity::password_reset_token::Column::ExpiresAt.lt(now))
                    .add(entity::password_reset_token::Column::Used.eq(true)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
