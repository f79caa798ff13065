//! Factories for persisted refresh and password reset tokens.

use crate::factory::helpers::new_uuid;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Inserts a refresh token row for the user.
pub async fn create_refresh_token(
    db: &DatabaseConnection,
    user_id: &str,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<entity::refresh_token::Model, DbErr> {
    entity::refresh_token::ActiveModel {
        id: ActiveValue::Set(new_uuid()),
        token: ActiveValue::Set(token.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        expires_at: ActiveValue::Set(expires_at),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}

/// Inserts an unused password reset token row for the user.
pub async fn create_reset_token(
    db: &DatabaseConnection,
    user: &entity::user::Model,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<entity::password_reset_token::Model, DbErr> {
    entity::password_reset_token::ActiveModel {
        id: ActiveValue::Set(new_uuid()),
        token: ActiveValue::Set(token.to_string()),
        user_id: ActiveValue::Set(user.id.clone()),
        email: ActiveValue::Set(user.email.clone()),
        expires_at: ActiveValue::Set(expires_at),
        used: ActiveValue::Set(false),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
