//! User service for account self-management.
//!
//! This module provides the `UserService` for the signed-in user's own account:
//! profile with activity counts, profile edits, and soft deletion. Listing the
//! user's polls goes through `PollService::get_user_polls`.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        poll::PollRepository, refresh_token::RefreshTokenRepository, user::UserRepository,
        vote::VoteRepository,
    },
    error::AppError,
    model::user::{UpdateProfileParams, User, UserWithCounts},
};

/// Service providing business logic for the current user's account.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user's profile with poll and vote counts.
    ///
    /// # Returns
    /// - `Ok(UserWithCounts)` - Profile with the number of polls created and votes cast
    /// - `Err(AppError::NotFound)` - No user with that ID
    /// - `Err(AppError::Database)` - Database error during query
    pub async fn get_profile(&self, user_id: &str) -> Result<UserWithCounts, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(user_not_found)?;

        with_counts(self.db, user).await
    }

    /// Updates the display name.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated account
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn update_profile(
        &self,
        user_id: &str,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        let user_repo = UserRepository::new(self.db);
        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(user_not_found)?;

        let user = user_repo.update_name(user, params.name).await?;
        Ok(User::from_entity(user)?)
    }

    /// Deactivates the account and signs out every session.
    ///
    /// Polls and votes are kept; the account can no longer log in.
    pub async fn delete_account(&self, user_id: &str) -> Result<(), AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(user_not_found)?;

        let txn = self.db.begin().await?;
        UserRepository::new(&txn).set_active(user, false).await?;
        RefreshTokenRepository::new(&txn)
            .delete_by_user(user_id)
            .await?;
        txn.commit().await?;

        tracing::info!("Deactivated account {}", user_id);
        Ok(())
    }
}

/// Loads a user's poll and vote counts.
pub(crate) async fn with_counts(
    db: &DatabaseConnection,
    user: entity::user::Model,
) -> Result<UserWithCounts, AppError> {
    let polls_count = PollRepository::new(db).count_by_creator(&user.id).await?;
    let votes_count = VoteRepository::new(db).count_by_user(&user.id).await?;

    Ok(UserWithCounts {
        user: User::from_entity(user)?,
        polls_count,
        votes_count,
    })
}

pub(crate) fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}
