//! Vote factory for creating test ballots.

use crate::factory::helpers::new_uuid;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Factory for creating vote rows.
///
/// By default only the vote row is inserted. Call `counted()` to also bump the
/// option's `vote_count` and the poll's `total_votes` so the aggregate counters
/// stay consistent with the rows, as the server does when a vote is cast.
pub struct VoteFactory<'a> {
    db: &'a DatabaseConnection,
    poll_id: String,
    option_id: String,
    user_id: Option<String>,
    ip_address: Option<String>,
    session_id: Option<String>,
    device_id: Option<String>,
    counted: bool,
}

impl<'a> VoteFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, poll_id: &str, option_id: &str) -> Self {
        Self {
            db,
            poll_id: poll_id.to_string(),
            option_id: option_id.to_string(),
            user_id: None,
            ip_address: None,
            session_id: None,
            device_id: None,
            counted: false,
        }
    }

    pub fn user_id(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn ip_address(mut self, ip_address: &str) -> Self {
        self.ip_address = Some(ip_address.to_string());
        self
    }

    pub fn session_id(mut self, session_id: &str) -> Self {
        self.session_id = Some(session_id.to_string());
        self
    }

    pub fn device_id(mut self, device_id: &str) -> Self {
        self.device_id = Some(device_id.to_string());
        self
    }

    /// Also increments the option and poll counters.
    pub fn counted(mut self) -> Self {
        self.counted = true;
        self
    }

    /// Builds and inserts the vote.
    ///
    /// # Returns
    /// - `Ok(entity::vote::Model)` - Created vote row
    /// - `Err(DbErr)` - Database error, or the option/poll disappeared while counting
    pub async fn build(self) -> Result<entity::vote::Model, DbErr> {
        let vote = entity::vote::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            poll_id: ActiveValue::Set(self.poll_id.clone()),
            option_id: ActiveValue::Set(self.option_id.clone()),
            user_id: ActiveValue::Set(self.user_id),
            ip_address: ActiveValue::Set(self.ip_address),
            session_id: ActiveValue::Set(self.session_id),
            device_id: ActiveValue::Set(self.device_id),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        if self.counted {
            let option = entity::prelude::PollOption::find_by_id(self.option_id.clone())
                .one(self.db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(self.option_id.clone()))?;
            let vote_count = option.vote_count + 1;
            let mut option: entity::poll_option::ActiveModel = option.into();
            option.vote_count = ActiveValue::Set(vote_count);
            option.update(self.db).await?;

            let poll = entity::prelude::Poll::find_by_id(self.poll_id.clone())
                .one(self.db)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(self.poll_id.clone()))?;
            let total_votes = poll.total_votes + 1;
            let mut poll: entity::poll::ActiveModel = poll.into();
            poll.total_votes = ActiveValue::Set(total_votes);
            poll.update(self.db).await?;
        }

        Ok(vote)
    }
}

/// Creates a counted anonymous vote for the given option.
pub async fn create_vote(
    db: &DatabaseConnection,
    poll_id: &str,
    option_id: &str,
) -> Result<entity::vote::Model, DbErr> {
    VoteFactory::new(db, poll_id, option_id).counted().build().await
}
