//! Poll factory for creating test polls together with their options.

use crate::factory::helpers::{new_uuid, next_id};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test polls with customizable settings.
///
/// Options are inserted in the order given, with `position` following that order.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::poll::PollFactory;
///
/// let (poll, options) = PollFactory::new(&db)
///     .allow_multiple(true)
///     .options(&["Red", "Green", "Blue"])
///     .build()
///     .await?;
/// ```
pub struct PollFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    share_url: String,
    creator_id: Option<String>,
    allow_multiple: bool,
    require_auth: bool,
    show_results: String,
    deadline: Option<DateTime<Utc>>,
    ip_restriction: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    options: Vec<String>,
}

impl<'a> PollFactory<'a> {
    /// Creates a new PollFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Poll {id}"`
    /// - share_url: `"s{id}"` padded to 8 characters
    /// - no creator, single vote, no auth, results always shown
    /// - ip_restriction: `true`, is_active: `true`, no deadline
    /// - options: `"Option A"`, `"Option B"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            title: format!("Poll {}", id),
            share_url: format!("s{:0>7}", id),
            creator_id: None,
            allow_multiple: false,
            require_auth: false,
            show_results: "ALWAYS".to_string(),
            deadline: None,
            ip_restriction: true,
            is_active: true,
            created_at: Utc::now(),
            options: vec!["Option A".to_string(), "Option B".to_string()],
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn share_url(mut self, share_url: impl Into<String>) -> Self {
        self.share_url = share_url.into();
        self
    }

    pub fn creator_id(mut self, creator_id: &str) -> Self {
        self.creator_id = Some(creator_id.to_string());
        self
    }

    pub fn allow_multiple(mut self, allow_multiple: bool) -> Self {
        self.allow_multiple = allow_multiple;
        self
    }

    pub fn require_auth(mut self, require_auth: bool) -> Self {
        self.require_auth = require_auth;
        self
    }

    pub fn show_results(mut self, show_results: impl Into<String>) -> Self {
        self.show_results = show_results.into();
        self
    }

    pub fn deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn ip_restriction(mut self, ip_restriction: bool) -> Self {
        self.ip_restriction = ip_restriction;
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Replaces the default option texts.
    pub fn options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| o.to_string()).collect();
        self
    }

    /// Builds and inserts the poll and its options.
    ///
    /// # Returns
    /// - `Ok((poll, options))` - Created poll and options in display order
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(
        self,
    ) -> Result<(entity::poll::Model, Vec<entity::poll_option::Model>), DbErr> {
        let poll = entity::poll::ActiveModel {
            id: ActiveValue::Set(new_uuid()),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            share_url: ActiveValue::Set(self.share_url),
            creator_id: ActiveValue::Set(self.creator_id),
            allow_multiple: ActiveValue::Set(self.allow_multiple),
            require_auth: ActiveValue::Set(self.require_auth),
            show_results: ActiveValue::Set(self.show_results),
            deadline: ActiveValue::Set(self.deadline),
            ip_restriction: ActiveValue::Set(self.ip_restriction),
            captcha_required: ActiveValue::Set(false),
            is_active: ActiveValue::Set(self.is_active),
            total_votes: ActiveValue::Set(0),
            view_count: ActiveValue::Set(0),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
        }
        .insert(self.db)
        .await?;

        let mut options = Vec::with_capacity(self.options.len());
        for (position, text) in self.options.into_iter().enumerate() {
            let option = entity::poll_option::ActiveModel {
                id: ActiveValue::Set(new_uuid()),
                poll_id: ActiveValue::Set(poll.id.clone()),
                text: ActiveValue::Set(text),
                emoji: ActiveValue::Set(None),
                position: ActiveValue::Set(position as i32),
                vote_count: ActiveValue::Set(0),
            }
            .insert(self.db)
            .await?;
            options.push(option);
        }

        Ok((poll, options))
    }
}

/// Creates an anonymous poll with two default options.
pub async fn create_poll(
    db: &DatabaseConnection,
) -> Result<(entity::poll::Model, Vec<entity::poll_option::Model>), DbErr> {
    PollFactory::new(db).build().await
}
