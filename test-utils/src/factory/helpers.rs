//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! including unique value generation and convenience methods for creating
//! entities with their dependencies.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::{poll::PollFactory, user::UserFactory};

/// Counter for generating unique values in tests.
///
/// This atomic counter ensures each factory-created entity gets unique
/// emails and share URLs to prevent unique constraint collisions.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Generates a new primary key in the same format the server uses.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creates a poll owned by a freshly created user.
///
/// This is a convenience method that creates:
/// 1. User (as poll creator)
/// 2. Poll with two options ("Option A", "Option B")
///
/// # Returns
/// - `Ok((user, poll, options))` - Created entities, options in display order
/// - `Err(DbErr)` - Database error during insert
pub async fn create_poll_with_creator(
    db: &DatabaseConnection,
) -> Result<
    (
        entity::user::Model,
        entity::poll::Model,
        Vec<entity::poll_option::Model>,
    ),
    DbErr,
> {
    let user = UserFactory::new(db).build().await?;
    let (poll, options) = PollFactory::new(db).creator_id(&user.id).build().await?;

    Ok((user, poll, options))
}
