//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!     let (poll, options) = factory::poll::create_poll(&db).await?;
//!
//!     // Create with dependencies
//!     let (user, poll, options) = factory::helpers::create_poll_with_creator(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let (poll, options) = factory::poll::PollFactory::new(&db)
//!     .allow_multiple(true)
//!     .require_auth(true)
//!     .build()
//!     .await?;
//!
//! let vote = factory::vote::VoteFactory::new(&db, &poll.id, &options[0].id)
//!     .user_id(&user.id)
//!     .counted()
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `poll` - Create polls with their options
//! - `vote` - Create vote rows, optionally updating counters
//! - `report` - Create moderation reports
//! - `token` - Create refresh and password reset tokens
//! - `helpers` - Unique values and entities with dependencies

pub mod helpers;
pub mod poll;
pub mod report;
pub mod token;
pub mod user;
pub mod vote;

// Re-export commonly used factory functions for concise usage
pub use poll::create_poll;
pub use report::create_report;
pub use user::{create_admin, create_user};
pub use vote::create_vote;
