//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories are generic over `ConnectionTrait` so the same
//! queries run against the pool or inside a transaction. They return SeaORM entity models;
//! services convert them into domain models.

pub mod password_reset_token;
pub mod poll;
pub mod poll_option;
pub mod refresh_token;
pub mod report;
pub mod user;
pub mod vote;

#[cfg(test)]
mod test;
