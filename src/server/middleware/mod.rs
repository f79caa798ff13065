//! Request guards and extractors shared by the controllers.
//!
//! - `auth` - Bearer token authentication and role checks
//! - `client_ip` - Caller address for vote identity and reports
//! - `rate_limit` - Per-IP token buckets on abuse-prone routes

pub mod auth;
pub mod client_ip;
pub mod rate_limit;

#[cfg(test)]
mod test;
