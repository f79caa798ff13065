//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. They are
//! used by unit tests of domain conversion and result formatting.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let poll = fixture::poll::entity();
//! let option = fixture::poll::option(&poll.id, "Yes", 0, 3);
//! ```

pub mod poll;
