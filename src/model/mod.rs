//! Request and response bodies of the HTTP and WebSocket API.
//!
//! These types define the JSON wire format. Field names are camelCase on the wire.

pub mod admin;
pub mod api;
pub mod auth;
pub mod poll;
pub mod socket;
pub mod user;
pub mod vote;
