//! Realtime fan-out of poll events to WebSocket viewers.
//!
//! Every published event ends up in the process-wide [`hub::Hub`]: directly for
//! the in-memory cache, or through the Redis [`listener`] so that events from
//! other server instances reach local sockets too. Each socket [`session`] keeps
//! its own set of joined poll rooms and forwards only matching events.

pub mod hub;
pub mod listener;
pub mod session;
