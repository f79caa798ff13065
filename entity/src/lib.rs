pub mod prelude;

pub mod password_reset_token;
pub mod poll;
pub mod poll_option;
pub mod refresh_token;
pub mod report;
pub mod user;
pub mod vote;
