mod poll;
mod report;
mod token;
mod user_account;
mod vote;
