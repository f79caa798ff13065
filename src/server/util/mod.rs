//! Small helpers shared by controllers and services.

pub mod json;
pub mod parse;
pub mod share_url;
pub mod validate;
