use rand::{distr::Alphanumeric, Rng};

pub const SHARE_URL_LENGTH: usize = 8;

/// Generates a random share URL of 8 characters from `[A-Za-z0-9]`.
pub fn generate_share_url() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_URL_LENGTH)
        .map(char::from)
        .collect()
}
