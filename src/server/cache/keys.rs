//! Cache key and channel naming.

use crate::server::model::vote::IdentityKind;

const CHANNEL_PREFIX: &str = "poll:";

/// Pattern matching every poll channel, for `PSUBSCRIBE`.
pub const POLL_CHANNEL_PATTERN: &str = "poll:*";

/// Duplicate-vote scope: the poll, or the option for allow-multiple polls.
pub fn vote_scope(poll_id: &str, option_id: Option<&str>) -> String {
    match option_id {
        Some(option_id) => format!("{}:{}", poll_id, option_id),
        None => poll_id.to_string(),
    }
}

pub fn vote_marker(scope: &str, kind: IdentityKind, identifier: &str) -> String {
    format!("vote:{}:{}:{}", scope, kind.as_str(), identifier)
}

pub fn results(poll_id: &str) -> String {
    format!("poll:{}:results", poll_id)
}

pub fn poll_channel(poll_id: &str) -> String {
    format!("{}{}", CHANNEL_PREFIX, poll_id)
}

/// Extracts the poll ID from a `poll:{id}` channel name.
pub fn poll_id_from_channel(channel: &str) -> Option<&str> {
    channel
        .strip_prefix(CHANNEL_PREFIX)
        .filter(|id| !id.is_empty() && !id.contains(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_marker_keys() {
        assert_eq!(vote_scope("p1", None), "p1");
        assert_eq!(vote_scope("p1", Some("o1")), "p1:o1");
        assert_eq!(
            vote_marker("p1:o1", IdentityKind::Device, "dev"),
            "vote:p1:o1:device:dev"
        );
        assert_eq!(results("p1"), "poll:p1:results");
    }

    #[test]
    fn parses_channel_names() {
        assert_eq!(poll_id_from_channel(&poll_channel("abc")), Some("abc"));
        assert_eq!(poll_id_from_channel("poll:abc:results"), None);
        assert_eq!(poll_id_from_channel("poll:"), None);
        assert_eq!(poll_id_from_channel("other:abc"), None);
    }
}
