use chrono::Utc;

/// Creates an in-memory poll model with default settings and no votes.
pub fn entity() -> entity::poll::Model {
    let now = Utc::now();
    entity::poll::Model {
        id: "poll-fixture".to_string(),
        title: "Fixture poll".to_string(),
        description: None,
        share_url: "Fixture1".to_string(),
        creator_id: None,
        allow_multiple: false,
        require_auth: false,
        show_results: "ALWAYS".to_string(),
        deadline: None,
        ip_restriction: true,
        captcha_required: false,
        is_active: true,
        total_votes: 0,
        view_count: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Creates an in-memory option model for the given poll.
pub fn option(
    poll_id: &str,
    text: &str,
    position: i32,
    vote_count: i32,
) -> entity::poll_option::Model {
    entity::poll_option::Model {
        id: format!("{}-option-{}", poll_id, position),
        poll_id: poll_id.to_string(),
        text: text.to_string(),
        emoji: None,
        position,
        vote_count,
    }
}
