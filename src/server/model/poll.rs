//! Poll domain models and parameters.
//!
//! A poll owns an ordered list of options and carries the aggregate counters
//! maintained by the vote transactions. `Poll` is also the snapshot stored in
//! the short-lived results cache, so it round-trips through serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    model::poll::{
        CreatePollDto, PollDto, PollOptionDto, PollSettingsDto, ResultVisibility, UpdatePollDto,
    },
    server::{
        error::{internal::InternalError, validation::ValidationError},
        util::validate,
    },
};

pub const MIN_OPTIONS: usize = 2;
pub const MAX_OPTIONS: usize = 20;

/// A single answer of a poll with its running tally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub emoji: Option<String>,
    /// Display position, zero-based, in submission order.
    pub position: i32,
    pub vote_count: i32,
}

impl PollOption {
    pub fn from_entity(entity: entity::poll_option::Model) -> Self {
        Self {
            id: entity.id,
            text: entity.text,
            emoji: entity.emoji,
            position: entity.position,
            vote_count: entity.vote_count,
        }
    }
}

/// Poll with settings, counters and its options in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub share_url: String,
    pub creator_id: Option<String>,
    pub allow_multiple: bool,
    pub require_auth: bool,
    pub show_results: ResultVisibility,
    pub deadline: Option<DateTime<Utc>>,
    pub ip_restriction: bool,
    pub captcha_required: bool,
    pub is_active: bool,
    pub total_votes: i32,
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub options: Vec<PollOption>,
}

impl Poll {
    /// Converts a poll row and its option rows at the repository boundary.
    ///
    /// Options are sorted by position regardless of the order they were loaded in.
    ///
    /// # Returns
    /// - `Ok(Poll)` - The converted poll
    /// - `Err(InternalError::InvalidEnumValue)` - `show_results` holds an unknown value
    pub fn from_entity(
        poll: entity::poll::Model,
        options: Vec<entity::poll_option::Model>,
    ) -> Result<Self, InternalError> {
        let show_results =
            ResultVisibility::parse(&poll.show_results).ok_or(InternalError::InvalidEnumValue {
                column: "polls.show_results",
                value: poll.show_results.clone(),
            })?;

        let mut options: Vec<PollOption> =
            options.into_iter().map(PollOption::from_entity).collect();
        options.sort_by_key(|o| o.position);

        Ok(Self {
            id: poll.id,
            title: poll.title,
            description: poll.description,
            share_url: poll.share_url,
            creator_id: poll.creator_id,
            allow_multiple: poll.allow_multiple,
            require_auth: poll.require_auth,
            show_results,
            deadline: poll.deadline,
            ip_restriction: poll.ip_restriction,
            captcha_required: poll.captcha_required,
            is_active: poll.is_active,
            total_votes: poll.total_votes,
            view_count: poll.view_count,
            created_at: poll.created_at,
            options,
        })
    }

    /// Whether the poll has a deadline that lies before `now`.
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| deadline < now)
    }

    pub fn has_option(&self, option_id: &str) -> bool {
        self.options.iter().any(|o| o.id == option_id)
    }

    /// Total used for percentages.
    ///
    /// Falls back to the sum of option counts when the poll counter reads zero.
    pub fn tallied_total(&self) -> i32 {
        if self.total_votes > 0 {
            self.total_votes
        } else {
            self.options.iter().map(|o| o.vote_count).sum()
        }
    }

    /// Formats the poll with percentages for API responses and realtime events.
    ///
    /// The reported `is_active` is false once the deadline has passed even if the
    /// poll was never closed explicitly.
    ///
    /// # Arguments
    /// - `has_voted` - Whether the viewer has voted, when known
    pub fn into_dto(self, has_voted: Option<bool>) -> PollDto {
        let total = self.tallied_total();
        let is_active = self.is_active && !self.deadline_passed(Utc::now());

        PollDto {
            id: self.id,
            title: self.title,
            description: self.description,
            options: self
                .options
                .into_iter()
                .map(|o| PollOptionDto {
                    percentage: percentage(o.vote_count, total),
                    id: o.id,
                    text: o.text,
                    emoji: o.emoji,
                    vote_count: o.vote_count,
                })
                .collect(),
            total_votes: total,
            view_count: self.view_count,
            share_url: self.share_url,
            deadline: self.deadline,
            is_active,
            show_results: self.show_results,
            allow_multiple: self.allow_multiple,
            require_auth: self.require_auth,
            ip_restriction: self.ip_restriction,
            created_at: self.created_at,
            has_voted,
        }
    }
}

/// Share of `count` in `total` as a whole percentage, rounded half away from zero.
///
/// Returns 0 when `total` is zero.
pub fn percentage(count: i32, total: i32) -> u32 {
    if total <= 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

/// Voting and visibility settings chosen at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSettings {
    pub allow_multiple: bool,
    pub require_auth: bool,
    pub show_results: ResultVisibility,
    pub deadline: Option<DateTime<Utc>>,
    pub ip_restriction: bool,
    pub captcha_required: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            allow_multiple: false,
            require_auth: false,
            show_results: ResultVisibility::Always,
            deadline: None,
            ip_restriction: true,
            captcha_required: false,
        }
    }
}

impl PollSettings {
    fn from_dto(dto: Option<PollSettingsDto>) -> Self {
        let defaults = Self::default();
        let Some(dto) = dto else {
            return defaults;
        };

        Self {
            allow_multiple: dto.allow_multiple.unwrap_or(defaults.allow_multiple),
            require_auth: dto.require_auth.unwrap_or(defaults.require_auth),
            show_results: dto.show_results.unwrap_or(defaults.show_results),
            deadline: dto.deadline,
            ip_restriction: dto.ip_restriction.unwrap_or(defaults.ip_restriction),
            captcha_required: dto.captcha_required.unwrap_or(defaults.captcha_required),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPollOption {
    pub text: String,
    pub emoji: Option<String>,
}

/// Parameters for creating a poll with its options.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatePollParams {
    pub title: String,
    pub description: Option<String>,
    /// Options in submission order.
    pub options: Vec<NewPollOption>,
    pub settings: PollSettings,
    pub creator_id: Option<String>,
}

impl CreatePollParams {
    /// Validates a creation request and applies setting defaults.
    ///
    /// # Returns
    /// - `Ok(CreatePollParams)` - Valid request
    /// - `Err(ValidationError)` - Every failing field, not just the first
    pub fn from_dto(dto: CreatePollDto, creator_id: Option<String>) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        validate::length(
            &mut errors,
            "title",
            &dto.title,
            3,
            200,
            Some("Title must be at least 3 characters"),
        );
        if let Some(description) = &dto.description {
            validate::max_length(&mut errors, "description", description, 1000);
        }

        if dto.options.len() < MIN_OPTIONS {
            errors.push("options", "Poll must have at least 2 options");
        } else if dto.options.len() > MAX_OPTIONS {
            errors.push("options", "Poll cannot have more than 20 options");
        }

        for (i, option) in dto.options.iter().enumerate() {
            validate::length(
                &mut errors,
                &format!("options.{}.text", i),
                &option.text,
                1,
                200,
                Some("Option text is required"),
            );
            if let Some(emoji) = &option.emoji {
                validate::max_length(&mut errors, &format!("options.{}.emoji", i), emoji, 10);
            }
        }

        errors.into_result()?;

        Ok(Self {
            title: dto.title,
            description: dto.description,
            options: dto
                .options
                .into_iter()
                .map(|o| NewPollOption {
                    text: o.text,
                    emoji: o.emoji,
                })
                .collect(),
            settings: PollSettings::from_dto(dto.settings),
            creator_id,
        })
    }
}

/// Parameters for updating a poll; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePollParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub allow_multiple: Option<bool>,
    pub require_auth: Option<bool>,
    pub show_results: Option<ResultVisibility>,
    pub deadline: Option<DateTime<Utc>>,
    pub ip_restriction: Option<bool>,
}

impl UpdatePollParams {
    pub fn from_dto(dto: UpdatePollDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        if let Some(title) = &dto.title {
            validate::length(
                &mut errors,
                "title",
                title,
                3,
                200,
                Some("Title must be at least 3 characters"),
            );
        }
        if let Some(description) = &dto.description {
            validate::max_length(&mut errors, "description", description, 1000);
        }

        errors.into_result()?;

        let settings = dto.settings.unwrap_or_default();
        Ok(Self {
            title: dto.title,
            description: dto.description,
            allow_multiple: settings.allow_multiple,
            require_auth: settings.require_auth,
            show_results: settings.show_results,
            deadline: settings.deadline,
            ip_restriction: settings.ip_restriction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::poll::CreatePollOptionDto;
    use chrono::Duration;
    use test_utils::fixture;

    fn create_dto(options: usize) -> CreatePollDto {
        CreatePollDto {
            title: "Lunch?".to_string(),
            description: None,
            options: (0..options)
                .map(|i| CreatePollOptionDto {
                    text: format!("Option {}", i),
                    emoji: None,
                })
                .collect(),
            settings: None,
        }
    }

    #[test]
    fn rounds_percentages() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn formats_results_with_percentages_in_position_order() {
        let mut poll = fixture::poll::entity();
        poll.total_votes = 4;
        let options = vec![
            fixture::poll::option(&poll.id, "Second", 1, 1),
            fixture::poll::option(&poll.id, "First", 0, 3),
        ];

        let dto = Poll::from_entity(poll, options).unwrap().into_dto(None);

        assert_eq!(dto.options[0].text, "First");
        assert_eq!(dto.options[0].percentage, 75);
        assert_eq!(dto.options[1].percentage, 25);
        assert_eq!(dto.total_votes, 4);
        assert!(dto.has_voted.is_none());
    }

    #[test]
    fn falls_back_to_option_sum_when_counter_is_zero() {
        let poll = fixture::poll::entity();
        let options = vec![
            fixture::poll::option(&poll.id, "A", 0, 2),
            fixture::poll::option(&poll.id, "B", 1, 2),
        ];

        let dto = Poll::from_entity(poll, options).unwrap().into_dto(Some(true));

        assert_eq!(dto.total_votes, 4);
        assert_eq!(dto.options[0].percentage, 50);
        assert_eq!(dto.has_voted, Some(true));
    }

    #[test]
    fn reports_inactive_after_deadline() {
        let mut poll = fixture::poll::entity();
        poll.deadline = Some(Utc::now() - Duration::minutes(1));

        let dto = Poll::from_entity(poll, vec![]).unwrap().into_dto(None);

        assert!(!dto.is_active);
    }

    #[test]
    fn rejects_unknown_visibility() {
        let mut poll = fixture::poll::entity();
        poll.show_results = "SOMETIMES".to_string();

        assert!(Poll::from_entity(poll, vec![]).is_err());
    }

    #[test]
    fn applies_default_settings() {
        let params = CreatePollParams::from_dto(create_dto(2), None).unwrap();

        assert_eq!(params.settings, PollSettings::default());
        assert!(params.settings.ip_restriction);
        assert_eq!(params.settings.show_results, ResultVisibility::Always);
    }

    #[test]
    fn rejects_option_count_outside_bounds() {
        let err = CreatePollParams::from_dto(create_dto(1), None).unwrap_err();
        assert_eq!(err.details[0].field, "options");
        assert_eq!(err.details[0].message, "Poll must have at least 2 options");

        let err = CreatePollParams::from_dto(create_dto(21), None).unwrap_err();
        assert_eq!(err.details[0].message, "Poll cannot have more than 20 options");
    }

    #[test]
    fn collects_every_failing_field() {
        let mut dto = create_dto(2);
        dto.title = "Hi".to_string();
        dto.options[1].text = String::new();
        dto.options[0].emoji = Some("x".repeat(11));

        let err = CreatePollParams::from_dto(dto, None).unwrap_err();
        let fields: Vec<&str> = err.details.iter().map(|d| d.field.as_str()).collect();

        assert_eq!(fields, vec!["title", "options.0.emoji", "options.1.text"]);
    }
}
