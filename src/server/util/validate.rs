//! Field validation rules that accumulate into a `ValidationError`.

use crate::server::error::validation::ValidationError;

/// Checks that `value` has between `min` and `max` characters (inclusive).
///
/// `too_short` overrides the message used when the value is below `min`.
pub fn length(
    errors: &mut ValidationError,
    field: &str,
    value: &str,
    min: usize,
    max: usize,
    too_short: Option<&str>,
) {
    let count = value.chars().count();
    if count < min {
        let message = too_short
            .map(str::to_string)
            .unwrap_or_else(|| format!("Must be at least {} characters", min));
        errors.push(field, message);
    } else if count > max {
        errors.push(field, format!("Must be at most {} characters", max));
    }
}

/// Checks that `value` has at most `max` characters.
pub fn max_length(errors: &mut ValidationError, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(field, format!("Must be at most {} characters", max));
    }
}

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn password(errors: &mut ValidationError, field: &str, value: &str) {
    length(
        errors,
        field,
        value,
        MIN_PASSWORD_LENGTH,
        usize::MAX,
        Some("Password must be at least 8 characters"),
    );
}

/// Checks that `value` is a plausible email address.
pub fn email(errors: &mut ValidationError, field: &str, value: &str) {
    if !is_email(value) {
        errors.push(field, "Invalid email address");
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split('.')
            .filter(|part| !part.is_empty())
            .count()
            >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_addresses() {
        assert!(is_email("someone@example.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_email("no-at-sign.example.com"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("someone@localhost"));
        assert!(!is_email("some one@example.com"));
        assert!(!is_email("a@b@example.com"));
        assert!(!is_email("someone@example."));
    }

    #[test]
    fn length_reports_custom_short_message() {
        let mut errors = ValidationError::default();
        length(&mut errors, "title", "ab", 3, 200, Some("Title must be at least 3 characters"));
        assert_eq!(errors.details.len(), 1);
        assert_eq!(errors.details[0].field, "title");
        assert_eq!(errors.details[0].message, "Title must be at least 3 characters");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut errors = ValidationError::default();
        length(&mut errors, "emoji", "🎉🎉", 0, 2, None);
        assert!(errors.is_empty());
    }
}
