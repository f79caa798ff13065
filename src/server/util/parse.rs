/// Parses an optional query value into a positive integer.
///
/// Missing, malformed, zero and negative values all yield `None`, so callers
/// fall back to their defaults the same way for every kind of bad input.
///
/// # Arguments
/// - `value` - Raw query string value, if present
///
/// # Returns
/// - `Some(u64)` - A positive integer
/// - `None` - Value absent or not a positive integer
pub fn parse_positive_u64(value: Option<&str>) -> Option<u64> {
    value
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_values() {
        assert_eq!(parse_positive_u64(Some("3")), Some(3));
        assert_eq!(parse_positive_u64(Some(" 12 ")), Some(12));
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        assert_eq!(parse_positive_u64(Some("0")), None);
        assert_eq!(parse_positive_u64(Some("-4")), None);
        assert_eq!(parse_positive_u64(Some("abc")), None);
        assert_eq!(parse_positive_u64(None), None);
    }
}
