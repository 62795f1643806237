/// Parse an optional numeric query value. Missing or non-numeric input
/// yields `None` so callers fall back to their defaults instead of
/// erroring.
pub fn numeric_param(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(numeric_param(Some("42")), Some(42));
        assert_eq!(numeric_param(Some("0")), Some(0));
    }

    #[test]
    fn garbage_and_absence_fall_back() {
        assert_eq!(numeric_param(None), None);
        assert_eq!(numeric_param(Some("")), None);
        assert_eq!(numeric_param(Some("ten")), None);
        assert_eq!(numeric_param(Some("-1")), None);
        assert_eq!(numeric_param(Some("1.5")), None);
    }
}
