//! DateTime condition matching

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::filter::NumericOperator;

/// Parse a JAQL date value.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` (with optional fraction), RFC 3339 with an
/// offset, and plain `YYYY-MM-DD` dates at midnight.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Compare a date value against a bound. Unparseable values never match.
pub fn match_datetime(value: &Value, operator: NumericOperator, operand: &NaiveDateTime) -> bool {
    let Some(value) = value.as_str().and_then(parse_datetime) else {
        return false;
    };

    match operator {
        NumericOperator::Equals => &value == operand,
        NumericOperator::DoesntEqual => &value != operand,
        NumericOperator::From => &value >= operand,
        NumericOperator::To => &value <= operand,
        NumericOperator::FromNotEqual => &value > operand,
        NumericOperator::ToNotEqual => &value < operand,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDateTime {
        parse_datetime(s).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(date("2024-03-01"), date("2024-03-01T00:00:00"));
        assert!(parse_datetime("2024-03-01T10:30:00.250").is_some());
        assert_eq!(date("2024-03-01T12:00:00+02:00"), date("2024-03-01T10:00:00"));
        assert!(parse_datetime("March 1st").is_none());
    }

    #[test]
    fn test_bounds() {
        let bound = date("2024-01-01");
        assert!(match_datetime(&json!("2024-01-01T00:00:00"), NumericOperator::From, &bound));
        assert!(!match_datetime(&json!("2023-12-31"), NumericOperator::From, &bound));
        assert!(match_datetime(&json!("2023-12-31"), NumericOperator::ToNotEqual, &bound));
        assert!(!match_datetime(&json!("2024-01-01"), NumericOperator::FromNotEqual, &bound));
    }

    #[test]
    fn test_unparseable_never_matches() {
        let bound = date("2024-01-01");
        assert!(!match_datetime(&json!("soon"), NumericOperator::DoesntEqual, &bound));
        assert!(!match_datetime(&json!(20240101), NumericOperator::From, &bound));
        assert!(!match_datetime(&Value::Null, NumericOperator::To, &bound));
    }
}
