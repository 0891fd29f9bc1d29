//! Member list matching

use serde_json::Value;

use super::datetime::parse_datetime;
use super::numeric::value_as_number;
use super::text::value_as_text;
use crate::DataType;

/// Check whether a value is one of the listed members.
///
/// Numeric and datetime members are compared by value, so `5` matches
/// `"5.0"` and `"2024-01-01"` matches `"2024-01-01T00:00:00"`.
pub fn is_member(value: &Value, members: &[String], datatype: DataType) -> bool {
    match datatype {
        DataType::Text => match value_as_text(value) {
            Some(text) => members.iter().any(|member| member.as_str() == text.as_ref()),
            None => false,
        },
        DataType::Numeric => match value_as_number(value) {
            Some(number) => members
                .iter()
                .any(|member| member.trim().parse::<f64>().ok() == Some(number)),
            None => false,
        },
        DataType::DateTime => {
            let Some(text) = value.as_str() else {
                return false;
            };
            let parsed = parse_datetime(text);
            members.iter().any(|member| {
                member == text || (parsed.is_some() && parse_datetime(member) == parsed)
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn members(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_text_members() {
        let list = members(&["Male", "Female"]);
        assert!(is_member(&json!("Male"), &list, DataType::Text));
        assert!(!is_member(&json!("male"), &list, DataType::Text));
        assert!(!is_member(&Value::Null, &list, DataType::Text));
    }

    #[test]
    fn test_numeric_members() {
        let list = members(&["5", "7.5"]);
        assert!(is_member(&json!(5), &list, DataType::Numeric));
        assert!(is_member(&json!(5.0), &list, DataType::Numeric));
        assert!(is_member(&json!("7.5"), &list, DataType::Numeric));
        assert!(!is_member(&json!("five"), &list, DataType::Numeric));
    }

    #[test]
    fn test_datetime_members() {
        let list = members(&["2024-01-01T00:00:00"]);
        assert!(is_member(&json!("2024-01-01"), &list, DataType::DateTime));
        assert!(!is_member(&json!("2024-01-02"), &list, DataType::DateTime));
    }
}
