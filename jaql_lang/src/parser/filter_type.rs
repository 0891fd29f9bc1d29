//! Detection of the filter shape described by a JAQL item

use std::fmt;

use jaql_core::DataType;
use jaql_core::filter::{NumericOperator, TextOperator};
use serde_json::{Map, Value};

use super::Jaql;
use crate::convert::TranslationError;

/// Filter shapes, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    IncludeAll,
    SpecificItems,
    Condition,
    DateRange,
    NumericRange,
    Period,
    Advanced,
    Invalid,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::IncludeAll => "INCLUDE_ALL",
            FilterType::SpecificItems => "SPECIFIC_ITEMS",
            FilterType::Condition => "CONDITION",
            FilterType::DateRange => "DATE_RANGE",
            FilterType::NumericRange => "NUMERIC_RANGE",
            FilterType::Period => "PERIOD",
            FilterType::Advanced => "ADVANCED",
            FilterType::Invalid => "INVALID",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Keys an include-all filter may carry
const INCLUDE_ALL_KEYS: [&str; 4] = ["members", "all", "explicit", "multiSelection"];

/// Keys that never describe a condition on their own
const PRESENTATION_KEYS: [&str; 5] = [
    "explicit",
    "multiSelection",
    "isCondition",
    "rankingMessage",
    "custom",
];

/// Condition keys besides the text and numeric comparison operators
const COMBINATOR_KEYS: [&str; 4] = ["and", "or", "top", "bottom"];

/// Classify a JAQL item.
///
/// Formulas are rejected outright; callers fall back to a generic filter.
pub fn detect_filter_type(jaql: &Jaql) -> Result<FilterType, TranslationError> {
    if jaql.has_formula() {
        return Err(TranslationError::FormulaNotSupported);
    }

    let Some(filter) = jaql.filter_object() else {
        return Ok(FilterType::Invalid);
    };

    if is_include_all(filter) {
        return Ok(FilterType::IncludeAll);
    }
    if has_members(filter) {
        return Ok(FilterType::SpecificItems);
    }

    let datatype = jaql.datatype();
    if is_condition(filter, datatype) {
        return Ok(FilterType::Condition);
    }

    let has_from = filter.contains_key("from");
    let has_to = filter.contains_key("to");
    if has_from || has_to {
        return Ok(match datatype {
            DataType::DateTime => FilterType::DateRange,
            _ => FilterType::NumericRange,
        });
    }

    if filter.contains_key("last") || filter.contains_key("next") {
        return Ok(FilterType::Period);
    }

    let has_other_keys = filter
        .keys()
        .any(|key| !PRESENTATION_KEYS.contains(&key.as_str()));
    Ok(if has_other_keys {
        FilterType::Advanced
    } else {
        FilterType::Invalid
    })
}

fn is_include_all(filter: &Map<String, Value>) -> bool {
    let only_known_keys = filter
        .keys()
        .all(|key| INCLUDE_ALL_KEYS.contains(&key.as_str()));
    let no_members = match filter.get("members") {
        None => true,
        Some(Value::Array(members)) => members.is_empty(),
        Some(_) => false,
    };
    only_known_keys && no_members
}

fn has_members(filter: &Map<String, Value>) -> bool {
    filter.contains_key("members")
        || filter
            .get("exclude")
            .and_then(Value::as_object)
            .is_some_and(|exclude| exclude.contains_key("members"))
}

fn is_condition(filter: &Map<String, Value>, datatype: DataType) -> bool {
    let has_comparison = filter.keys().any(|key| {
        TextOperator::from_key(key).is_some()
            || COMBINATOR_KEYS.contains(&key.as_str())
            || matches!(
                NumericOperator::from_key(key),
                Some(NumericOperator::FromNotEqual | NumericOperator::ToNotEqual)
            )
    });
    if has_comparison {
        return true;
    }

    // The members case was handled before, so any exclude here is a condition
    if filter.contains_key("exclude") {
        return true;
    }

    // Text columns have no ranges, a single bound there is a comparison
    datatype == DataType::Text && (filter.contains_key("from") || filter.contains_key("to"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_jaql;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn detect(payload: Value) -> Result<FilterType, TranslationError> {
        detect_filter_type(&parse_jaql(&payload).unwrap())
    }

    #[test]
    fn test_formula_is_rejected() {
        let result = detect(json!({"dim": "[T.C]", "filter": {"formula": "X"}}));
        assert_matches!(result, Err(TranslationError::FormulaNotSupported));
        let result = detect(json!({"formula": "SUM([x])", "filter": {"members": []}}));
        assert_matches!(result, Err(TranslationError::FormulaNotSupported));
    }

    #[test]
    fn test_include_all() {
        assert_eq!(detect(json!({"dim": "[T.C]", "filter": {"members": []}})).unwrap(), FilterType::IncludeAll);
        assert_eq!(detect(json!({"dim": "[T.C]", "filter": {"all": true, "explicit": false}})).unwrap(), FilterType::IncludeAll);
        assert_eq!(detect(json!({"dim": "[T.C]", "filter": {}})).unwrap(), FilterType::IncludeAll);
    }

    #[test]
    fn test_specific_items() {
        assert_eq!(detect(json!({"dim": "[T.C]", "filter": {"members": ["a"]}})).unwrap(), FilterType::SpecificItems);
        assert_eq!(
            detect(json!({"dim": "[T.C]", "filter": {"exclude": {"members": ["a"]}}})).unwrap(),
            FilterType::SpecificItems
        );
    }

    #[test]
    fn test_conditions() {
        for filter in [
            json!({"contains": "x"}),
            json!({"equals": 5}),
            json!({"fromNotEqual": 5}),
            json!({"or": [{"equals": 1}, {"equals": 2}]}),
            json!({"top": 10, "by": {"dim": "[T.R]", "agg": "sum"}}),
            json!({"exclude": {"from": 1, "to": 5}}),
        ] {
            let result = detect(json!({"dim": "[T.C]", "datatype": "numeric", "filter": filter}));
            assert_eq!(result.unwrap(), FilterType::Condition);
        }
    }

    #[test]
    fn test_ranges() {
        assert_eq!(
            detect(json!({"dim": "[T.C]", "datatype": "numeric", "filter": {"from": 1, "to": 5}})).unwrap(),
            FilterType::NumericRange
        );
        assert_eq!(
            detect(json!({"dim": "[T.D]", "datatype": "datetime", "filter": {"from": "2024-01-01"}})).unwrap(),
            FilterType::DateRange
        );
        assert_eq!(
            detect(json!({"dim": "[T.C]", "datatype": "numeric", "filter": {"to": 5}})).unwrap(),
            FilterType::NumericRange
        );
        assert_eq!(
            detect(json!({"dim": "[T.C]", "datatype": "text", "filter": {"from": "m"}})).unwrap(),
            FilterType::Condition
        );
    }

    #[test]
    fn test_period() {
        let result = detect(json!({"dim": "[T.D]", "datatype": "datetime", "filter": {"last": {"offset": 0, "count": 2}}}));
        assert_eq!(result.unwrap(), FilterType::Period);
    }

    #[test]
    fn test_advanced_and_invalid() {
        assert_eq!(
            detect(json!({"dim": "[T.C]", "filter": {"rankingFunction": "x"}})).unwrap(),
            FilterType::Advanced
        );
        assert_eq!(detect(json!({"dim": "[T.C]"})).unwrap(), FilterType::Invalid);
        assert_eq!(detect(json!({"dim": "[T.C]", "filter": {"isCondition": true}})).unwrap(), FilterType::Invalid);
    }
}
