//! Compilation of JAQL filter conditions into local predicates
//!
//! A compiled [`Predicate`] tests raw values without a server round-trip,
//! e.g. to highlight matching members. Predicates are total: every input
//! value yields a boolean.

mod condition_errors;
mod datetime;
mod members;
mod numeric;
mod text;

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde_json::Value;

pub use condition_errors::ConditionError;
pub use datetime::{match_datetime, parse_datetime};
pub use members::is_member;
pub use numeric::{match_numeric, value_as_number};
pub use text::match_text;

use crate::DataType;
use crate::filter::{NumericOperator, TextOperator};

/// Keys describing presentation or selection state rather than a condition
const IGNORED_KEYS: [&str; 5] = [
    "explicit",
    "multiSelection",
    "turnedOff",
    "isCondition",
    "rankingMessage",
];

#[derive(Debug, Clone)]
enum Rule {
    Always,
    Members(Vec<String>),
    Text(TextOperator, String),
    Numeric(NumericOperator, f64),
    DateTime(NumericOperator, NaiveDateTime),
    Not(Box<Rule>),
    All(Vec<Rule>),
    Any(Vec<Rule>),
}

impl Rule {
    fn test(&self, value: &Value, datatype: DataType) -> bool {
        match self {
            Rule::Always => true,
            Rule::Members(members) => is_member(value, members, datatype),
            Rule::Text(operator, operand) => match_text(value, *operator, operand),
            Rule::Numeric(operator, operand) => match_numeric(value, *operator, *operand),
            Rule::DateTime(operator, operand) => match_datetime(value, *operator, operand),
            Rule::Not(rule) => !rule.test(value, datatype),
            Rule::All(rules) => rules.iter().all(|rule| rule.test(value, datatype)),
            Rule::Any(rules) => rules.iter().any(|rule| rule.test(value, datatype)),
        }
    }
}

/// A compiled, stateless value test
#[derive(Debug, Clone)]
pub struct Predicate {
    rule: Arc<Rule>,
    datatype: DataType,
}

impl Predicate {
    pub fn datatype(&self) -> DataType {
        self.datatype
    }

    /// Test a value against the compiled condition
    pub fn test(&self, value: &Value) -> bool {
        self.rule.test(value, self.datatype)
    }

    /// Turn the predicate into a plain closure
    pub fn into_fn(self) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
        move |value| self.test(value)
    }
}

/// Compile a JAQL `filter` object into a predicate over values of `datatype`.
///
/// All keys of one condition object must hold (`{from: 1, to: 5}` is a
/// closed range). `and`/`or` arrays nest to any depth and are compiled with
/// the same data type.
pub fn compile_predicate(condition: &Value, datatype: DataType) -> Result<Predicate, ConditionError> {
    let rule = compile_condition(condition, datatype)?;
    Ok(Predicate {
        rule: Arc::new(rule),
        datatype,
    })
}

fn compile_condition(condition: &Value, datatype: DataType) -> Result<Rule, ConditionError> {
    let object = condition.as_object().ok_or_else(|| {
        ConditionError::InvalidCondition(format!("expected an object, found {}", condition))
    })?;

    let mut rules = Vec::new();
    for (key, operand) in object {
        if let Some(rule) = compile_key(key, operand, datatype)? {
            rules.push(rule);
        }
    }

    Ok(match rules.len() {
        0 => Rule::Always,
        1 => rules.remove(0),
        _ => Rule::All(rules),
    })
}

fn compile_key(key: &str, operand: &Value, datatype: DataType) -> Result<Option<Rule>, ConditionError> {
    if IGNORED_KEYS.contains(&key) {
        return Ok(None);
    }

    match key {
        "all" => Ok(None),
        "members" => {
            let members = member_list(key, operand)?;
            // an empty selection is include-all
            if members.is_empty() {
                Ok(None)
            } else {
                Ok(Some(Rule::Members(members)))
            }
        }
        "exclude" => match compile_condition(operand, datatype)? {
            Rule::Always => Ok(None),
            inner => Ok(Some(Rule::Not(Box::new(inner)))),
        },
        "and" | "or" => {
            let items = operand.as_array().ok_or_else(|| {
                ConditionError::InvalidCondition(format!("'{}' must be an array", key))
            })?;
            let rules = items
                .iter()
                .map(|item| compile_condition(item, datatype))
                .collect::<Result<Vec<_>, _>>()?;
            if key == "and" {
                Ok(Some(Rule::All(rules)))
            } else {
                Ok(Some(Rule::Any(rules)))
            }
        }
        _ => compile_comparison(key, operand, datatype).map(Some),
    }
}

fn compile_comparison(key: &str, operand: &Value, datatype: DataType) -> Result<Rule, ConditionError> {
    let unsupported = || ConditionError::UnsupportedOperator {
        operator: key.to_string(),
        datatype: datatype.to_string(),
    };

    match datatype {
        DataType::Text => {
            let operator = TextOperator::from_key(key).ok_or_else(unsupported)?;
            let operand = match operand {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err(ConditionError::invalid_operand(key, "a string")),
            };
            Ok(Rule::Text(operator, operand))
        }
        DataType::Numeric => {
            let operator = NumericOperator::from_key(key).ok_or_else(unsupported)?;
            let operand = numeric::value_as_number(operand)
                .ok_or_else(|| ConditionError::invalid_operand(key, "a number"))?;
            Ok(Rule::Numeric(operator, operand))
        }
        DataType::DateTime => {
            let operator = NumericOperator::from_key(key).ok_or_else(unsupported)?;
            let operand = operand
                .as_str()
                .and_then(parse_datetime)
                .ok_or_else(|| ConditionError::invalid_operand(key, "a date string"))?;
            Ok(Rule::DateTime(operator, operand))
        }
    }
}

fn member_list(key: &str, operand: &Value) -> Result<Vec<String>, ConditionError> {
    let items = operand
        .as_array()
        .ok_or_else(|| ConditionError::invalid_operand(key, "an array"))?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            _ => Err(ConditionError::invalid_operand(key, "an array of strings")),
        })
        .collect()
}
