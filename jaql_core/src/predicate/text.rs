//! Text condition matching

use std::borrow::Cow;

use serde_json::Value;

use crate::filter::TextOperator;

/// String form of a value, or None for null, arrays and objects
pub(crate) fn value_as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

/// Case-sensitive text comparison. Negated operators are the exact negation
/// of their positive form, so a null value passes `doesntContain`.
pub fn match_text(value: &Value, operator: TextOperator, operand: &str) -> bool {
    let matched = match value_as_text(value) {
        Some(text) => match operator.positive() {
            TextOperator::StartsWith => text.starts_with(operand),
            TextOperator::EndsWith => text.ends_with(operand),
            TextOperator::Contains => text.contains(operand),
            _ => text == operand,
        },
        None => false,
    };

    if operator.is_negated() {
        !matched
    } else {
        matched
    }
}
