//! Numeric condition matching

use serde_json::Value;

use crate::filter::NumericOperator;

/// Numeric form of a value. Numeric strings are parsed; NaN, infinities and
/// every other value are not numbers.
pub fn value_as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Compare a value against a numeric operand. Values that are not numbers
/// never match, including under `doesntEqual`.
pub fn match_numeric(value: &Value, operator: NumericOperator, operand: f64) -> bool {
    let Some(value) = value_as_number(value) else {
        return false;
    };

    match operator {
        NumericOperator::Equals => value == operand,
        NumericOperator::DoesntEqual => value != operand,
        NumericOperator::From => value >= operand,
        NumericOperator::To => value <= operand,
        NumericOperator::FromNotEqual => value > operand,
        NumericOperator::ToNotEqual => value < operand,
    }
}
