//! Error types for condition compilation

use std::fmt;

/// Errors that can occur while compiling a JAQL condition into a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionError {
    /// Operator cannot be evaluated locally for the given data type
    UnsupportedOperator { operator: String, datatype: String },
    /// Operand has the wrong JSON shape for its operator
    InvalidOperand { operator: String, expected: String },
    /// Condition is not a JSON object, or a combinator is not an array
    InvalidCondition(String),
}

impl ConditionError {
    pub(crate) fn invalid_operand(operator: &str, expected: &str) -> Self {
        ConditionError::InvalidOperand {
            operator: operator.to_string(),
            expected: expected.to_string(),
        }
    }
}

impl fmt::Display for ConditionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionError::UnsupportedOperator { operator, datatype } => {
                write!(
                    f,
                    "Cannot evaluate '{}' locally on {} values",
                    operator, datatype
                )
            }
            ConditionError::InvalidOperand { operator, expected } => {
                write!(f, "Operand of '{}' must be {}", operator, expected)
            }
            ConditionError::InvalidCondition(msg) => write!(f, "Invalid condition: {}", msg),
        }
    }
}

impl std::error::Error for ConditionError {}
