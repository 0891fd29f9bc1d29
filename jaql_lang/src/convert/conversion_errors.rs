use std::fmt;

/// Why a JAQL item could not be translated into a typed filter.
///
/// These never reach callers of `create_filter_from_jaql`; they decide when
/// the generic filter is used instead.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationError {
    FormulaNotSupported,
    MissingDimension,
    Malformed(String),
    InvalidCondition(String),
    UnknownShape,
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::FormulaNotSupported => {
                write!(f, "Formula filters cannot be translated")
            }
            TranslationError::MissingDimension => write!(f, "JAQL item has no 'dim'"),
            TranslationError::Malformed(msg) => write!(f, "Malformed JAQL: {}", msg),
            TranslationError::InvalidCondition(msg) => write!(f, "Invalid filter condition: {}", msg),
            TranslationError::UnknownShape => write!(f, "Filter does not match any known shape"),
        }
    }
}

impl std::error::Error for TranslationError {}

/// Errors reading the filter relations wire format
#[derive(Debug, Clone, PartialEq)]
pub enum RelationsJaqlError {
    UnknownInstance(String),
    InvalidNode(String),
    UnknownOperator(String),
    InvalidDocument(String),
}

impl fmt::Display for RelationsJaqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationsJaqlError::UnknownInstance(guid) => {
                write!(f, "Relations reference unknown filter '{}'", guid)
            }
            RelationsJaqlError::InvalidNode(node) => write!(f, "Invalid relations node: {}", node),
            RelationsJaqlError::UnknownOperator(operator) => {
                write!(f, "Unknown relations operator '{}'", operator)
            }
            RelationsJaqlError::InvalidDocument(msg) => {
                write!(f, "Invalid dashboard document: {}", msg)
            }
        }
    }
}

impl std::error::Error for RelationsJaqlError {}
