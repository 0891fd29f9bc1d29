use std::{fmt, io, path::PathBuf};

use jaql_core::ConditionError;
use jaql_lang::RelationsJaqlError;

/// Defines the errors a CLI command can end with.
#[derive(Debug)]
pub enum CliError {
    IoError(Option<PathBuf>, io::Error),
    JsonError(serde_json::Error),
    ConditionError(ConditionError),
    RelationsError(RelationsJaqlError),
    UnknownFilter(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(Some(path), error) => {
                write!(f, "Could not read {}: {}", path.display(), error)
            }
            CliError::IoError(None, error) => write!(f, "Could not read stdin: {}", error),
            CliError::JsonError(error) => write!(f, "Input is not valid JSON: {}", error),
            CliError::ConditionError(error) => {
                write!(f, "Condition cannot be tested locally: {}", error)
            }
            CliError::RelationsError(error) => write!(f, "{}", error),
            CliError::UnknownFilter(guid) => write!(f, "No filter with guid '{}'", guid),
        }
    }
}

impl std::error::Error for CliError {}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::JsonError(error)
    }
}

impl From<ConditionError> for CliError {
    fn from(error: ConditionError) -> Self {
        CliError::ConditionError(error)
    }
}

impl From<RelationsJaqlError> for CliError {
    fn from(error: RelationsJaqlError) -> Self {
        CliError::RelationsError(error)
    }
}
