use std::fs;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use crate::errors::CliError;

/// Read a JSON document from a file, or from stdin when no path is given.
pub fn read_json(path: Option<&Path>) -> Result<Value, CliError> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::IoError(Some(path.to_path_buf()), e))?,
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| CliError::IoError(None, e))?;
            content
        }
    };

    Ok(serde_json::from_str(&content)?)
}
