use std::path::Path;

use jaql_core::{DataType, compile_predicate};
use jaql_lang::create_filter_from_jaql;
use serde_json::{Value, json};

use crate::errors::CliError;
use crate::files::read_json;
use crate::ui::{self, OutputFormat};

/// Test raw values against the filter condition of a payload.
///
/// Values are parsed as JSON where possible so `5` is a number and
/// `"5"` a string; anything else is taken as text.
pub fn test_values(
    payload: &Value,
    values: &[String],
    datatype: Option<DataType>,
) -> Result<Vec<(Value, bool)>, CliError> {
    let filter = create_filter_from_jaql(payload, "cli");
    let datatype = datatype.unwrap_or_else(|| filter.datatype());
    let predicate = compile_predicate(&filter.filter_jaql(), datatype)?;

    Ok(values
        .iter()
        .map(|raw| serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone())))
        .map(|value| {
            let matches = predicate.test(&value);
            (value, matches)
        })
        .collect())
}

/// Tests values against a payload read from a file or stdin and prints the results.
pub fn test_payload(
    path: Option<&Path>,
    values: &[String],
    datatype: Option<DataType>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    let payload = read_json(path)?;
    let results = test_values(&payload, values, datatype).inspect_err(|e| {
        ui::error(&format!("Failed to compile condition: {}", e));
    })?;

    match output_format {
        OutputFormat::Pretty => {
            ui::header("Testing values");
            let matched = results.iter().filter(|(_, matches)| *matches).count();
            ui::success(&format!("{} of {} values match", matched, results.len()));
            for (value, matches) in &results {
                ui::pretty_output_test_result(value, *matches);
            }
        }
        OutputFormat::Json => {
            let output: Vec<Value> = results
                .iter()
                .map(|(value, matches)| json!({ "value": value, "matches": matches }))
                .collect();
            ui::json_output(&output);
        }
    }

    Ok(())
}
