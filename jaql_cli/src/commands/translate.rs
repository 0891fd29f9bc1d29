use std::path::Path;

use jaql_core::Filter;
use jaql_lang::{
    FilterType, TranslationError, create_generic_filter, translate_filter_type, try_create_filter,
};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::CliError;
use crate::files::read_json;
use crate::ui::{self, OutputFormat};

/// Result of translating one payload
#[derive(Debug)]
pub struct Translation {
    pub filter_type: Result<FilterType, TranslationError>,
    pub filter: Filter,
}

/// Translate a payload, keeping the detected type or the reason for the
/// generic fallback for reporting.
pub fn translate_jaql(payload: &Value, guid: &str) -> Translation {
    match try_create_filter(payload, guid) {
        Ok(filter) => Translation {
            filter_type: translate_filter_type(payload),
            filter,
        },
        Err(e) => Translation {
            filter_type: Err(e),
            filter: create_generic_filter(payload, guid),
        },
    }
}

/// Translates a JAQL payload from a file or stdin and prints the filter.
pub fn translate_payload(
    path: Option<&Path>,
    guid: Option<String>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    let payload = read_json(path)?;
    let guid = guid.unwrap_or_else(|| Uuid::new_v4().to_string());
    ui::debug(&format!("Translating payload as filter '{}'", guid));

    let translation = translate_jaql(&payload, &guid);

    match output_format {
        OutputFormat::Pretty => {
            ui::header("Translating JAQL");
            match &translation.filter_type {
                Ok(filter_type) => ui::info(&format!("Detected {} filter", filter_type)),
                Err(e) => ui::warning(&format!("Using generic filter: {}", e)),
            }
            ui::success(&format!("Translated to {} filter", translation.filter.kind_name()));
            ui::pretty_output_filter(&translation.filter);
        }
        OutputFormat::Json => ui::json_output(&translation.filter.jaql(false)),
    }

    Ok(())
}
