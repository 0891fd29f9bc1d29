use std::path::Path;

use jaql_core::Filters;
use jaql_core::relations::{find_filter, remove_filter};
use jaql_lang::{dashboard_document, parse_dashboard_filters};
use serde_json::Value;

use crate::errors::CliError;
use crate::files::read_json;
use crate::ui::{self, OutputFormat};

/// Read a dashboard document and remove the filters with the given guids.
pub fn edit_relations(document: &Value, remove: &[String]) -> Result<Filters, CliError> {
    let mut filters = parse_dashboard_filters(document)?;

    for guid in remove {
        let filter = find_filter(&filters, |f| f.guid() == guid.as_str())
            .cloned()
            .ok_or_else(|| CliError::UnknownFilter(guid.clone()))?;
        ui::debug(&format!("Removing filter '{}'", guid));
        filters = remove_filter(&filter, filters);
    }

    Ok(filters)
}

/// Loads a dashboard document, applies removals and prints the result.
pub fn relations_document(
    path: &Path,
    remove: &[String],
    output_format: OutputFormat,
) -> Result<(), CliError> {
    let document = read_json(Some(path))?;
    let filters = edit_relations(&document, remove).inspect_err(|e| {
        ui::error(&format!("Failed to read relations: {}", e));
    })?;

    match output_format {
        OutputFormat::Pretty => {
            ui::header("Filter relations");
            if !remove.is_empty() {
                ui::success(&format!("Removed {} filters", remove.len()));
            }
            ui::pretty_output_filters(&filters);
        }
        OutputFormat::Json => ui::json_output(&dashboard_document(&filters)),
    }

    Ok(())
}
