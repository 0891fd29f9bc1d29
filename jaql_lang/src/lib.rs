//! Wire-format support for JAQL filters
//!
//! - `parser`: typed view over raw JAQL payloads and filter type detection
//! - `convert`: JAQL to `Filter` and relations JSON to `Filters`
//! - `generate`: relations and dashboard items back to JSON

pub mod convert;
pub mod generate;
pub mod parser;

pub use convert::{
    RelationsJaqlError, TranslationError, create_filter_from_dashboard_item,
    create_filter_from_jaql, create_generic_filter, parse_dashboard_filters,
    relations_from_jaql, translate_filter_type, try_create_filter,
};
pub use generate::{dashboard_document, dashboard_item_jaql, relations_to_jaql};
pub use parser::{FilterType, Jaql};
