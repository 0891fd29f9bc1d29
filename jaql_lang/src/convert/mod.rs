pub mod conversion_errors;
pub mod to_filter;
pub mod to_relations;

pub use conversion_errors::{RelationsJaqlError, TranslationError};
pub use to_filter::{
    create_filter_from_dashboard_item, create_filter_from_jaql, create_generic_filter,
    translate_filter_type, try_create_filter,
};
pub use to_relations::{parse_dashboard_filters, relations_from_jaql};
