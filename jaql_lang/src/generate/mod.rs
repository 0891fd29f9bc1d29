//! Serialization of relations and dashboard filter documents

mod relations;

pub use relations::{dashboard_document, dashboard_item_jaql, relations_to_jaql};
