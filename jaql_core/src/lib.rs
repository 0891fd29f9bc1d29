//! Core data structures for JAQL query filters
//!
//! This crate provides:
//! - A typed filter model (`Filter`, `FilterKind`, `FilterConfig`)
//! - Serialization of filters back to the JAQL wire format
//! - The relations algebra for flat filter lists and AND/OR trees
//! - A compiler from JAQL conditions to local value predicates
//!
//! Parsing JAQL payloads into filters lives in `jaql_lang`.

mod attribute;
pub mod filter;
pub mod predicate;
pub mod relations;

pub use attribute::{Attribute, DataType, FilterTarget, Measure};
pub use filter::{Filter, FilterConfig, FilterKind};
pub use predicate::{ConditionError, Predicate, compile_predicate};
pub use relations::{FilterRelations, Filters, RelationOperator, RelationsRule};
