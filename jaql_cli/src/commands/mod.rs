mod evaluate;
mod relations;
mod translate;

pub use evaluate::{test_payload, test_values};
pub use relations::{edit_relations, relations_document};
pub use translate::{Translation, translate_jaql, translate_payload};
