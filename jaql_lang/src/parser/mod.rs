mod filter_type;
mod jaql;

pub use filter_type::{FilterType, detect_filter_type};
pub use jaql::{Jaql, parse_jaql, unwrap_scope};
