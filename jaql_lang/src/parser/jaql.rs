//! Typed view over a JAQL metadata item

use jaql_core::{Attribute, DataType, FilterTarget, Measure};
use serde::Deserialize;
use serde_json::{Map, Value};

/// The fields of a JAQL item that filter translation reads.
///
/// `filter` stays raw JSON so unrecognized keys survive.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jaql {
    pub dim: Option<String>,
    pub datatype: Option<String>,
    pub title: Option<String>,
    pub agg: Option<String>,
    pub formula: Option<Value>,
    pub level: Option<String>,
    pub filter: Option<Value>,
    pub multi_selection: Option<bool>,
}

impl Jaql {
    /// Declared data type. Missing or unknown types are treated as text.
    pub fn datatype(&self) -> DataType {
        self.datatype
            .as_deref()
            .and_then(DataType::parse)
            .unwrap_or_default()
    }

    /// The `filter` object, if present and an object
    pub fn filter_object(&self) -> Option<&Map<String, Value>> {
        self.filter.as_ref().and_then(Value::as_object)
    }

    /// A formula either on the item itself or inside its filter
    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
            || self
                .filter_object()
                .is_some_and(|filter| filter.contains_key("formula"))
    }

    /// Multi-selection flag from the item, then the filter, defaulting to true
    pub fn multi_selection(&self) -> bool {
        self.multi_selection
            .or_else(|| {
                self.filter_object()
                    .and_then(|filter| filter.get("multiSelection"))
                    .and_then(Value::as_bool)
            })
            .unwrap_or(true)
    }

    /// The attribute this item references, or None without a `dim`
    pub fn attribute(&self) -> Option<Attribute> {
        let dim = self.dim.as_ref()?;
        let title = self.title.clone().unwrap_or_else(|| dim.clone());
        let attribute = Attribute::new(dim.clone(), title, self.datatype());
        Some(match &self.level {
            Some(level) => attribute.with_level(level.clone()),
            None => attribute,
        })
    }

    /// A measure when the item aggregates, otherwise the plain attribute
    pub fn target(&self) -> Option<FilterTarget> {
        let attribute = self.attribute()?;
        Some(match &self.agg {
            Some(agg) => {
                let title = attribute.title.clone();
                Measure::new(attribute, agg.clone()).with_title(title).into()
            }
            None => attribute.into(),
        })
    }
}

/// Strip the `{"jaql": ..., "panel": ...}` wrapper of top-level payloads
pub fn unwrap_scope(payload: &Value) -> &Value {
    match payload.get("jaql") {
        Some(inner) if inner.is_object() => inner,
        _ => payload,
    }
}

/// Read a JAQL item from a payload, unwrapping a scoped wrapper first
pub fn parse_jaql(payload: &Value) -> Result<Jaql, serde_json::Error> {
    Jaql::deserialize(unwrap_scope(payload))
}
