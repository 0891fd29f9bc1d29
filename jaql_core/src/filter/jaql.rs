//! Serialization of filters back to the JAQL wire format

use serde_json::{Map, Number, Value, json};

use super::{Filter, FilterKind, NumericBound};

/// Item fields owned by the typed model. Everything else in the original
/// item is carried through unchanged.
const MODEL_KEYS: [&str; 7] = [
    "dim",
    "datatype",
    "level",
    "title",
    "agg",
    "filter",
    "multiSelection",
];

impl Filter {
    /// Serialize to JAQL.
    ///
    /// Top-level payloads are wrapped as `{"jaql": ..., "panel": "scope"}`;
    /// `nested` returns the bare JAQL for use inside relations.
    pub fn jaql(&self, nested: bool) -> Value {
        let jaql = match (&self.kind, &self.config.original_filter_jaql) {
            (FilterKind::Custom(_), Some(original)) => original.clone(),
            _ => self.build_jaql(),
        };

        if nested {
            jaql
        } else {
            json!({ "jaql": jaql, "panel": "scope" })
        }
    }

    /// The `filter` sub-object of this filter's JAQL, including any
    /// background filter
    pub fn filter_jaql(&self) -> Value {
        let own = self.own_condition_jaql();
        match &self.config.background_filter {
            Some(background) => json!({ "and": [own, background.condition_jaql()] }),
            None => own,
        }
    }

    fn build_jaql(&self) -> Value {
        let mut typed = self.target_jaql();
        typed.insert("filter".to_string(), self.filter_jaql());
        if let FilterKind::Members(_) = &self.kind {
            typed.insert(
                "multiSelection".to_string(),
                Value::Bool(self.config.enable_multi_selection),
            );
        }

        let Some(Value::Object(original)) = &self.config.original_filter_jaql else {
            return Value::Object(typed);
        };

        let mut jaql = original.clone();
        jaql.retain(|key, _| !MODEL_KEYS.contains(&key.as_str()) || typed.contains_key(key));
        for (key, value) in typed {
            jaql.insert(key, value);
        }
        Value::Object(jaql)
    }

    /// The original `filter` object when the typed condition is contained in
    /// it unchanged, so keys the model cannot express survive a round trip.
    /// Any edit to the typed condition falls back to the typed form.
    fn own_condition_jaql(&self) -> Value {
        let typed = self.condition_jaql();
        let original = self
            .config
            .original_filter_jaql
            .as_ref()
            .and_then(|jaql| jaql.get("filter"));

        match (original, &typed) {
            (Some(Value::Object(original)), Value::Object(fields))
                if fields.iter().all(|(key, value)| original.get(key) == Some(value)) =>
            {
                Value::Object(original.clone())
            }
            _ => typed,
        }
    }

    fn target_jaql(&self) -> Map<String, Value> {
        match &self.kind {
            FilterKind::Members(f) => f.attribute.jaql(),
            FilterKind::Text(f) => f.attribute.jaql(),
            FilterKind::Numeric(f) => f.target.jaql(),
            FilterKind::DateRange(f) => f.attribute.jaql(),
            FilterKind::RelativeDate(f) => f.attribute.jaql(),
            FilterKind::Ranking(f) => f.attribute.jaql(),
            FilterKind::Exclude(f) => f.inner.target_jaql(),
            FilterKind::Logical(f) => f.target.jaql(),
            FilterKind::Custom(f) => {
                let mut jaql = Map::new();
                jaql.insert("dim".to_string(), Value::String(f.attribute_id.clone()));
                jaql
            }
        }
    }

    fn condition_jaql(&self) -> Value {
        match &self.kind {
            FilterKind::Members(f) => {
                if self.config.exclude_members {
                    json!({ "exclude": { "members": f.members } })
                } else if !self.config.deactivated_members.is_empty() {
                    let mut all_members = f.members.clone();
                    all_members.extend(self.config.deactivated_members.iter().cloned());
                    json!({
                        "members": all_members,
                        "exclude": {
                            "members": self.config.deactivated_members,
                            "turnedOff": true,
                        },
                    })
                } else {
                    json!({ "members": f.members })
                }
            }
            FilterKind::Text(f) => {
                let mut condition = Map::new();
                condition.insert(f.operator.key().to_string(), Value::String(f.value.clone()));
                Value::Object(condition)
            }
            FilterKind::Numeric(f) => {
                let mut condition = Map::new();
                for bound in f.bounds() {
                    insert_bound(&mut condition, bound);
                }
                Value::Object(condition)
            }
            FilterKind::DateRange(f) => {
                let mut condition = Map::new();
                if let Some(from) = &f.from {
                    condition.insert("from".to_string(), Value::String(from.clone()));
                }
                if let Some(to) = &f.to {
                    condition.insert("to".to_string(), Value::String(to.clone()));
                }
                Value::Object(condition)
            }
            FilterKind::RelativeDate(f) => {
                let mut period = Map::new();
                period.insert("offset".to_string(), json!(f.offset));
                period.insert("count".to_string(), json!(f.count));
                if let Some(anchor) = &f.anchor {
                    period.insert("anchor".to_string(), Value::String(anchor.clone()));
                }
                let mut condition = Map::new();
                condition.insert(f.direction.key().to_string(), Value::Object(period));
                Value::Object(condition)
            }
            FilterKind::Ranking(f) => {
                let mut condition = Map::new();
                condition.insert(f.direction.key().to_string(), json!(f.count));
                condition.insert("by".to_string(), Value::Object(f.measure.jaql()));
                Value::Object(condition)
            }
            FilterKind::Exclude(f) => json!({ "exclude": f.inner.condition_jaql() }),
            FilterKind::Logical(f) => {
                let conditions: Vec<Value> =
                    f.filters.iter().map(|filter| filter.condition_jaql()).collect();
                let mut condition = Map::new();
                condition.insert(f.operator.key().to_string(), Value::Array(conditions));
                Value::Object(condition)
            }
            FilterKind::Custom(f) => f.condition.clone(),
        }
    }
}

fn insert_bound(condition: &mut Map<String, Value>, bound: &NumericBound) {
    condition.insert(bound.operator.key().to_string(), number_value(bound.value));
}

/// Whole numbers are written as integers so `5` does not come back as `5.0`
pub(crate) fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.is_finite() && value.abs() < i64::MAX as f64 {
        Value::Number(Number::from(value as i64))
    } else {
        Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
