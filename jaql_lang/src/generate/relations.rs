use jaql_core::relations::split_filters_and_relations;
use jaql_core::{Filter, Filters, RelationsRule};
use serde_json::{Map, Value, json};

/// Serialize the relations of `filters`.
///
/// A flat list has no relations and yields None.
pub fn relations_to_jaql(filters: &Filters) -> Option<Value> {
    match filters {
        Filters::List(_) => None,
        Filters::Relations(relations) => {
            let (_, rule) = split_filters_and_relations(relations.clone());
            Some(rule_to_jaql(&rule))
        }
    }
}

fn rule_to_jaql(rule: &RelationsRule) -> Value {
    match rule {
        RelationsRule::Filter(guid) => json!({ "instanceid": guid }),
        RelationsRule::Node {
            operator,
            left,
            right,
        } => json!({
            "operator": operator.as_str(),
            "left": rule_to_jaql(left),
            "right": rule_to_jaql(right),
        }),
    }
}

/// A dashboard filter item carrying the filter's bare JAQL and config flags
pub fn dashboard_item_jaql(filter: &Filter) -> Value {
    let mut item = Map::new();
    item.insert("jaql".to_string(), filter.jaql(true));
    item.insert("instanceid".to_string(), Value::String(filter.guid().to_string()));
    item.insert("disabled".to_string(), Value::Bool(filter.config.disabled));
    item.insert("locked".to_string(), Value::Bool(filter.config.locked));
    Value::Object(item)
}

/// A dashboard document `{filters, filterRelations?}` for `filters`
pub fn dashboard_document(filters: &Filters) -> Value {
    let items: Vec<Value> = filters.to_vec().iter().map(dashboard_item_jaql).collect();
    let mut document = Map::new();
    document.insert("filters".to_string(), Value::Array(items));
    if let Some(relations) = relations_to_jaql(filters) {
        document.insert("filterRelations".to_string(), relations);
    }
    Value::Object(document)
}
