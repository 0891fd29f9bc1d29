//! Reading filter relations and dashboard filter documents

use std::collections::HashSet;

use jaql_core::relations::{calculate_new_relations, combine_filters_and_relations};
use jaql_core::{Filter, Filters, RelationOperator, RelationsRule};
use log::trace;
use serde_json::Value;

use super::RelationsJaqlError;
use super::to_filter::create_filter_from_dashboard_item;

/// Build `Filters` from a relations node and the filters it references.
///
/// A null or absent node yields a flat list. Filters the relations do not
/// mention are ANDed onto the root in list order.
pub fn relations_from_jaql(relations: Option<&Value>, filters: Vec<Filter>) -> Result<Filters, RelationsJaqlError> {
    let Some(node) = relations.filter(|node| !node.is_null()) else {
        return Ok(Filters::List(filters));
    };

    let known: HashSet<&str> = filters.iter().map(Filter::guid).collect();
    let mut seen = HashSet::new();
    let rule = parse_node(node, &known, &mut seen)?;

    let referenced: Vec<Filter> = filters
        .iter()
        .filter(|filter| seen.contains(filter.guid()))
        .cloned()
        .collect();
    let rule = calculate_new_relations(&referenced, Some(&rule), &filters);
    trace!(
        "Read relations over {} of {} filters",
        referenced.len(),
        filters.len()
    );

    Ok(combine_filters_and_relations(filters, rule))
}

/// Read a dashboard document `{filters: [...], filterRelations?: {...}}`
pub fn parse_dashboard_filters(document: &Value) -> Result<Filters, RelationsJaqlError> {
    let items = match document.get("filters") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(RelationsJaqlError::InvalidDocument(
                "'filters' must be an array".to_string(),
            ));
        }
    };

    let filters = items.iter().map(create_filter_from_dashboard_item).collect();
    relations_from_jaql(document.get("filterRelations"), filters)
}

fn parse_node(
    node: &Value,
    known: &HashSet<&str>,
    seen: &mut HashSet<String>,
) -> Result<RelationsRule, RelationsJaqlError> {
    if let Some(instance) = node.get("instanceid") {
        let guid = instance
            .as_str()
            .ok_or_else(|| RelationsJaqlError::InvalidNode(node.to_string()))?;
        if !known.contains(guid) {
            return Err(RelationsJaqlError::UnknownInstance(guid.to_string()));
        }
        if !seen.insert(guid.to_string()) {
            return Err(RelationsJaqlError::InvalidNode(format!(
                "filter '{}' appears more than once",
                guid
            )));
        }
        return Ok(RelationsRule::Filter(guid.to_string()));
    }

    let (Some(operator), Some(left), Some(right)) =
        (node.get("operator"), node.get("left"), node.get("right"))
    else {
        return Err(RelationsJaqlError::InvalidNode(node.to_string()));
    };

    let operator = match operator.as_str().map(str::to_ascii_uppercase).as_deref() {
        Some("AND") => RelationOperator::And,
        Some("OR") => RelationOperator::Or,
        _ => return Err(RelationsJaqlError::UnknownOperator(operator.to_string())),
    };

    Ok(RelationsRule::node(
        operator,
        parse_node(left, known, seen)?,
        parse_node(right, known, seen)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use jaql_core::FilterRelations;
    use serde_json::json;

    fn item(guid: &str, dim: &str) -> Value {
        json!({"instanceid": guid, "jaql": {"dim": dim, "datatype": "text", "filter": {"members": ["x"]}}})
    }

    #[test]
    fn test_document_without_relations_is_list() {
        let filters = parse_dashboard_filters(&json!({"filters": [item("a", "[T.A]"), item("b", "[T.B]")]})).unwrap();
        assert!(!filters.is_relations());
        assert_eq!(filters.guids(), vec!["a", "b"]);
    }

    #[test]
    fn test_document_with_relations() {
        let document = json!({
            "filters": [item("a", "[T.A]"), item("b", "[T.B]"), item("c", "[T.C]")],
            "filterRelations": {
                "operator": "AND",
                "left": {"operator": "OR", "left": {"instanceid": "a"}, "right": {"instanceid": "b"}},
                "right": {"instanceid": "c"}
            }
        });
        let filters = parse_dashboard_filters(&document).unwrap();
        assert_eq!(filters.to_string(), "([T.A] OR [T.B]) AND [T.C]");
    }

    #[test]
    fn test_unreferenced_filters_are_anded() {
        let document = json!({
            "filters": [item("a", "[T.A]"), item("b", "[T.B]"), item("c", "[T.C]")],
            "filterRelations": {"operator": "OR", "left": {"instanceid": "a"}, "right": {"instanceid": "b"}}
        });
        let filters = parse_dashboard_filters(&document).unwrap();
        assert_matches!(filters, Filters::Relations(FilterRelations::Node { operator: RelationOperator::And, .. }));
        assert_eq!(filters.guids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_instance() {
        let document = json!({
            "filters": [item("a", "[T.A]")],
            "filterRelations": {"operator": "AND", "left": {"instanceid": "a"}, "right": {"instanceid": "zz"}}
        });
        assert_matches!(
            parse_dashboard_filters(&document),
            Err(RelationsJaqlError::UnknownInstance(guid)) if guid == "zz"
        );
    }

    #[test]
    fn test_unknown_operator() {
        let document = json!({
            "filters": [item("a", "[T.A]"), item("b", "[T.B]")],
            "filterRelations": {"operator": "XOR", "left": {"instanceid": "a"}, "right": {"instanceid": "b"}}
        });
        assert_matches!(parse_dashboard_filters(&document), Err(RelationsJaqlError::UnknownOperator(_)));
    }

    #[test]
    fn test_repeated_instance_is_invalid() {
        let document = json!({
            "filters": [item("a", "[T.A]")],
            "filterRelations": {"operator": "AND", "left": {"instanceid": "a"}, "right": {"instanceid": "a"}}
        });
        assert_matches!(parse_dashboard_filters(&document), Err(RelationsJaqlError::InvalidNode(_)));
    }

    #[test]
    fn test_filters_must_be_an_array() {
        assert_matches!(
            parse_dashboard_filters(&json!({"filters": {}})),
            Err(RelationsJaqlError::InvalidDocument(_))
        );
    }
}
