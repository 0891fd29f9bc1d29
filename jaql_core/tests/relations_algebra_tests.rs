//! Tests for the relations algebra over lists and trees

use jaql_core::relations::{add_filter, add_filters, find_filter, remove_filter, remove_filters, replace_filter};
use jaql_core::{Attribute, DataType, Filter, FilterRelations, Filters, RelationOperator};

fn filter(guid: &str, column: &str) -> Filter {
    let attribute = Attribute::new(format!("[Commerce.{}]", column), column, DataType::Text);
    Filter::members(attribute, ["x"]).with_guid(guid)
}

fn dashboard_tree() -> FilterRelations {
    // (Gender OR Age) AND Country
    FilterRelations::and(
        FilterRelations::or(filter("g", "Gender"), filter("a", "Age")),
        filter("c", "Country"),
    )
}

#[test]
fn test_add_then_remove_is_identity_for_tree() {
    let existing = Filters::from(dashboard_tree());
    let added = add_filter(filter("r", "Region"), existing.clone());
    assert_eq!(added.to_string(), "((Gender OR Age) AND Country) AND Region");

    let restored = remove_filter(&filter("r", "Region"), added);
    assert_eq!(restored, existing);
}

#[test]
fn test_add_then_remove_is_identity_for_list() {
    let existing = Filters::from(vec![filter("g", "Gender"), filter("a", "Age")]);
    let restored = remove_filter(&filter("r", "Region"), add_filter(filter("r", "Region"), existing.clone()));
    assert_eq!(restored, existing);
}

#[test]
fn test_remove_both_children_collapses_node() {
    let result = remove_filters(&[filter("g", "Gender"), filter("a", "Age")], dashboard_tree());
    assert_eq!(result, Filters::Relations(FilterRelations::Leaf(filter("c", "Country"))));
}

#[test]
fn test_every_leaf_appears_once_after_edits() {
    let mut filters = Filters::from(dashboard_tree());
    filters = add_filters(vec![filter("r", "Region"), filter("s", "Segment")], filters);
    filters = remove_filter(&filter("a", "Age"), filters);
    filters = add_filter(filter("y", "Year"), filters);

    let guids = filters.guids();
    let mut unique = guids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(guids.len(), unique.len());
    assert_eq!(guids, vec!["g", "c", "r", "s", "y"]);
}

#[test]
fn test_replace_keeps_operator_structure() {
    let replacement = filter("q", "Quarter");
    let result = replace_filter(&filter("a", "Age"), replacement, dashboard_tree());
    assert_eq!(result.to_string(), "(Gender OR Quarter) AND Country");

    let Filters::Relations(FilterRelations::Node { operator, .. }) = result else {
        panic!("Expected relations node");
    };
    assert_eq!(operator, RelationOperator::And);
}

#[test]
fn test_replace_unknown_filter_changes_nothing() {
    let existing = Filters::from(dashboard_tree());
    let result = replace_filter(&filter("zz", "Missing"), filter("q", "Quarter"), existing.clone());
    assert_eq!(result, existing);
}

#[test]
fn test_find_is_depth_first() {
    let filters = Filters::from(dashboard_tree());
    let found = find_filter(&filters, |f| f.guid() != "g");
    assert_eq!(found.map(Filter::guid), Some("a"));
    assert!(find_filter(&Filters::default(), |_| true).is_none());
}
