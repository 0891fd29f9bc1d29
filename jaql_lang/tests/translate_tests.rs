//! Tests for JAQL to filter translation, including round-trips through
//! serialization

use assert_matches::assert_matches;
use jaql_core::filter::{
    LogicalOperator, MembersFilter, NumericOperator, RankingDirection, RelativeDirection, TextOperator,
};
use jaql_core::{Attribute, DataType, Filter, FilterConfig, FilterKind, Measure};
use jaql_lang::parser::FilterType;
use jaql_lang::{create_filter_from_jaql, translate_filter_type};
use serde_json::{Value, json};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gender() -> Attribute {
    Attribute::new("[Commerce.Gender]", "Gender", DataType::Text)
}

fn age() -> Attribute {
    Attribute::new("[Commerce.Age]", "Age", DataType::Numeric)
}

fn order_date() -> Attribute {
    Attribute::new("[Commerce.Date]", "Date", DataType::DateTime).with_level("days")
}

fn revenue() -> Measure {
    Measure::new(
        Attribute::new("[Commerce.Revenue]", "Revenue", DataType::Numeric),
        "sum",
    )
}

/// Serialize, translate back, and check the result means the same thing
fn assert_round_trip(original: &Filter) -> Filter {
    let translated = create_filter_from_jaql(&original.jaql(false), original.guid());
    assert_eq!(translated.guid(), original.guid());
    assert_eq!(translated.kind_name(), original.kind_name());
    assert_eq!(translated.filter_jaql(), original.filter_jaql());
    assert_eq!(translated.attribute_id(), original.attribute_id());
    translated
}

#[test]
fn test_round_trip_of_simple_kinds() {
    init_logger();

    let filters = vec![
        Filter::members(gender(), ["Male", "Female"]),
        Filter::members(gender(), Vec::<String>::new()),
        Filter::members(gender(), ["Male"]).with_config(FilterConfig::new().exclude_members(true)),
        Filter::members(gender(), ["a", "c"]).with_config(FilterConfig::new().with_deactivated_members(["b"])),
        Filter::text(gender(), TextOperator::DoesntContain, "ale"),
        Filter::numeric(age(), NumericOperator::Equals, 30.0),
        Filter::numeric(age(), NumericOperator::From, 18.0),
        Filter::numeric(revenue(), NumericOperator::FromNotEqual, 1000.0),
        Filter::between(age(), 18.0, 65.5),
        Filter::date_range(order_date(), Some("2024-01-01T00:00:00".to_string()), None),
        Filter::date_range(
            order_date(),
            Some("2024-01-01".to_string()),
            Some("2024-12-31".to_string()),
        ),
        Filter::relative_date(order_date(), RelativeDirection::Last, 0, 3, None),
        Filter::relative_date(
            order_date(),
            RelativeDirection::Next,
            1,
            2,
            Some("2024-06-01".to_string()),
        ),
        Filter::ranking(gender(), revenue(), RankingDirection::Top, 5),
    ];

    for original in &filters {
        let translated = assert_round_trip(original);
        assert_eq!(translated.kind, original.kind, "kind of {}", original);
        assert_eq!(translated.config.exclude_members, original.config.exclude_members);
        assert_eq!(translated.config.deactivated_members, original.config.deactivated_members);
    }
}

#[test]
fn test_round_trip_of_nested_kinds() {
    let not_between = Filter::exclude(Filter::between(age(), 18.0, 65.0));
    let translated = assert_round_trip(&not_between);
    assert_matches!(translated.kind, FilterKind::Exclude(_));

    let either = Filter::logical(
        age(),
        LogicalOperator::Or,
        vec![
            Filter::numeric(age(), NumericOperator::To, 10.0),
            Filter::numeric(age(), NumericOperator::From, 90.0),
        ],
    );
    let translated = assert_round_trip(&either);
    let predicate = translated.predicate().unwrap();
    assert!(predicate.test(&json!(5)));
    assert!(!predicate.test(&json!(50)));
}

#[test]
fn test_round_trip_of_custom_and_fallback() {
    let custom = Filter::custom("[Commerce.Gender]", json!({"rankingFunction": "x"}));
    assert_round_trip(&custom);

    let formula = json!({"dim": "[T.C]", "datatype": "text", "filter": {"formula": "X"}});
    let fallback = create_filter_from_jaql(&formula, "f");
    let again = assert_round_trip(&fallback);
    assert_eq!(again.jaql(true), formula);
}

#[test]
fn test_formula_filter_re_serializes_unchanged() {
    init_logger();
    let input = json!({"dim": "[T.C]", "datatype": "text", "filter": {"formula": "X"}});
    let filter = create_filter_from_jaql(&input, "guid-1");

    assert_eq!(filter.kind_name(), "custom");
    assert_eq!(filter.attribute_id(), "[T.C]");
    assert_eq!(filter.jaql(true), input);
    assert_eq!(filter.config.original_filter_jaql, Some(input));
}

#[test]
fn test_empty_members_is_include_all() {
    let filter = create_filter_from_jaql(
        &json!({"dim": "[T.C]", "datatype": "text", "filter": {"members": []}}),
        "g",
    );
    assert_matches!(&filter.kind, FilterKind::Members(MembersFilter { members, .. }) if members.is_empty());
    assert!(filter.config.enable_multi_selection);

    let predicate = filter.predicate().unwrap();
    assert!(predicate.test(&json!("x")));
    assert!(predicate.test(&json!(42)));
}

#[test]
fn test_turned_off_members_are_deactivated() {
    let filter = create_filter_from_jaql(
        &json!({
            "dim": "[T.C]",
            "datatype": "text",
            "filter": {"members": ["a", "b", "c"], "exclude": {"members": ["b"], "turnedOff": true}}
        }),
        "g",
    );
    let FilterKind::Members(members) = &filter.kind else {
        panic!("Expected members filter");
    };
    assert_eq!(members.members, vec!["a", "c"]);
    assert_eq!(filter.config.deactivated_members, vec!["b"]);

    let predicate = filter.predicate().unwrap();
    assert!(predicate.test(&json!("a")));
    assert!(!predicate.test(&json!("b")));
}

#[test]
fn test_translation_never_fails() {
    init_logger();
    let payloads: Vec<Value> = vec![
        Value::Null,
        json!(42),
        json!([]),
        json!({}),
        json!({"dim": 7}),
        json!({"dim": "[T.C]", "filter": "members"}),
        json!({"dim": "[T.C]", "filter": {"members": "a"}}),
        json!({"dim": "[T.C]", "datatype": "numeric", "filter": {"from": "x", "to": 5}}),
        json!({"dim": "[T.C]", "filter": {"top": "many"}}),
        json!({"dim": "[T.C]", "filter": {"and": {}}}),
        json!({"dim": "[T.C]", "datatype": "datetime", "filter": {"last": {"offset": 0}}}),
    ];

    for payload in payloads {
        let filter = create_filter_from_jaql(&payload, "g");
        assert_eq!(filter.guid(), "g");
        assert_eq!(filter.kind_name(), "custom", "payload {}", payload);
        assert_eq!(filter.jaql(true), payload);
    }
}

#[test]
fn test_scoped_wrapper_is_unwrapped() {
    let filter = create_filter_from_jaql(
        &json!({"jaql": {"dim": "[T.C]", "datatype": "text", "filter": {"members": ["a"]}}, "panel": "scope"}),
        "g",
    );
    assert_eq!(filter.kind_name(), "members");
    assert_eq!(filter.attribute_id(), "[T.C]");
}

#[test]
fn test_detected_filter_types() {
    let cases = [
        (json!({"dim": "[T.C]", "filter": {"all": true}}), FilterType::IncludeAll),
        (json!({"dim": "[T.C]", "filter": {"members": ["a"]}}), FilterType::SpecificItems),
        (json!({"dim": "[T.C]", "filter": {"startsWith": "a"}}), FilterType::Condition),
        (
            json!({"dim": "[T.N]", "datatype": "numeric", "filter": {"from": 1, "to": 2}}),
            FilterType::NumericRange,
        ),
        (
            json!({"dim": "[T.D]", "datatype": "datetime", "filter": {"to": "2024-01-01"}}),
            FilterType::DateRange,
        ),
        (
            json!({"dim": "[T.D]", "datatype": "datetime", "filter": {"next": {"count": 1}}}),
            FilterType::Period,
        ),
        (json!({"dim": "[T.C]", "filter": {"something": 1}}), FilterType::Advanced),
        (json!({"dim": "[T.C]"}), FilterType::Invalid),
    ];

    for (payload, expected) in cases {
        assert_eq!(translate_filter_type(&payload).unwrap(), expected, "payload {}", payload);
    }
}

#[test]
fn test_exclusion_without_turned_off_survives_round_trip() {
    let input = json!({
        "dim": "[T.C]",
        "datatype": "text",
        "title": "C",
        "filter": {"members": ["a", "b", "c"], "exclude": {"members": ["b"]}}
    });
    let filter = create_filter_from_jaql(&input, "g");
    assert_matches!(&filter.kind, FilterKind::Members(MembersFilter { members, .. }) if members.len() == 3);
    assert_eq!(filter.jaql(true)["filter"], input["filter"]);

    let reread = create_filter_from_jaql(&filter.jaql(true), "g");
    let predicate = reread.predicate().unwrap();
    assert!(predicate.test(&json!("a")));
    assert!(!predicate.test(&json!("b")));
}
