//! Tests for reading and writing dashboard filter documents

use jaql_core::relations::{add_filter, remove_filter, replace_filter};
use jaql_core::{Filters, FilterRelations};
use jaql_lang::{create_filter_from_jaql, dashboard_document, parse_dashboard_filters, relations_to_jaql};
use serde_json::{Value, json};

fn document() -> Value {
    json!({
        "filters": [
            {"instanceid": "g", "jaql": {"dim": "[Commerce.Gender]", "datatype": "text", "title": "Gender", "filter": {"members": ["Male"]}}},
            {"instanceid": "a", "jaql": {"dim": "[Commerce.Age]", "datatype": "numeric", "title": "Age", "filter": {"from": 18, "to": 30}}},
            {"instanceid": "c", "locked": true, "jaql": {"dim": "[Geo.Country]", "datatype": "text", "title": "Country", "filter": {"formula": "X"}}}
        ],
        "filterRelations": {
            "operator": "AND",
            "left": {"operator": "OR", "left": {"instanceid": "g"}, "right": {"instanceid": "a"}},
            "right": {"instanceid": "c"}
        }
    })
}

#[test]
fn test_document_round_trip() {
    let filters = parse_dashboard_filters(&document()).unwrap();
    assert_eq!(filters.to_string(), "(Gender OR Age) AND [Geo.Country]");

    let written = dashboard_document(&filters);
    assert_eq!(written["filterRelations"], document()["filterRelations"]);
    assert_eq!(written["filters"][2]["locked"], true);
    assert_eq!(written["filters"][2]["jaql"], document()["filters"][2]["jaql"]);

    let reread = parse_dashboard_filters(&written).unwrap();
    assert_eq!(reread.guids(), filters.guids());
    assert_eq!(reread.to_string(), filters.to_string());
}

#[test]
fn test_edits_are_reflected_in_relations() {
    let filters = parse_dashboard_filters(&document()).unwrap();
    let gender = filters.to_vec().remove(0);

    let removed = remove_filter(&gender, filters.clone());
    assert_eq!(
        relations_to_jaql(&removed).unwrap(),
        json!({"operator": "AND", "left": {"instanceid": "a"}, "right": {"instanceid": "c"}})
    );

    let region = create_filter_from_jaql(
        &json!({"dim": "[Geo.Region]", "datatype": "text", "filter": {"members": ["EU"]}}),
        "r",
    );
    let added = add_filter(region.clone(), removed);
    assert_eq!(added.to_string(), "(Age AND [Geo.Country]) AND [Geo.Region]");

    let replaced = replace_filter(&region, region.clone().with_guid("r2"), added);
    let relations = relations_to_jaql(&replaced).unwrap();
    assert_eq!(relations["right"], json!({"instanceid": "r2"}));
}

#[test]
fn test_removing_all_but_one_leaves_single_leaf() {
    let filters = parse_dashboard_filters(&document()).unwrap();
    let all = filters.to_vec();
    let remaining = remove_filter(&all[0], remove_filter(&all[1], filters));
    assert_eq!(remaining, Filters::Relations(FilterRelations::Leaf(all[2].clone())));
    assert_eq!(relations_to_jaql(&remaining).unwrap(), json!({"instanceid": "c"}));
}

#[test]
fn test_document_keeps_item_fields_outside_the_filter_model() {
    let document = json!({
        "filters": [
            {"instanceid": "a", "jaql": {
                "dim": "[T.A]",
                "datatype": "text",
                "title": "A",
                "table": "T",
                "column": "A",
                "datasource": {"title": "Sample"},
                "collapsed": true,
                "merged": false,
                "filter": {"members": ["x"]}
            }}
        ],
        "filterRelations": null
    });

    let filters = parse_dashboard_filters(&document).unwrap();
    let written = dashboard_document(&filters);
    let jaql = &written["filters"][0]["jaql"];
    assert_eq!(jaql["datasource"], json!({"title": "Sample"}));
    assert_eq!(jaql["collapsed"], true);
    assert_eq!(jaql["merged"], false);
    assert_eq!(jaql["table"], "T");
    assert_eq!(jaql["column"], "A");
    assert_eq!(jaql["filter"], json!({"members": ["x"]}));
    assert_eq!(jaql["multiSelection"], true);
}
