//! Guid-level relation rules
//!
//! A relations tree is edited by splitting it into its flat filter list and a
//! rule tree that references filters by guid, rewriting the rule, then
//! combining both back into a tree.

use std::collections::{HashMap, HashSet};

use log::trace;

use super::{FilterRelations, Filters, RelationOperator};
use crate::Filter;

/// Shape of a relations tree with leaves referencing filter guids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationsRule {
    Filter(String),
    Node {
        operator: RelationOperator,
        left: Box<RelationsRule>,
        right: Box<RelationsRule>,
    },
}

impl RelationsRule {
    pub fn node(operator: RelationOperator, left: RelationsRule, right: RelationsRule) -> Self {
        RelationsRule::Node {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Drop every leaf whose guid is in `removed`. A dropped leaf is replaced
    /// by its sibling; a node losing both children is dropped as well.
    pub fn prune(&self, removed: &HashSet<&str>) -> Option<RelationsRule> {
        match self {
            RelationsRule::Filter(guid) => {
                (!removed.contains(guid.as_str())).then(|| self.clone())
            }
            RelationsRule::Node {
                operator,
                left,
                right,
            } => match (left.prune(removed), right.prune(removed)) {
                (Some(left), Some(right)) => Some(RelationsRule::node(*operator, left, right)),
                (Some(remaining), None) | (None, Some(remaining)) => Some(remaining),
                (None, None) => None,
            },
        }
    }

    /// Point the leaf referencing `old_guid` at `new_guid`, keeping its position
    pub fn replace_guid(&self, old_guid: &str, new_guid: &str) -> RelationsRule {
        match self {
            RelationsRule::Filter(guid) if guid == old_guid => {
                RelationsRule::Filter(new_guid.to_string())
            }
            RelationsRule::Filter(_) => self.clone(),
            RelationsRule::Node {
                operator,
                left,
                right,
            } => RelationsRule::node(
                *operator,
                left.replace_guid(old_guid, new_guid),
                right.replace_guid(old_guid, new_guid),
            ),
        }
    }
}

/// Split a tree into its leaves (depth-first) and its guid rule
pub fn split_filters_and_relations(relations: FilterRelations) -> (Vec<Filter>, RelationsRule) {
    match relations {
        FilterRelations::Leaf(filter) => {
            let rule = RelationsRule::Filter(filter.guid().to_string());
            (vec![filter], rule)
        }
        FilterRelations::Node {
            operator,
            left,
            right,
        } => {
            let (mut filters, left_rule) = split_filters_and_relations(*left);
            let (right_filters, right_rule) = split_filters_and_relations(*right);
            filters.extend(right_filters);
            (filters, RelationsRule::node(operator, left_rule, right_rule))
        }
    }
}

/// Rebuild a tree from filters and a rule. Without a rule the filters stay a
/// flat list.
///
/// Every guid in the rule must belong to one of the filters.
pub fn combine_filters_and_relations(filters: Vec<Filter>, rule: Option<RelationsRule>) -> Filters {
    let Some(rule) = rule else {
        return Filters::List(filters);
    };

    let mut by_guid: HashMap<String, Filter> = filters
        .into_iter()
        .map(|filter| (filter.guid().to_string(), filter))
        .collect();

    match build_tree(&rule, &mut by_guid) {
        Some(relations) => Filters::Relations(relations),
        None => Filters::List(Vec::new()),
    }
}

fn build_tree(rule: &RelationsRule, by_guid: &mut HashMap<String, Filter>) -> Option<FilterRelations> {
    match rule {
        RelationsRule::Filter(guid) => {
            let filter = by_guid.remove(guid);
            debug_assert!(filter.is_some(), "relations reference unknown filter '{}'", guid);
            filter.map(FilterRelations::Leaf)
        }
        RelationsRule::Node {
            operator,
            left,
            right,
        } => match (build_tree(left, by_guid), build_tree(right, by_guid)) {
            (Some(left), Some(right)) => Some(FilterRelations::node(*operator, left, right)),
            (Some(remaining), None) | (None, Some(remaining)) => Some(remaining),
            (None, None) => None,
        },
    }
}

/// Recompute a rule after the flat filter list changed from `previous` to
/// `next`.
///
/// Removed filters are pruned from the existing rule. Added filters are
/// ANDed onto the root in append order.
pub fn calculate_new_relations(
    previous: &[Filter],
    rule: Option<&RelationsRule>,
    next: &[Filter],
) -> Option<RelationsRule> {
    let previous_guids: HashSet<&str> = previous.iter().map(Filter::guid).collect();
    let next_guids: HashSet<&str> = next.iter().map(Filter::guid).collect();
    let removed: HashSet<&str> = previous_guids.difference(&next_guids).copied().collect();

    let mut result = rule.and_then(|rule| rule.prune(&removed));

    for filter in next.iter().filter(|f| !previous_guids.contains(f.guid())) {
        let leaf = RelationsRule::Filter(filter.guid().to_string());
        result = Some(match result {
            Some(current) => RelationsRule::node(RelationOperator::And, current, leaf),
            None => leaf,
        });
    }

    trace!(
        "Recalculated relations: {} removed, {} filters remain",
        removed.len(),
        next.len()
    );
    result
}
