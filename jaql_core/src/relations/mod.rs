//! Logical combinations of filters
//!
//! Filters are held either as a flat ordered list (implicitly ANDed) or as an
//! AND/OR tree. [`Filters`] covers both, and every operation in [`algebra`]
//! returns the same representation it was given.

pub mod algebra;
mod rules;

use std::fmt;

pub use algebra::{add_filter, add_filters, find_filter, remove_filter, remove_filters, replace_filter};
pub use rules::{
    RelationsRule, calculate_new_relations, combine_filters_and_relations,
    split_filters_and_relations,
};

use crate::Filter;

/// Logical operator joining two relation branches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationOperator {
    And,
    Or,
}

impl RelationOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationOperator::And => "AND",
            RelationOperator::Or => "OR",
        }
    }
}

impl fmt::Display for RelationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable AND/OR tree over filters. A bare leaf is a valid tree.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterRelations {
    Leaf(Filter),
    Node {
        operator: RelationOperator,
        left: Box<FilterRelations>,
        right: Box<FilterRelations>,
    },
}

impl FilterRelations {
    pub fn node(
        operator: RelationOperator,
        left: impl Into<FilterRelations>,
        right: impl Into<FilterRelations>,
    ) -> Self {
        FilterRelations::Node {
            operator,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    pub fn and(left: impl Into<FilterRelations>, right: impl Into<FilterRelations>) -> Self {
        Self::node(RelationOperator::And, left, right)
    }

    pub fn or(left: impl Into<FilterRelations>, right: impl Into<FilterRelations>) -> Self {
        Self::node(RelationOperator::Or, left, right)
    }

    /// Leaves in depth-first, left-to-right order
    pub fn leaves(&self) -> Vec<&Filter> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Filter>) {
        match self {
            FilterRelations::Leaf(filter) => leaves.push(filter),
            FilterRelations::Node { left, right, .. } => {
                left.collect_leaves(leaves);
                right.collect_leaves(leaves);
            }
        }
    }

    /// Consume the tree, returning its leaves in depth-first order
    pub fn into_leaves(self) -> Vec<Filter> {
        match self {
            FilterRelations::Leaf(filter) => vec![filter],
            FilterRelations::Node { left, right, .. } => {
                let mut leaves = left.into_leaves();
                leaves.extend(right.into_leaves());
                leaves
            }
        }
    }

    /// First leaf, depth-first, satisfying the predicate
    pub fn find<P>(&self, predicate: P) -> Option<&Filter>
    where
        P: Fn(&Filter) -> bool,
    {
        self.find_by(&predicate)
    }

    fn find_by<P>(&self, predicate: &P) -> Option<&Filter>
    where
        P: Fn(&Filter) -> bool,
    {
        match self {
            FilterRelations::Leaf(filter) => predicate(filter).then_some(filter),
            FilterRelations::Node { left, right, .. } => left
                .find_by(predicate)
                .or_else(|| right.find_by(predicate)),
        }
    }
}

impl From<Filter> for FilterRelations {
    fn from(filter: Filter) -> Self {
        FilterRelations::Leaf(filter)
    }
}

impl fmt::Display for FilterRelations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRelations::Leaf(filter) => match filter.attribute() {
                Some(attribute) => write!(f, "{}", attribute.display_name()),
                None => write!(f, "{}", filter.attribute_id()),
            },
            FilterRelations::Node {
                operator,
                left,
                right,
            } => {
                write_branch(f, left)?;
                write!(f, " {} ", operator)?;
                write_branch(f, right)
            }
        }
    }
}

fn write_branch(f: &mut fmt::Formatter<'_>, branch: &FilterRelations) -> fmt::Result {
    match branch {
        FilterRelations::Leaf(_) => write!(f, "{}", branch),
        FilterRelations::Node { .. } => write!(f, "({})", branch),
    }
}

/// Filters held either as a flat list or as a relations tree
#[derive(Debug, Clone, PartialEq)]
pub enum Filters {
    List(Vec<Filter>),
    Relations(FilterRelations),
}

impl Filters {
    /// All filters in list order or depth-first tree order
    pub fn to_vec(&self) -> Vec<Filter> {
        match self {
            Filters::List(filters) => filters.clone(),
            Filters::Relations(relations) => relations.leaves().into_iter().cloned().collect(),
        }
    }

    pub fn into_vec(self) -> Vec<Filter> {
        match self {
            Filters::List(filters) => filters,
            Filters::Relations(relations) => relations.into_leaves(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Filters::List(filters) => filters.len(),
            Filters::Relations(relations) => relations.leaves().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_relations(&self) -> bool {
        matches!(self, Filters::Relations(_))
    }

    /// Guids of all filters, in the order of [`Filters::to_vec`]
    pub fn guids(&self) -> Vec<String> {
        self.to_vec()
            .iter()
            .map(|filter| filter.guid().to_string())
            .collect()
    }
}

impl Default for Filters {
    fn default() -> Self {
        Filters::List(Vec::new())
    }
}

impl From<Vec<Filter>> for Filters {
    fn from(filters: Vec<Filter>) -> Self {
        Filters::List(filters)
    }
}

impl From<FilterRelations> for Filters {
    fn from(relations: FilterRelations) -> Self {
        Filters::Relations(relations)
    }
}

/// A bare filter is a single-leaf tree
impl From<Filter> for Filters {
    fn from(filter: Filter) -> Self {
        Filters::Relations(FilterRelations::Leaf(filter))
    }
}

/// Absent filters are an empty list
impl From<Option<Filters>> for Filters {
    fn from(filters: Option<Filters>) -> Self {
        filters.unwrap_or_default()
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filters::Relations(relations) => write!(f, "{}", relations),
            Filters::List(filters) => {
                let names = filters
                    .iter()
                    .map(|filter| match filter.attribute() {
                        Some(attribute) => attribute.display_name().to_string(),
                        None => filter.attribute_id().to_string(),
                    })
                    .collect::<Vec<_>>();
                write!(f, "{}", names.join(" AND "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Attribute, DataType};

    fn filter(guid: &str, title: &str) -> Filter {
        let attribute = Attribute::new(format!("[T.{}]", title), title, DataType::Text);
        Filter::members(attribute, ["x"]).with_guid(guid)
    }

    #[test]
    fn test_leaves_are_depth_first() {
        let tree = FilterRelations::and(
            FilterRelations::or(filter("a", "A"), filter("b", "B")),
            filter("c", "C"),
        );
        let guids: Vec<&str> = tree.leaves().iter().map(|f| f.guid()).collect();
        assert_eq!(guids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_display_groups_nested_nodes() {
        let tree = FilterRelations::and(
            FilterRelations::or(filter("a", "A"), filter("b", "B")),
            filter("c", "C"),
        );
        assert_eq!(tree.to_string(), "(A OR B) AND C");
    }

    #[test]
    fn test_find_in_tree() {
        let tree = FilterRelations::or(filter("a", "A"), FilterRelations::and(filter("b", "B"), filter("c", "C")));
        assert_eq!(tree.find(|f| f.guid() == "c").map(|f| f.guid()), Some("c"));
        assert!(tree.find(|f| f.guid() == "z").is_none());
    }

    #[test]
    fn test_bare_filter_is_single_leaf_tree() {
        let filters = Filters::from(filter("a", "A"));
        assert!(filters.is_relations());
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_absent_filters_are_empty_list() {
        let filters = Filters::from(None::<Filters>);
        assert_eq!(filters, Filters::List(Vec::new()));
        assert!(filters.is_empty());
    }

    #[test]
    fn test_list_display() {
        let filters = Filters::from(vec![filter("a", "A"), filter("b", "B")]);
        assert_eq!(filters.to_string(), "A AND B");
    }
}
