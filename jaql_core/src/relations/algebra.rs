//! Add, remove, replace and find over filter collections
//!
//! Every operation takes `existing` as anything convertible into [`Filters`]
//! (a list, a tree, a bare filter, or nothing) and returns a new value of the
//! same representation. Filters are matched by guid only.

use log::trace;

use super::rules::{calculate_new_relations, combine_filters_and_relations, split_filters_and_relations};
use super::Filters;
use crate::Filter;

/// Append a filter. In a tree the new filter is ANDed onto the root.
pub fn add_filter(filter: Filter, existing: impl Into<Filters>) -> Filters {
    add_filters(vec![filter], existing)
}

/// Append filters in order. In a tree each one is ANDed onto the root.
pub fn add_filters(filters: impl IntoIterator<Item = Filter>, existing: impl Into<Filters>) -> Filters {
    let added: Vec<Filter> = filters.into_iter().collect();

    match existing.into() {
        Filters::List(mut list) => {
            list.extend(added);
            Filters::List(list)
        }
        Filters::Relations(relations) => {
            let (previous, rule) = split_filters_and_relations(relations);
            let mut next = previous.clone();
            next.extend(added);
            rebuild(&previous, rule, next)
        }
    }
}

/// Remove the filter with the same guid as `filter`
pub fn remove_filter(filter: &Filter, existing: impl Into<Filters>) -> Filters {
    remove_filters(std::slice::from_ref(filter), existing)
}

/// Remove every filter whose guid matches one of `filters`. Removed tree
/// leaves are replaced by their siblings.
pub fn remove_filters(filters: &[Filter], existing: impl Into<Filters>) -> Filters {
    let is_removed = |candidate: &Filter| filters.iter().any(|f| f.guid() == candidate.guid());

    match existing.into() {
        Filters::List(list) => Filters::List(list.into_iter().filter(|f| !is_removed(f)).collect()),
        Filters::Relations(relations) => {
            let (previous, rule) = split_filters_and_relations(relations);
            let next: Vec<Filter> = previous.iter().filter(|f| !is_removed(f)).cloned().collect();
            rebuild(&previous, rule, next)
        }
    }
}

/// Swap the filter with `old`'s guid for `new`, keeping its position in the
/// list or tree. Nothing changes when `old` is not present.
pub fn replace_filter(old: &Filter, new: Filter, existing: impl Into<Filters>) -> Filters {
    match existing.into() {
        Filters::List(list) => Filters::List(
            list.into_iter()
                .map(|f| if f.guid() == old.guid() { new.clone() } else { f })
                .collect(),
        ),
        Filters::Relations(relations) => {
            let (previous, rule) = split_filters_and_relations(relations);
            let next = previous
                .into_iter()
                .map(|f| if f.guid() == old.guid() { new.clone() } else { f })
                .collect();
            let rule = rule.replace_guid(old.guid(), new.guid());
            trace!("Replacing filter '{}' with '{}'", old.guid(), new.guid());
            combine_filters_and_relations(next, Some(rule))
        }
    }
}

/// First filter, in list order or depth-first tree order, satisfying the
/// predicate
pub fn find_filter<P>(existing: &Filters, predicate: P) -> Option<&Filter>
where
    P: Fn(&Filter) -> bool,
{
    match existing {
        Filters::List(list) => list.iter().find(|f| predicate(f)),
        Filters::Relations(relations) => relations.find(predicate),
    }
}

fn rebuild(previous: &[Filter], rule: super::RelationsRule, next: Vec<Filter>) -> Filters {
    let rule = calculate_new_relations(previous, Some(&rule), &next);
    trace!("Rebuilding relations tree over {} filters", next.len());
    combine_filters_and_relations(next, rule)
}
