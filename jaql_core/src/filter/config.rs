use serde_json::Value;
use uuid::Uuid;

use super::Filter;

/// Per-filter metadata.
///
/// The `guid` is the identity of a filter for every relations operation.
/// Two filters with equal content but different guids are distinct filters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    pub guid: String,
    pub disabled: bool,
    pub locked: bool,
    /// Applied together with the filter regardless of `disabled`
    pub background_filter: Option<Box<Filter>>,
    /// Members filters only: the member list is an exclusion list
    pub exclude_members: bool,
    /// Members filters only
    pub enable_multi_selection: bool,
    /// Members filters only: visible but inactive members, in insertion order
    pub deactivated_members: Vec<String>,
    /// Untouched payload this filter was translated from
    pub original_filter_jaql: Option<Value>,
}

impl FilterConfig {
    /// Create a config with a freshly generated guid
    pub fn new() -> Self {
        Self::with_guid(Uuid::new_v4().to_string())
    }

    pub fn with_guid(guid: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            disabled: false,
            locked: false,
            background_filter: None,
            exclude_members: false,
            enable_multi_selection: true,
            deactivated_members: Vec::new(),
            original_filter_jaql: None,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_background_filter(mut self, filter: Filter) -> Self {
        self.background_filter = Some(Box::new(filter));
        self
    }

    pub fn exclude_members(mut self, exclude: bool) -> Self {
        self.exclude_members = exclude;
        self
    }

    pub fn multi_selection(mut self, enabled: bool) -> Self {
        self.enable_multi_selection = enabled;
        self
    }

    /// Set deactivated members. Duplicates are dropped, first occurrence wins.
    pub fn with_deactivated_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deactivated_members.clear();
        for member in members {
            let member = member.into();
            if !self.deactivated_members.contains(&member) {
                self.deactivated_members.push(member);
            }
        }
        self
    }

    pub fn with_original_jaql(mut self, jaql: Value) -> Self {
        self.original_filter_jaql = Some(jaql);
        self
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}
