//! Typed filter model

mod config;
mod jaql;
mod types;

use std::fmt;

pub use config::FilterConfig;
pub use types::*;

use crate::predicate::{ConditionError, Predicate, compile_predicate};
use crate::{Attribute, DataType, FilterTarget, Measure};

/// One query filter: a kind-specific payload plus its config
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub config: FilterConfig,
    pub kind: FilterKind,
}

/// All supported filter kinds
#[derive(Debug, Clone, PartialEq)]
pub enum FilterKind {
    Members(MembersFilter),
    Text(TextFilter),
    Numeric(NumericFilter),
    DateRange(DateRangeFilter),
    RelativeDate(RelativeDateFilter),
    Ranking(RankingFilter),
    Exclude(ExcludeFilter),
    Logical(LogicalFilter),
    Custom(CustomFilter),
}

impl Filter {
    pub fn new(kind: FilterKind, config: FilterConfig) -> Self {
        Self { config, kind }
    }

    /// Members filter. An empty member list includes everything.
    pub fn members<I, S>(attribute: Attribute, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members = members.into_iter().map(Into::into).collect();
        Self::new(
            FilterKind::Members(MembersFilter {
                attribute,
                members,
            }),
            FilterConfig::new(),
        )
    }

    pub fn text(attribute: Attribute, operator: TextOperator, value: impl Into<String>) -> Self {
        Self::new(
            FilterKind::Text(TextFilter {
                attribute,
                operator,
                value: value.into(),
            }),
            FilterConfig::new(),
        )
    }

    /// Single numeric comparison
    pub fn numeric(target: impl Into<FilterTarget>, operator: NumericOperator, value: f64) -> Self {
        Self::new(
            FilterKind::Numeric(NumericFilter {
                target: target.into(),
                first: NumericBound::new(operator, value),
                second: None,
            }),
            FilterConfig::new(),
        )
    }

    /// Closed numeric range, both bounds inclusive
    pub fn between(target: impl Into<FilterTarget>, from: f64, to: f64) -> Self {
        Self::new(
            FilterKind::Numeric(NumericFilter {
                target: target.into(),
                first: NumericBound::new(NumericOperator::From, from),
                second: Some(NumericBound::new(NumericOperator::To, to)),
            }),
            FilterConfig::new(),
        )
    }

    pub fn date_range(attribute: Attribute, from: Option<String>, to: Option<String>) -> Self {
        Self::new(
            FilterKind::DateRange(DateRangeFilter {
                attribute,
                from,
                to,
            }),
            FilterConfig::new(),
        )
    }

    pub fn relative_date(
        attribute: Attribute,
        direction: RelativeDirection,
        offset: i64,
        count: i64,
        anchor: Option<String>,
    ) -> Self {
        Self::new(
            FilterKind::RelativeDate(RelativeDateFilter {
                attribute,
                direction,
                offset,
                count,
                anchor,
            }),
            FilterConfig::new(),
        )
    }

    pub fn ranking(
        attribute: Attribute,
        measure: Measure,
        direction: RankingDirection,
        count: i64,
    ) -> Self {
        Self::new(
            FilterKind::Ranking(RankingFilter {
                attribute,
                measure,
                direction,
                count,
            }),
            FilterConfig::new(),
        )
    }

    pub fn exclude(inner: Filter) -> Self {
        Self::new(
            FilterKind::Exclude(ExcludeFilter {
                inner: Box::new(inner),
            }),
            FilterConfig::new(),
        )
    }

    pub fn logical(
        target: impl Into<FilterTarget>,
        operator: LogicalOperator,
        filters: Vec<Filter>,
    ) -> Self {
        Self::new(
            FilterKind::Logical(LogicalFilter {
                target: target.into(),
                operator,
                filters,
            }),
            FilterConfig::new(),
        )
    }

    pub fn custom(attribute_id: impl Into<String>, condition: serde_json::Value) -> Self {
        Self::new(
            FilterKind::Custom(CustomFilter {
                attribute_id: attribute_id.into(),
                condition,
            }),
            FilterConfig::new(),
        )
    }

    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.config.guid = guid.into();
        self
    }

    pub fn guid(&self) -> &str {
        &self.config.guid
    }

    /// The attribute this filter targets, if it is resolved
    pub fn attribute(&self) -> Option<&Attribute> {
        match &self.kind {
            FilterKind::Members(f) => Some(&f.attribute),
            FilterKind::Text(f) => Some(&f.attribute),
            FilterKind::Numeric(f) => Some(f.target.attribute()),
            FilterKind::DateRange(f) => Some(&f.attribute),
            FilterKind::RelativeDate(f) => Some(&f.attribute),
            FilterKind::Ranking(f) => Some(&f.attribute),
            FilterKind::Exclude(f) => f.inner.attribute(),
            FilterKind::Logical(f) => Some(f.target.attribute()),
            FilterKind::Custom(_) => None,
        }
    }

    /// Identifier of the filtered column
    pub fn attribute_id(&self) -> &str {
        match &self.kind {
            FilterKind::Custom(f) => &f.attribute_id,
            FilterKind::Exclude(f) => f.inner.attribute_id(),
            _ => self
                .attribute()
                .map(|attribute| attribute.expression.as_str())
                .unwrap_or_default(),
        }
    }

    /// Short name of the filter kind
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            FilterKind::Members(_) => "members",
            FilterKind::Text(_) => "text",
            FilterKind::Numeric(_) => "numeric",
            FilterKind::DateRange(_) => "dateRange",
            FilterKind::RelativeDate(_) => "relativeDate",
            FilterKind::Ranking(_) => "ranking",
            FilterKind::Exclude(_) => "exclude",
            FilterKind::Logical(_) => "logical",
            FilterKind::Custom(_) => "custom",
        }
    }

    /// Data type of the values this filter's condition is tested against
    pub fn datatype(&self) -> DataType {
        match &self.kind {
            FilterKind::Numeric(NumericFilter {
                target: FilterTarget::Measure(_),
                ..
            })
            | FilterKind::Logical(LogicalFilter {
                target: FilterTarget::Measure(_),
                ..
            }) => DataType::Numeric,
            FilterKind::Exclude(f) => f.inner.datatype(),
            FilterKind::Custom(_) => self
                .config
                .original_filter_jaql
                .as_ref()
                .and_then(|jaql| jaql.get("datatype"))
                .and_then(|datatype| datatype.as_str())
                .and_then(DataType::parse)
                .unwrap_or_default(),
            _ => self
                .attribute()
                .map(|attribute| attribute.datatype)
                .unwrap_or_default(),
        }
    }

    /// True when the filter does not restrict anything
    pub fn is_include_all(&self) -> bool {
        match &self.kind {
            FilterKind::Members(f) => {
                f.members.is_empty()
                    && !self.config.exclude_members
                    && self.config.deactivated_members.is_empty()
            }
            _ => false,
        }
    }

    /// Compile this filter's condition into a local predicate
    pub fn predicate(&self) -> Result<Predicate, ConditionError> {
        compile_predicate(&self.filter_jaql(), self.datatype())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FilterKind::Members(members) => {
                if self.is_include_all() {
                    write!(f, "{} all", members.attribute)
                } else if self.config.exclude_members {
                    write!(f, "{} excludes [{}]", members.attribute, members.members.join(", "))
                } else {
                    write!(f, "{} in [{}]", members.attribute, members.members.join(", "))
                }
            }
            FilterKind::Text(text) => {
                write!(f, "{} {} \"{}\"", text.attribute, text.operator.key(), text.value)
            }
            FilterKind::Numeric(numeric) => {
                write_target(f, &numeric.target)?;
                let conditions = numeric
                    .bounds()
                    .map(|bound| format!("{} {}", bound.operator.symbol(), bound.value))
                    .collect::<Vec<_>>()
                    .join(" and ");
                write!(f, " {}", conditions)
            }
            FilterKind::DateRange(range) => {
                write!(f, "{}", range.attribute)?;
                if let Some(from) = &range.from {
                    write!(f, " from {}", from)?;
                }
                if let Some(to) = &range.to {
                    write!(f, " to {}", to)?;
                }
                Ok(())
            }
            FilterKind::RelativeDate(relative) => {
                write!(
                    f,
                    "{} {} {} offset {}",
                    relative.attribute,
                    relative.direction.key(),
                    relative.count,
                    relative.offset
                )?;
                if let Some(anchor) = &relative.anchor {
                    write!(f, " from {}", anchor)?;
                }
                Ok(())
            }
            FilterKind::Ranking(ranking) => write!(
                f,
                "{} {} {} by {}({})",
                ranking.attribute,
                ranking.direction.key(),
                ranking.count,
                ranking.measure.aggregation,
                ranking.measure.attribute
            ),
            FilterKind::Exclude(exclude) => write!(f, "not ({})", exclude.inner),
            FilterKind::Logical(logical) => {
                let separator = format!(" {} ", logical.operator.key());
                let parts = logical
                    .filters
                    .iter()
                    .map(|filter| format!("({})", filter))
                    .collect::<Vec<_>>()
                    .join(&separator);
                write!(f, "{}", parts)
            }
            FilterKind::Custom(custom) => {
                write!(f, "{} custom {}", custom.attribute_id, custom.condition)
            }
        }
    }
}

fn write_target(f: &mut fmt::Formatter<'_>, target: &FilterTarget) -> fmt::Result {
    match target {
        FilterTarget::Attribute(attribute) => write!(f, "{}", attribute),
        FilterTarget::Measure(measure) => {
            write!(f, "{}({})", measure.aggregation, measure.attribute)
        }
    }
}
