//! Filter kind definitions

use serde_json::Value;

use super::Filter;
use crate::{Attribute, FilterTarget, Measure};

/// String comparison operators of text condition filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOperator {
    StartsWith,
    EndsWith,
    Contains,
    Equals,
    DoesntStartWith,
    DoesntEndWith,
    DoesntContain,
    DoesntEqual,
}

impl TextOperator {
    pub const ALL: [TextOperator; 8] = [
        TextOperator::StartsWith,
        TextOperator::EndsWith,
        TextOperator::Contains,
        TextOperator::Equals,
        TextOperator::DoesntStartWith,
        TextOperator::DoesntEndWith,
        TextOperator::DoesntContain,
        TextOperator::DoesntEqual,
    ];

    /// The JAQL key for this operator
    pub fn key(&self) -> &'static str {
        match self {
            TextOperator::StartsWith => "startsWith",
            TextOperator::EndsWith => "endsWith",
            TextOperator::Contains => "contains",
            TextOperator::Equals => "equals",
            TextOperator::DoesntStartWith => "doesntStartWith",
            TextOperator::DoesntEndWith => "doesntEndWith",
            TextOperator::DoesntContain => "doesntContain",
            TextOperator::DoesntEqual => "doesntEqual",
        }
    }

    pub fn from_key(key: &str) -> Option<TextOperator> {
        TextOperator::ALL.into_iter().find(|op| op.key() == key)
    }

    /// The positive form of a negated operator
    pub fn positive(&self) -> TextOperator {
        match self {
            TextOperator::DoesntStartWith => TextOperator::StartsWith,
            TextOperator::DoesntEndWith => TextOperator::EndsWith,
            TextOperator::DoesntContain => TextOperator::Contains,
            TextOperator::DoesntEqual => TextOperator::Equals,
            positive => *positive,
        }
    }

    pub fn is_negated(&self) -> bool {
        self.positive() != *self
    }
}

/// Numeric comparison operators of numeric condition filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericOperator {
    Equals,
    DoesntEqual,
    /// Inclusive lower bound
    From,
    /// Inclusive upper bound
    To,
    /// Exclusive lower bound
    FromNotEqual,
    /// Exclusive upper bound
    ToNotEqual,
}

impl NumericOperator {
    pub const ALL: [NumericOperator; 6] = [
        NumericOperator::Equals,
        NumericOperator::DoesntEqual,
        NumericOperator::From,
        NumericOperator::To,
        NumericOperator::FromNotEqual,
        NumericOperator::ToNotEqual,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            NumericOperator::Equals => "equals",
            NumericOperator::DoesntEqual => "doesntEqual",
            NumericOperator::From => "from",
            NumericOperator::To => "to",
            NumericOperator::FromNotEqual => "fromNotEqual",
            NumericOperator::ToNotEqual => "toNotEqual",
        }
    }

    pub fn from_key(key: &str) -> Option<NumericOperator> {
        NumericOperator::ALL.into_iter().find(|op| op.key() == key)
    }

    /// Symbol used when displaying a condition
    pub fn symbol(&self) -> &'static str {
        match self {
            NumericOperator::Equals => "==",
            NumericOperator::DoesntEqual => "!=",
            NumericOperator::From => ">=",
            NumericOperator::To => "<=",
            NumericOperator::FromNotEqual => ">",
            NumericOperator::ToNotEqual => "<",
        }
    }
}

/// A single numeric comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBound {
    pub operator: NumericOperator,
    pub value: f64,
}

impl NumericBound {
    pub fn new(operator: NumericOperator, value: f64) -> Self {
        Self { operator, value }
    }
}

/// Inclusion list over an attribute. An empty list means no restriction.
#[derive(Debug, Clone, PartialEq)]
pub struct MembersFilter {
    pub attribute: Attribute,
    pub members: Vec<String>,
}

/// Text condition over an attribute
#[derive(Debug, Clone, PartialEq)]
pub struct TextFilter {
    pub attribute: Attribute,
    pub operator: TextOperator,
    pub value: String,
}

/// Numeric condition or range over an attribute or measure
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFilter {
    pub target: FilterTarget,
    pub first: NumericBound,
    pub second: Option<NumericBound>,
}

impl NumericFilter {
    /// True for a closed `from`/`to` range
    pub fn is_between(&self) -> bool {
        matches!(
            (self.first.operator, self.second.map(|b| b.operator)),
            (NumericOperator::From, Some(NumericOperator::To))
        )
    }

    pub fn bounds(&self) -> impl Iterator<Item = &NumericBound> {
        std::iter::once(&self.first).chain(self.second.as_ref())
    }
}

/// Fixed date range. Either bound may be open.
#[derive(Debug, Clone, PartialEq)]
pub struct DateRangeFilter {
    pub attribute: Attribute,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Direction of a relative date filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDirection {
    /// Looking backward from the anchor
    Last,
    /// Looking forward from the anchor
    Next,
}

impl RelativeDirection {
    pub fn key(&self) -> &'static str {
        match self {
            RelativeDirection::Last => "last",
            RelativeDirection::Next => "next",
        }
    }
}

/// Period filter relative to now or to an anchor date
#[derive(Debug, Clone, PartialEq)]
pub struct RelativeDateFilter {
    pub attribute: Attribute,
    pub direction: RelativeDirection,
    pub offset: i64,
    pub count: i64,
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingDirection {
    Top,
    Bottom,
}

impl RankingDirection {
    pub fn key(&self) -> &'static str {
        match self {
            RankingDirection::Top => "top",
            RankingDirection::Bottom => "bottom",
        }
    }
}

/// Top or bottom N members of an attribute ranked by a measure
#[derive(Debug, Clone, PartialEq)]
pub struct RankingFilter {
    pub attribute: Attribute,
    pub measure: Measure,
    pub direction: RankingDirection,
    pub count: i64,
}

/// Negation of another filter on the same attribute
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludeFilter {
    pub inner: Box<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn key(&self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
        }
    }
}

/// Several conditions on one target combined with AND or OR
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalFilter {
    pub target: FilterTarget,
    pub operator: LogicalOperator,
    pub filters: Vec<Filter>,
}

/// Opaque filter carried as raw JAQL
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFilter {
    /// Raw dimension identifier, not resolved to an attribute
    pub attribute_id: String,
    pub condition: Value,
}
