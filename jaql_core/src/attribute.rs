//! Attribute and measure references

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Data type of a column as declared in JAQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Text,
    Numeric,
    #[serde(rename = "datetime")]
    DateTime,
}

impl DataType {
    /// The wire name of this data type
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Numeric => "numeric",
            DataType::DateTime => "datetime",
        }
    }

    /// Parse a wire name, returning None for unknown types
    pub fn parse(name: &str) -> Option<DataType> {
        match name {
            "text" => Some(DataType::Text),
            "numeric" => Some(DataType::Numeric),
            "datetime" => Some(DataType::DateTime),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference to a data model column or dimension.
///
/// Two attributes are equal when their expressions are equal; the title is
/// display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub expression: String,
    pub title: String,
    pub datatype: DataType,
    pub level: Option<String>,
}

impl Attribute {
    /// Create a new attribute reference
    pub fn new(expression: impl Into<String>, title: impl Into<String>, datatype: DataType) -> Self {
        Self {
            expression: expression.into(),
            title: title.into(),
            datatype,
            level: None,
        }
    }

    /// Set the date granularity of a datetime attribute
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Title for display, falling back to the expression
    pub fn display_name(&self) -> &str {
        if self.title.is_empty() {
            &self.expression
        } else {
            &self.title
        }
    }

    /// The JAQL fields describing this attribute
    pub fn jaql(&self) -> Map<String, Value> {
        let mut jaql = Map::new();
        jaql.insert("dim".to_string(), Value::String(self.expression.clone()));
        jaql.insert(
            "datatype".to_string(),
            Value::String(self.datatype.as_str().to_string()),
        );
        if let Some(level) = &self.level {
            jaql.insert("level".to_string(), Value::String(level.clone()));
        }
        jaql.insert("title".to_string(), Value::String(self.title.clone()));
        jaql
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.expression.hash(state);
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// An aggregation over an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub attribute: Attribute,
    pub aggregation: String,
    pub title: String,
}

impl Measure {
    pub fn new(attribute: Attribute, aggregation: impl Into<String>) -> Self {
        let title = attribute.title.clone();
        Self {
            attribute,
            aggregation: aggregation.into(),
            title,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// The JAQL fields describing this measure
    pub fn jaql(&self) -> Map<String, Value> {
        let mut jaql = self.attribute.jaql();
        jaql.insert("agg".to_string(), Value::String(self.aggregation.clone()));
        jaql.insert("title".to_string(), Value::String(self.title.clone()));
        jaql
    }
}

/// What a condition filter is evaluated against
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTarget {
    Attribute(Attribute),
    Measure(Measure),
}

impl FilterTarget {
    /// The underlying attribute, for measures the aggregated one
    pub fn attribute(&self) -> &Attribute {
        match self {
            FilterTarget::Attribute(attribute) => attribute,
            FilterTarget::Measure(measure) => &measure.attribute,
        }
    }

    pub fn is_measure(&self) -> bool {
        matches!(self, FilterTarget::Measure(_))
    }

    pub fn jaql(&self) -> Map<String, Value> {
        match self {
            FilterTarget::Attribute(attribute) => attribute.jaql(),
            FilterTarget::Measure(measure) => measure.jaql(),
        }
    }
}

impl From<Attribute> for FilterTarget {
    fn from(attribute: Attribute) -> Self {
        FilterTarget::Attribute(attribute)
    }
}

impl From<Measure> for FilterTarget {
    fn from(measure: Measure) -> Self {
        FilterTarget::Measure(measure)
    }
}
