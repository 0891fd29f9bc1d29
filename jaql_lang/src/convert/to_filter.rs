//! Translation of JAQL items into typed filters

use jaql_core::filter::{LogicalOperator, NumericBound, NumericOperator, RankingDirection, RelativeDirection, TextOperator};
use jaql_core::predicate::{parse_datetime, value_as_number};
use jaql_core::{Attribute, DataType, Filter, FilterConfig, FilterKind, FilterTarget};
use log::{debug, trace};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::TranslationError;
use crate::parser::{FilterType, detect_filter_type, parse_jaql, unwrap_scope};

/// Keys carried alongside a condition that do not change what it matches
const PASSIVE_KEYS: [&str; 5] = [
    "explicit",
    "multiSelection",
    "isCondition",
    "rankingMessage",
    "custom",
];

/// Translate a JAQL item into a filter with the given guid.
///
/// Never fails: anything that cannot be translated becomes a generic filter
/// that re-emits the payload unchanged.
pub fn create_filter_from_jaql(jaql: &Value, guid: &str) -> Filter {
    match try_create_filter(jaql, guid) {
        Ok(filter) => filter,
        Err(e) => {
            debug!("Using generic filter for '{}': {}", guid, e);
            create_generic_filter(jaql, guid)
        }
    }
}

/// Translate a JAQL item, reporting why translation is not possible
pub fn try_create_filter(jaql: &Value, guid: &str) -> Result<Filter, TranslationError> {
    let raw = unwrap_scope(jaql);
    let parsed = parse_jaql(raw).map_err(|e| TranslationError::Malformed(e.to_string()))?;
    let filter_type = detect_filter_type(&parsed)?;
    trace!("Detected {} filter for '{}'", filter_type, guid);

    if filter_type == FilterType::Invalid {
        return Err(TranslationError::UnknownShape);
    }

    let target = parsed.target().ok_or(TranslationError::MissingDimension)?;
    let attribute = target.attribute().clone();
    let config = FilterConfig::with_guid(guid).with_original_jaql(raw.clone());
    let empty = Map::new();
    let condition = parsed.filter_object().unwrap_or(&empty);

    match filter_type {
        FilterType::IncludeAll => {
            let config = config.multi_selection(parsed.multi_selection());
            Ok(Filter::members(attribute, Vec::<String>::new()).with_config(config))
        }
        FilterType::SpecificItems => {
            let config = config.multi_selection(parsed.multi_selection());
            members_filter(attribute, condition, config)
        }
        FilterType::Advanced => {
            Ok(Filter::custom(attribute.expression, Value::Object(condition.clone())).with_config(config))
        }
        FilterType::Condition
        | FilterType::DateRange
        | FilterType::NumericRange
        | FilterType::Period => {
            let datatype = if target.is_measure() {
                DataType::Numeric
            } else {
                parsed.datatype()
            };
            let filter = condition_filter(&target, datatype, condition, guid)?;
            Ok(filter.with_config(config))
        }
        FilterType::Invalid => Err(TranslationError::UnknownShape),
    }
}

/// The pass-through filter used when translation fails
pub fn create_generic_filter(jaql: &Value, guid: &str) -> Filter {
    let raw = unwrap_scope(jaql);
    let attribute_id = raw.get("dim").and_then(Value::as_str).unwrap_or_default();
    let condition = raw.get("filter").cloned().unwrap_or(Value::Null);
    let config = FilterConfig::with_guid(guid).with_original_jaql(raw.clone());
    Filter::custom(attribute_id, condition).with_config(config)
}

/// Detected filter type of a JAQL item, for diagnostics
pub fn translate_filter_type(jaql: &Value) -> Result<FilterType, TranslationError> {
    let parsed = parse_jaql(unwrap_scope(jaql)).map_err(|e| TranslationError::Malformed(e.to_string()))?;
    detect_filter_type(&parsed)
}

/// Translate a dashboard filter item `{jaql, instanceid, disabled, locked}`.
///
/// Items without an `instanceid` get a fresh guid.
pub fn create_filter_from_dashboard_item(item: &Value) -> Filter {
    let guid = item
        .get("instanceid")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let jaql = item.get("jaql").unwrap_or(&Value::Null);

    let mut filter = create_filter_from_jaql(jaql, &guid);
    filter.config.disabled = item.get("disabled").and_then(Value::as_bool).unwrap_or(false);
    filter.config.locked = item.get("locked").and_then(Value::as_bool).unwrap_or(false);
    filter
}

fn members_filter(
    attribute: Attribute,
    condition: &Map<String, Value>,
    config: FilterConfig,
) -> Result<Filter, TranslationError> {
    let members = condition.get("members").map(string_list).transpose()?;
    let exclude = condition.get("exclude").and_then(Value::as_object);
    let excluded = exclude
        .and_then(|exclude| exclude.get("members"))
        .map(string_list)
        .transpose()?;
    let turned_off = exclude
        .and_then(|exclude| exclude.get("turnedOff"))
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let filter = match (members, excluded) {
        (Some(members), Some(excluded)) if turned_off => {
            let active: Vec<String> = members
                .into_iter()
                .filter(|member| !excluded.contains(member))
                .collect();
            Filter::members(attribute, active).with_config(config.with_deactivated_members(excluded))
        }
        (None, Some(excluded)) => {
            Filter::members(attribute, excluded).with_config(config.exclude_members(true))
        }
        (Some(members), _) => Filter::members(attribute, members).with_config(config),
        (None, None) => Filter::members(attribute, Vec::<String>::new()).with_config(config),
    };
    Ok(filter)
}

fn condition_filter(
    target: &FilterTarget,
    datatype: DataType,
    condition: &Map<String, Value>,
    guid: &str,
) -> Result<Filter, TranslationError> {
    let attribute = target.attribute().clone();

    for (key, operator) in [("and", LogicalOperator::And), ("or", LogicalOperator::Or)] {
        if let Some(items) = condition.get(key) {
            return logical_filter(target, datatype, operator, items, guid);
        }
    }

    for (key, direction) in [("top", RankingDirection::Top), ("bottom", RankingDirection::Bottom)] {
        if let Some(count) = condition.get(key) {
            return ranking_filter(attribute, direction, count, condition.get("by"));
        }
    }

    if condition.contains_key("members") {
        return members_filter(attribute, condition, FilterConfig::with_guid(guid));
    }

    if let Some(exclude) = condition.get("exclude") {
        let inner = exclude.as_object().ok_or_else(|| {
            TranslationError::InvalidCondition("'exclude' must be an object".to_string())
        })?;
        if inner.contains_key("members") {
            return members_filter(attribute, condition, FilterConfig::with_guid(guid));
        }
        let inner_guid = format!("{}-0", guid);
        let inner = condition_filter(target, datatype, inner, &inner_guid)?.with_guid(inner_guid);
        return Ok(Filter::exclude(inner).with_guid(guid));
    }

    for (key, direction) in [("last", RelativeDirection::Last), ("next", RelativeDirection::Next)] {
        if let Some(period) = condition.get(key) {
            return relative_filter(attribute, direction, period);
        }
    }

    let has_range = condition.contains_key("from") || condition.contains_key("to");
    if datatype == DataType::DateTime && has_range && !target.is_measure() {
        return date_range_filter(attribute, condition);
    }

    if datatype == DataType::Text && !target.is_measure() {
        text_filter(attribute, condition)
    } else {
        numeric_filter(target.clone(), condition)
    }
}

fn logical_filter(
    target: &FilterTarget,
    datatype: DataType,
    operator: LogicalOperator,
    items: &Value,
    guid: &str,
) -> Result<Filter, TranslationError> {
    let items = items.as_array().ok_or_else(|| {
        TranslationError::InvalidCondition(format!("'{}' must be an array", operator.key()))
    })?;

    let filters = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let item = item.as_object().ok_or_else(|| {
                TranslationError::InvalidCondition(format!("'{}' items must be objects", operator.key()))
            })?;
            let sub_guid = format!("{}-{}", guid, i);
            condition_filter(target, datatype, item, &sub_guid).map(|f| f.with_guid(sub_guid))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Filter::logical(target.clone(), operator, filters).with_guid(guid))
}

fn ranking_filter(
    attribute: Attribute,
    direction: RankingDirection,
    count: &Value,
    by: Option<&Value>,
) -> Result<Filter, TranslationError> {
    let count = count.as_i64().ok_or_else(|| {
        TranslationError::InvalidCondition(format!("'{}' must be an integer", direction.key()))
    })?;

    let by = by.ok_or_else(|| {
        TranslationError::InvalidCondition("ranking filter has no 'by' measure".to_string())
    })?;
    let measure_jaql = parse_jaql(by).map_err(|e| TranslationError::Malformed(e.to_string()))?;
    if measure_jaql.formula.is_some() {
        return Err(TranslationError::FormulaNotSupported);
    }

    let Some(FilterTarget::Measure(measure)) = measure_jaql.target() else {
        return Err(TranslationError::InvalidCondition(
            "ranking measure needs 'dim' and 'agg'".to_string(),
        ));
    };

    Ok(Filter::ranking(attribute, measure, direction, count))
}

fn relative_filter(
    attribute: Attribute,
    direction: RelativeDirection,
    period: &Value,
) -> Result<Filter, TranslationError> {
    let period = period.as_object().ok_or_else(|| {
        TranslationError::InvalidCondition(format!("'{}' must be an object", direction.key()))
    })?;

    let integer = |key: &str| -> Result<Option<i64>, TranslationError> {
        match period.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_i64().map(Some).ok_or_else(|| {
                TranslationError::InvalidCondition(format!("'{}' must be an integer", key))
            }),
        }
    };

    let offset = integer("offset")?.unwrap_or(0);
    let count = integer("count")?.ok_or_else(|| {
        TranslationError::InvalidCondition(format!("'{}' has no count", direction.key()))
    })?;
    let anchor = period.get("anchor").and_then(Value::as_str).map(str::to_string);

    Ok(Filter::relative_date(attribute, direction, offset, count, anchor))
}

fn date_range_filter(attribute: Attribute, condition: &Map<String, Value>) -> Result<Filter, TranslationError> {
    let bound = |key: &str| -> Result<Option<String>, TranslationError> {
        match condition.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(date)) if parse_datetime(date).is_some() => Ok(Some(date.clone())),
            Some(other) => Err(TranslationError::InvalidCondition(format!(
                "'{}' is not a date: {}",
                key, other
            ))),
        }
    };

    Ok(Filter::date_range(attribute, bound("from")?, bound("to")?))
}

fn text_filter(attribute: Attribute, condition: &Map<String, Value>) -> Result<Filter, TranslationError> {
    let mut comparisons = active_keys(condition).map(|(key, value)| -> Result<(TextOperator, String), TranslationError> {
        let operator = TextOperator::from_key(key).ok_or_else(|| {
            TranslationError::InvalidCondition(format!("'{}' is not a text operator", key))
        })?;
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(TranslationError::InvalidCondition(format!(
                    "'{}' needs a string, found {}",
                    key, other
                )));
            }
        };
        Ok((operator, value))
    });

    let (operator, value) = comparisons.next().ok_or(TranslationError::UnknownShape)??;
    if comparisons.next().is_some() {
        return Err(TranslationError::InvalidCondition(
            "text filters hold a single comparison".to_string(),
        ));
    }

    Ok(Filter::text(attribute, operator, value))
}

fn numeric_filter(target: FilterTarget, condition: &Map<String, Value>) -> Result<Filter, TranslationError> {
    let bounds = active_keys(condition)
        .map(|(key, value)| -> Result<NumericBound, TranslationError> {
            let operator = NumericOperator::from_key(key).ok_or_else(|| {
                TranslationError::InvalidCondition(format!("'{}' is not a numeric operator", key))
            })?;
            let value = value_as_number(value).ok_or_else(|| {
                TranslationError::InvalidCondition(format!("'{}' needs a number, found {}", key, value))
            })?;
            Ok(NumericBound::new(operator, value))
        })
        .collect::<Result<Vec<_>, TranslationError>>()?;

    let mut bounds = bounds.into_iter();
    let first = bounds.next().ok_or(TranslationError::UnknownShape)?;
    let second = bounds.next();
    if bounds.next().is_some() {
        return Err(TranslationError::InvalidCondition(
            "numeric filters hold at most two comparisons".to_string(),
        ));
    }

    let mut filter = Filter::numeric(target, first.operator, first.value);
    if let FilterKind::Numeric(numeric) = &mut filter.kind {
        numeric.second = second;
    }
    Ok(filter)
}

fn active_keys(condition: &Map<String, Value>) -> impl Iterator<Item = (&str, &Value)> {
    condition
        .iter()
        .map(|(key, value)| (key.as_str(), value))
        .filter(|(key, _)| !PASSIVE_KEYS.contains(key))
}

fn string_list(value: &Value) -> Result<Vec<String>, TranslationError> {
    let items = value
        .as_array()
        .ok_or_else(|| TranslationError::InvalidCondition("'members' must be an array".to_string()))?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(TranslationError::InvalidCondition(format!(
                "member must be a string, found {}",
                other
            ))),
        })
        .collect()
}
