use crate::{
    error::FilterErrorCause,
    predicate::{Predicate, RegexMatch},
    types::FieldType,
    value::{Value, day_window},
};
use chrono::{DateTime, Utc};

///
/// Operator Catalog
///
/// The fixed set of recognized filter operators, plus the compilation
/// rule for each. Dispatch is table-driven: every operator maps to one
/// pure rule `(field, field_type, values) -> Predicate | cause`, and the
/// same operator name can produce different predicate shapes depending on
/// the field's registered type (`is` widens dates to a whole day,
/// `contains` switches between regex match and range containment).
///

///
/// Operator
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operator {
    Is,
    IsNot,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Before,
    After,
    Between,
    NotBetween,
    Overlaps,
    IncludesAll,
    ExcludesAll,
    IsAnyOf,
    IsNotAnyOf,
    Empty,
    NotEmpty,
}

/// Every recognized operator, keyed by its wire name.
pub const OPERATORS: &[(&str, Operator)] = &[
    ("is", Operator::Is),
    ("is_not", Operator::IsNot),
    ("contains", Operator::Contains),
    ("not_contains", Operator::NotContains),
    ("starts_with", Operator::StartsWith),
    ("ends_with", Operator::EndsWith),
    ("equals", Operator::Equals),
    ("not_equals", Operator::NotEquals),
    ("greater_than", Operator::GreaterThan),
    ("less_than", Operator::LessThan),
    ("before", Operator::Before),
    ("after", Operator::After),
    ("between", Operator::Between),
    ("not_between", Operator::NotBetween),
    ("overlaps", Operator::Overlaps),
    ("includes_all", Operator::IncludesAll),
    ("excludes_all", Operator::ExcludesAll),
    ("is_any_of", Operator::IsAnyOf),
    ("is_not_any_of", Operator::IsNotAnyOf),
    ("empty", Operator::Empty),
    ("not_empty", Operator::NotEmpty),
];

impl Operator {
    /// Look an operator up by wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        OPERATORS
            .iter()
            .find(|(wire, _)| *wire == name)
            .map(|(_, op)| *op)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        OPERATORS
            .iter()
            .find(|(_, op)| *op == self)
            .map_or("", |(wire, _)| wire)
    }
}

/// Whether an operator *name* is exempt from the values-array gate.
///
/// The gate runs before the name is resolved, so unknown operators with
/// an empty values array fail as missing-values, not as unknown.
#[must_use]
pub fn is_nullary_name(name: &str) -> bool {
    matches!(name, "empty" | "not_empty")
}

/// Compile one validated condition into a predicate fragment.
///
/// Pure rule dispatch; the caller has already enforced the values-array
/// gate and resolved the operator name.
pub(crate) fn apply(
    op: Operator,
    field: &str,
    field_type: Option<FieldType>,
    values: &[Value],
) -> Result<Predicate, FilterErrorCause> {
    let first = values.first();
    let second = values.get(1);
    let is_date = field_type.is_some_and(FieldType::is_date);
    let is_array = field_type.is_some_and(FieldType::is_array);

    match op {
        Operator::Is => {
            if is_date {
                let (start, end) = parsed_day_window(require_present(first)?)?;
                Ok(date_range(field, start, end))
            } else {
                Ok(Predicate::eq(field, first_or_null(values)))
            }
        }

        Operator::IsNot => {
            if is_date {
                let (start, end) = parsed_day_window(require_present(first)?)?;
                Ok(outside_range(field, start, end))
            } else {
                Ok(Predicate::ne(field, first_or_null(values)))
            }
        }

        Operator::Contains => {
            let value = require_present(first)?;
            if is_array {
                Ok(range_contains(field, value.to_number_lossy()))
            } else {
                Ok(Predicate::Regex(RegexMatch::substring(
                    field,
                    &value.to_text_lossy(),
                )))
            }
        }

        Operator::NotContains => {
            let value = require_present(first)?;
            Ok(Predicate::not(Predicate::Regex(RegexMatch::substring(
                field,
                &value.to_text_lossy(),
            ))))
        }

        Operator::StartsWith => {
            let value = require_present(first)?;
            Ok(Predicate::Regex(RegexMatch::prefix(
                field,
                &value.to_text_lossy(),
            )))
        }

        Operator::EndsWith => {
            let value = require_present(first)?;
            Ok(Predicate::Regex(RegexMatch::suffix(
                field,
                &value.to_text_lossy(),
            )))
        }

        // Numeric coercion is lossy: a value that coerces to NaN is not
        // rejected here. See the compiler docs for the recorded gap.
        Operator::Equals => {
            let value = require_present(first)?;
            Ok(Predicate::eq(field, Value::Number(value.to_number_lossy())))
        }

        Operator::NotEquals => {
            let value = require_present(first)?;
            Ok(Predicate::ne(field, Value::Number(value.to_number_lossy())))
        }

        Operator::GreaterThan => {
            let value = require_present(first)?;
            Ok(Predicate::gt(field, Value::Number(value.to_number_lossy())))
        }

        Operator::LessThan => {
            let value = require_present(first)?;
            Ok(Predicate::lt(field, Value::Number(value.to_number_lossy())))
        }

        Operator::Before => {
            let value = require_present(first)?;
            Ok(Predicate::lt(field, Value::Date(parse_date(value)?)))
        }

        Operator::After => {
            let value = require_present(first)?;
            Ok(Predicate::gt(field, Value::Date(parse_date(value)?)))
        }

        Operator::Between => {
            let (low, high) = require_two(first, second)?;
            match field_type {
                Some(FieldType::Number) => Ok(Predicate::Range {
                    field: field.to_string(),
                    min: Value::Number(low.to_number_lossy()),
                    max: Value::Number(high.to_number_lossy()),
                }),
                // Stored `[min, max]` range fully contains `[low, high]`.
                Some(FieldType::Array) => Ok(Predicate::And(vec![
                    Predicate::gte(range_min(field), Value::Number(low.to_number_lossy())),
                    Predicate::lte(range_max(field), Value::Number(high.to_number_lossy())),
                ])),
                _ => {
                    let start = parse_date(low)?;
                    let end = parse_date(high)?;
                    Ok(date_range(field, start, end))
                }
            }
        }

        Operator::NotBetween => {
            let (low, high) = require_two(first, second)?;
            let start = parse_date(low)?;
            let end = parse_date(high)?;
            Ok(outside_range(field, start, end))
        }

        Operator::Overlaps => {
            if !is_array {
                return Err(FilterErrorCause::NotAnArrayField);
            }
            let (low, high) = require_two(first, second)?;
            // Stored `[min, max]` range intersects `[low, high]`.
            Ok(Predicate::And(vec![
                Predicate::lte(range_min(field), Value::Number(high.to_number_lossy())),
                Predicate::gte(range_max(field), Value::Number(low.to_number_lossy())),
            ]))
        }

        Operator::IncludesAll => {
            if !is_array {
                return Err(FilterErrorCause::NotAnArrayField);
            }
            Ok(Predicate::ContainsAll {
                field: field.to_string(),
                values: require_value_set(values)?,
            })
        }

        Operator::ExcludesAll => {
            if !is_array {
                return Err(FilterErrorCause::NotAnArrayField);
            }
            Ok(Predicate::not(Predicate::ContainsAll {
                field: field.to_string(),
                values: require_value_set(values)?,
            }))
        }

        Operator::IsAnyOf => Ok(Predicate::In {
            field: field.to_string(),
            values: require_value_set(values)?,
        }),

        Operator::IsNotAnyOf => Ok(Predicate::NotIn {
            field: field.to_string(),
            values: require_value_set(values)?,
        }),

        Operator::Empty => Ok(Predicate::IsMissing {
            field: field.to_string(),
            include_empty_text: field_type.is_some_and(FieldType::is_text),
        }),

        Operator::NotEmpty => Ok(Predicate::not(Predicate::IsMissing {
            field: field.to_string(),
            include_empty_text: field_type.is_some_and(FieldType::is_text),
        })),
    }
}

// --- shared rule helpers ---

fn require_present(value: Option<&Value>) -> Result<&Value, FilterErrorCause> {
    value
        .filter(|v| v.is_present())
        .ok_or(FilterErrorCause::MissingValue)
}

fn require_two<'a>(
    first: Option<&'a Value>,
    second: Option<&'a Value>,
) -> Result<(&'a Value, &'a Value), FilterErrorCause> {
    match (first, second) {
        (Some(low), Some(high)) if low.is_present() && high.is_present() => Ok((low, high)),
        _ => Err(FilterErrorCause::RequiresTwoValues),
    }
}

/// Drop absent entries; at least one must survive.
fn require_value_set(values: &[Value]) -> Result<Vec<Value>, FilterErrorCause> {
    let kept: Vec<Value> = values.iter().filter(|v| v.is_present()).cloned().collect();
    if kept.is_empty() {
        Err(FilterErrorCause::EmptyValueSet)
    } else {
        Ok(kept)
    }
}

fn parse_date(value: &Value) -> Result<DateTime<Utc>, FilterErrorCause> {
    value.to_date().ok_or(FilterErrorCause::InvalidDate)
}

fn parsed_day_window(
    value: &Value,
) -> Result<(DateTime<Utc>, DateTime<Utc>), FilterErrorCause> {
    Ok(day_window(parse_date(value)?))
}

fn first_or_null(values: &[Value]) -> Value {
    values.first().cloned().unwrap_or(Value::Null)
}

fn date_range(field: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Predicate {
    Predicate::Range {
        field: field.to_string(),
        min: Value::Date(start),
        max: Value::Date(end),
    }
}

/// `field < start OR field > end`.
fn outside_range(field: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Predicate {
    Predicate::lt(field, Value::Date(start)) | Predicate::gt(field, Value::Date(end))
}

/// Stored `[min, max]` range contains the single point `bound`.
fn range_contains(field: &str, bound: f64) -> Predicate {
    Predicate::And(vec![
        Predicate::lte(range_min(field), Value::Number(bound)),
        Predicate::gte(range_max(field), Value::Number(bound)),
    ])
}

fn range_min(field: &str) -> String {
    format!("{field}.0")
}

fn range_max(field: &str) -> String {
    format!("{field}.1")
}
