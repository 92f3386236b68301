use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

///
/// Value
///
/// Runtime value carried by filter conditions and compiled predicates.
///
/// On the wire only `Null`, `Bool`, `Number`, `Text` and `List` are
/// reachable (the untagged deserializer tries variants in declaration
/// order, so strings always land in `Text`). `Date` values are produced
/// by compilation, after an explicit, fallible parse.
///

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Self>),
    Date(DateTime<Utc>),
}

impl Value {
    /// Whether the value counts as "supplied" for validation purposes.
    ///
    /// Mirrors the wire contract: `null` and the empty string are treated
    /// as absent; everything else is present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Text(text) => !text.is_empty(),
            _ => true,
        }
    }

    /// Lossy numeric coercion with ECMAScript `Number()` semantics.
    ///
    /// Unparsable text coerces to `NaN` rather than failing; numeric
    /// operators intentionally do not reject that result.
    #[must_use]
    pub fn to_number_lossy(&self) -> f64 {
        match self {
            Self::Number(number) => *number,
            Self::Bool(flag) => {
                if *flag {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Null => 0.0,
            Self::Date(instant) => instant.timestamp_millis() as f64,
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::List(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.to_number_lossy(),
                _ => f64::NAN,
            },
        }
    }

    /// Lossy textual coercion for pattern operators.
    #[must_use]
    pub fn to_text_lossy(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(number) => format_number(*number),
            Self::Bool(flag) => flag.to_string(),
            Self::Null => "null".to_string(),
            Self::Date(instant) => instant.to_rfc3339(),
            Self::List(items) => items
                .iter()
                .map(Self::to_text_lossy)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    /// Explicit, fallible date coercion.
    ///
    /// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` datetimes
    /// (taken as UTC), plain `YYYY-MM-DD` dates (midnight UTC) and numeric
    /// millisecond epochs. Returns `None` for everything else.
    #[must_use]
    pub fn to_date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Date(instant) => Some(*instant),
            Self::Number(millis) if millis.is_finite() => {
                Utc.timestamp_millis_opt(*millis as i64).single()
            }
            Self::Text(text) => parse_date_text(text),
            _ => None,
        }
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(parsed.and_utc());
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(parsed.and_time(NaiveTime::MIN).and_utc());
    }

    None
}

/// Format a number the way JavaScript stringifies it: integral values
/// print without a fractional part.
fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

/// Widen an instant to its whole UTC calendar day:
/// `[00:00:00.000, 23:59:59.999]`.
#[must_use]
pub fn day_window(instant: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = instant.date_naive().and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::milliseconds(86_399_999);

    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_rejects_null_and_empty_text() {
        assert!(!Value::Null.is_present());
        assert!(!Value::Text(String::new()).is_present());
        assert!(Value::Text("x".to_string()).is_present());
        assert!(Value::Bool(false).is_present());
        assert!(Value::Number(0.0).is_present());
    }

    #[test]
    fn number_coercion_follows_ecmascript() {
        assert_eq!(Value::Number(25.0).to_number_lossy(), 25.0);
        assert_eq!(Value::Bool(true).to_number_lossy(), 1.0);
        assert_eq!(Value::Bool(false).to_number_lossy(), 0.0);
        assert_eq!(Value::Null.to_number_lossy(), 0.0);
        assert_eq!(Value::Text(" 42 ".to_string()).to_number_lossy(), 42.0);
        assert_eq!(Value::Text(String::new()).to_number_lossy(), 0.0);
        assert!(Value::Text("abc".to_string()).to_number_lossy().is_nan());
        assert_eq!(Value::List(vec![]).to_number_lossy(), 0.0);
        assert_eq!(Value::List(vec![Value::Number(5.0)]).to_number_lossy(), 5.0);
        assert!(
            Value::List(vec![Value::Number(1.0), Value::Number(2.0)])
                .to_number_lossy()
                .is_nan()
        );
    }

    #[test]
    fn text_coercion_prints_integral_numbers_bare() {
        assert_eq!(Value::Number(30.0).to_text_lossy(), "30");
        assert_eq!(Value::Number(1.5).to_text_lossy(), "1.5");
        assert_eq!(Value::Bool(true).to_text_lossy(), "true");
    }

    #[test]
    fn date_coercion_accepts_common_shapes() {
        let midnight = Value::Text("2025-01-01".to_string()).to_date().unwrap();
        assert_eq!(midnight.to_rfc3339(), "2025-01-01T00:00:00+00:00");

        let stamped = Value::Text("2025-01-01T10:30:00Z".to_string())
            .to_date()
            .unwrap();
        assert_eq!(stamped.timestamp(), midnight.timestamp() + 10 * 3600 + 1800);

        let naive = Value::Text("2025-01-01T10:30:00".to_string())
            .to_date()
            .unwrap();
        assert_eq!(naive, stamped);

        let epoch = Value::Number(0.0).to_date().unwrap();
        assert_eq!(epoch.timestamp_millis(), 0);
    }

    #[test]
    fn date_coercion_rejects_garbage() {
        assert!(Value::Text("invalid-date".to_string()).to_date().is_none());
        assert!(Value::Bool(true).to_date().is_none());
        assert!(Value::Null.to_date().is_none());
        assert!(Value::Number(f64::NAN).to_date().is_none());
    }

    #[test]
    fn day_window_brackets_the_calendar_day() {
        let noon = Value::Text("2025-01-01T12:00:00Z".to_string())
            .to_date()
            .unwrap();
        let (start, end) = day_window(noon);

        assert_eq!(
            start.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            "2025-01-01T00:00:00.000Z"
        );
        assert_eq!(
            end.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            "2025-01-01T23:59:59.999Z"
        );
    }

    #[test]
    fn untagged_deserialization_keeps_strings_textual() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 25, "2025-01-01", ["a", 1]]"#).unwrap();

        assert_eq!(values[0], Value::Null);
        assert_eq!(values[1], Value::Bool(true));
        assert_eq!(values[2], Value::Number(25.0));
        assert_eq!(values[3], Value::Text("2025-01-01".to_string()));
        assert_eq!(
            values[4],
            Value::List(vec![Value::Text("a".to_string()), Value::Number(1.0)])
        );
    }
}
