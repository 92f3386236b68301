use crate::value::Value;
use serde::{Deserialize, Serialize};

///
/// FilterCondition
///
/// One filter clause as supplied by a caller, typically deserialized from
/// a JSON request body. The compiler never mutates or persists it.
///
/// `id` is an opaque client-side handle and passes through untouched.
/// `operator` stays a plain string at this boundary so that unknown
/// operator names surface as compile errors rather than deserialization
/// failures.
///

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct FilterCondition {
    #[serde(default)]
    pub id: String,
    pub field: String,
    pub operator: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

impl FilterCondition {
    #[must_use]
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        values: Vec<Value>,
    ) -> Self {
        Self {
            id: String::new(),
            field: field.into(),
            operator: operator.into(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_the_wire_shape() {
        let condition: FilterCondition = serde_json::from_str(
            r#"{"id": "c1", "field": "age", "operator": "between", "values": [20, 30]}"#,
        )
        .unwrap();

        assert_eq!(condition.id, "c1");
        assert_eq!(condition.field, "age");
        assert_eq!(condition.operator, "between");
        assert_eq!(
            condition.values,
            vec![Value::Number(20.0), Value::Number(30.0)]
        );
    }

    #[test]
    fn id_and_values_are_optional() {
        let condition: FilterCondition =
            serde_json::from_str(r#"{"field": "title", "operator": "empty"}"#).unwrap();

        assert_eq!(condition.id, "");
        assert!(condition.values.is_empty());
    }
}
