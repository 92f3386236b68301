//! MongoDB rendering backend for sift.
//!
//! Takes the predicate AST produced by `sift-core` and renders it as a
//! MongoDB query document (a `serde_json::Value` object ready to be
//! handed to a driver). [`build_query`] is the end-to-end entry point:
//! conditions plus a field type map in, a query document or the first
//! structured [`FilterError`] out.

use serde_json::{Map, Value as Json, json};
use sift_core::{
    compile::compile,
    condition::FilterCondition,
    error::FilterError,
    predicate::{CompareOp, ComparePredicate, Predicate, RegexMatch},
    types::FieldTypeMap,
    value::Value,
};

/// Compile conditions and render the result as a MongoDB query document.
///
/// The empty condition list renders as `{}` (match everything). A list of
/// valid conditions always renders under a top-level `$and`.
///
/// # Errors
///
/// Returns the first [`FilterError`] from compilation; nothing is
/// rendered on failure.
pub fn build_query(
    conditions: &[FilterCondition],
    types: &FieldTypeMap,
) -> Result<Json, FilterError> {
    Ok(render(&compile(conditions, types)?))
}

/// Render one predicate node as a MongoDB query fragment.
#[must_use]
pub fn render(pred: &Predicate) -> Json {
    match pred {
        Predicate::True => json!({}),
        Predicate::And(parts) => group("$and", parts),
        Predicate::Or(parts) => group("$or", parts),
        Predicate::Not(inner) => render_negated(inner),
        Predicate::Compare(cmp) => render_compare(cmp),
        Predicate::Range { field, min, max } => field_doc(
            field,
            json!({ "$gte": literal(min), "$lte": literal(max) }),
        ),
        Predicate::In { field, values } => field_doc(field, json!({ "$in": literals(values) })),
        Predicate::NotIn { field, values } => {
            field_doc(field, json!({ "$nin": literals(values) }))
        }
        Predicate::ContainsAll { field, values } => {
            field_doc(field, json!({ "$all": literals(values) }))
        }
        Predicate::Regex(rx) => field_doc(&rx.field, regex_body(rx)),
        Predicate::IsMissing {
            field,
            include_empty_text,
        } => field_doc(field, json!({ "$in": missing_set(*include_empty_text) })),
    }
}

/// Negations with a field-level MongoDB form render inline; anything else
/// falls back to `$nor`.
fn render_negated(inner: &Predicate) -> Json {
    match inner {
        Predicate::Regex(rx) => field_doc(&rx.field, json!({ "$not": regex_body(rx) })),
        Predicate::ContainsAll { field, values } => {
            field_doc(field, json!({ "$not": { "$all": literals(values) } }))
        }
        Predicate::IsMissing {
            field,
            include_empty_text,
        } => field_doc(field, json!({ "$nin": missing_set(*include_empty_text) })),
        other => json!({ "$nor": [render(other)] }),
    }
}

fn render_compare(cmp: &ComparePredicate) -> Json {
    let key = match cmp.op {
        CompareOp::Eq => "$eq",
        CompareOp::Ne => "$ne",
        CompareOp::Lt => "$lt",
        CompareOp::Lte => "$lte",
        CompareOp::Gt => "$gt",
        CompareOp::Gte => "$gte",
    };
    let mut body = Map::new();
    body.insert(key.to_string(), literal(&cmp.value));

    field_doc(&cmp.field, Json::Object(body))
}

fn regex_body(rx: &RegexMatch) -> Json {
    if rx.case_insensitive {
        json!({ "$regex": rx.pattern, "$options": "i" })
    } else {
        json!({ "$regex": rx.pattern })
    }
}

/// `empty` matches null/absent fields, plus `""` on text fields.
fn missing_set(include_empty_text: bool) -> Json {
    if include_empty_text {
        json!([null, ""])
    } else {
        json!([null])
    }
}

fn group(key: &str, parts: &[Predicate]) -> Json {
    if parts.is_empty() {
        json!({})
    } else {
        let mut doc = Map::new();
        doc.insert(
            key.to_string(),
            Json::Array(parts.iter().map(render).collect()),
        );
        Json::Object(doc)
    }
}

fn field_doc(field: &str, body: Json) -> Json {
    let mut doc = Map::new();
    doc.insert(field.to_string(), body);

    Json::Object(doc)
}

/// Render a predicate value as a JSON literal.
///
/// Integral numbers within the safe range render as JSON integers so
/// query documents match what a JSON-speaking client would have sent.
/// Dates render in MongoDB extended JSON (`{"$date": ...}`) with
/// millisecond precision. Non-finite numbers have no JSON form and
/// collapse to null.
fn literal(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(flag) => Json::Bool(*flag),
        Value::Number(number) => render_number(*number),
        Value::Text(text) => Json::String(text.clone()),
        Value::List(items) => Json::Array(literals(items)),
        Value::Date(instant) => json!({
            "$date": instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
        }),
    }
}

fn literals(values: &[Value]) -> Vec<Json> {
    values.iter().map(literal).collect()
}

fn render_number(number: f64) -> Json {
    if number.fract() == 0.0 && number.abs() < 9_007_199_254_740_992.0 {
        // fract() is NaN for non-finite input, so this arm is finite-only
        json!(number as i64)
    } else {
        serde_json::Number::from_f64(number).map_or(Json::Null, Json::Number)
    }
}
